//! Fixtures
//!
//! YAML-driven demo data: a menu of products, a cart of line items, a promo
//! catalog, and checkout policy. Each kind lives under
//! `<base>/<kind>/<name>.yml`; [`Fixture::from_set`] loads all four for a
//! named set.

use std::{fs, path::PathBuf};

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    delivery::DeliveryPolicy,
    fixtures::{
        cart::CartFixture,
        checkout::CheckoutFixture,
        menu::{MenuFixture, parse_price},
        promotions::PromotionsFixture,
    },
    items::{ItemError, LineItem},
    products::{Product, ProductKey},
    promotions::{PromoCatalog, PromoCode},
};

pub mod cart;
pub mod checkout;
pub mod menu;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("invalid price format: {0}")]
    InvalidPrice(String),

    /// Percentage or tax rate outside `0.0..=1.0`
    #[error("invalid percentage: {0}")]
    InvalidPercentage(f64),

    /// Unknown currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between fixture files
    #[error("currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No fixture with a price loaded yet
    #[error("no prices loaded yet; currency unknown")]
    NoCurrency,

    /// No checkout policy loaded
    #[error("no checkout policy loaded")]
    NoCheckoutPolicy,

    /// Not enough cart lines in fixture
    #[error("not enough cart lines in fixture, available: {available}, requested: {requested}")]
    NotEnoughLines {
        /// Number of lines defined in the fixture
        available: usize,
        /// Number of lines requested
        requested: usize,
    },

    /// Wrapped line item error
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Cart creation error
    #[error("failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Menu products with generated keys
    product_meta: SlotMap<ProductKey, Product<'a>>,

    /// String key -> `SlotMap` key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,

    /// Pre-built cart lines (reference products by `ProductKey`)
    lines: Vec<LineItem<'a>>,

    /// Promo catalog
    catalog: PromoCatalog<'a>,

    /// Delivery fee policy from the checkout config
    policy: Option<DeliveryPolicy<'a>>,

    /// Tax rate from the checkout config
    tax_rate: Option<Percentage>,

    /// Currency for the fixture set
    currency: Option<&'static rusty_money::iso::Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    #[must_use]
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            product_meta: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            lines: Vec::new(),
            catalog: PromoCatalog::default(),
            policy: None,
            tax_rate: None,
            currency: None,
        }
    }

    /// Load a complete fixture set (menu, cart, promotions and checkout
    /// policy with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_menu(name)?
            .load_cart(name)?
            .load_promotions(name)?
            .load_checkout(name)?;

        Ok(fixture)
    }

    /// Load menu products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are
    /// currency mismatches.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("menu").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: MenuFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let (_minor_units, currency) = parse_price(&product_fixture.price)?;
            self.register_currency(currency)?;

            let product: Product<'a> = product_fixture.try_into()?;
            let product_key = self.product_meta.insert(product);

            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced
    /// products don't exist.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for line_fixture in fixture.lines {
            let product_key = self
                .product_keys
                .get(&line_fixture.product)
                .copied()
                .ok_or_else(|| FixtureError::ProductNotFound(line_fixture.product.clone()))?;

            let product = self
                .product_meta
                .get(product_key)
                .ok_or_else(|| FixtureError::ProductNotFound(line_fixture.product.clone()))?;

            let line = line_fixture.try_into_line(product_key, product.price)?;

            self.lines.push(line);
        }

        Ok(self)
    }

    /// Load the promo catalog from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a promo
    /// carries an invalid percentage or price.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("promotions")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: PromotionsFixture = serde_norway::from_str(&contents)?;

        let mut promos: Vec<PromoCode<'a>> = Vec::with_capacity(fixture.promos.len());

        for promo_fixture in fixture.promos {
            let (min_minor, currency) = parse_price(&promo_fixture.min_subtotal)?;
            self.register_currency(currency)?;

            promos.push(promo_fixture.try_into_promo(min_minor, currency)?);
        }

        self.catalog = PromoCatalog::new(promos);

        Ok(self)
    }

    /// Load the checkout policy (delivery fees and tax rate) from a YAML
    /// fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the tax
    /// rate is out of range.
    pub fn load_checkout(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("checkout").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CheckoutFixture = serde_norway::from_str(&contents)?;

        let (policy, tax_rate, currency) = fixture.try_into_policy()?;
        self.register_currency(currency)?;

        self.policy = Some(policy);
        self.tax_rate = Some(tax_rate);

        Ok(self)
    }

    /// Build a cart from the fixture's lines.
    ///
    /// `n` limits the cart to the first `n` lines; `None` takes all of them.
    ///
    /// # Errors
    ///
    /// Returns an error if more lines are requested than the fixture defines,
    /// or if no currency is known yet.
    pub fn cart(&self, n: Option<usize>) -> Result<Cart<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;
        let available = self.lines.len();
        let requested = n.unwrap_or(available);

        if requested > available {
            return Err(FixtureError::NotEnoughLines {
                available,
                requested,
            });
        }

        let lines: Vec<LineItem<'a>> = self.lines.iter().take(requested).cloned().collect();

        Ok(Cart::with_items(lines, currency)?)
    }

    /// Return the promo catalog.
    pub fn catalog(&self) -> &PromoCatalog<'a> {
        &self.catalog
    }

    /// Return the delivery policy from the checkout config.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCheckoutPolicy`] if no checkout fixture has
    /// been loaded.
    pub fn policy(&self) -> Result<DeliveryPolicy<'a>, FixtureError> {
        self.policy.ok_or(FixtureError::NoCheckoutPolicy)
    }

    /// Return the tax rate from the checkout config.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCheckoutPolicy`] if no checkout fixture has
    /// been loaded.
    pub fn tax_rate(&self) -> Result<Percentage, FixtureError> {
        self.tax_rate.ok_or(FixtureError::NoCheckoutPolicy)
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product<'a>, FixtureError> {
        let product_key = self
            .product_keys
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))?;

        self.product_meta
            .get(*product_key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Return the product metadata map for receipt rendering.
    pub fn product_meta_map(&self) -> &SlotMap<ProductKey, Product<'a>> {
        &self.product_meta
    }

    /// Record the fixture set currency, rejecting mixed currencies.
    fn register_currency(
        &mut self,
        currency: &'static rusty_money::iso::Currency,
    ) -> Result<(), FixtureError> {
        if let Some(existing) = self.currency {
            if existing != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        Ok(())
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
