//! Items
//!
//! A [`LineItem`] is one distinct cart entry: a product plus a specific
//! customization combination, with a quantity. Two entries for the same
//! product with different customizations are different lines.

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::ProductKey;

/// Errors related to line item construction or totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    /// Quantity must be at least one; zero-quantity entries are removed from
    /// the cart, never retained.
    #[error("line item quantity must be at least 1")]
    InvalidQuantity,

    /// A customization's currency differs from the item's base price currency.
    #[error("customization has currency {0}, but item has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// A customization attached to a line item, such as "Extra Cheese".
///
/// Free customizations carry a zero price and still participate in the
/// line's merge identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Customization<'a> {
    label: String,
    price: Money<'a, Currency>,
}

impl<'a> Customization<'a> {
    /// Create a new customization.
    #[must_use]
    pub fn new(label: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            label: label.into(),
            price,
        }
    }

    /// Return the customization label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Return the per-unit price of the customization.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}

/// One distinct cart entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    product: ProductKey,
    base_price: Money<'a, Currency>,
    quantity: u32,
    customizations: SmallVec<[Customization<'a>; 4]>,
}

impl<'a> LineItem<'a> {
    /// Create a new line item with no customizations.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::InvalidQuantity`] if `quantity` is zero.
    pub fn new(
        product: ProductKey,
        base_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Result<Self, ItemError> {
        Self::with_customizations(product, base_price, quantity, SmallVec::new())
    }

    /// Create a new line item with the given customizations.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::InvalidQuantity`] if `quantity` is zero, or
    /// [`ItemError::CurrencyMismatch`] if any customization is priced in a
    /// different currency than the base price.
    pub fn with_customizations(
        product: ProductKey,
        base_price: Money<'a, Currency>,
        quantity: u32,
        customizations: impl Into<SmallVec<[Customization<'a>; 4]>>,
    ) -> Result<Self, ItemError> {
        if quantity == 0 {
            return Err(ItemError::InvalidQuantity);
        }

        let customizations = customizations.into();

        customizations.iter().try_for_each(|customization| {
            let currency = customization.price().currency();

            if currency == base_price.currency() {
                Ok(())
            } else {
                Err(ItemError::CurrencyMismatch(
                    currency.iso_alpha_code,
                    base_price.currency().iso_alpha_code,
                ))
            }
        })?;

        Ok(Self {
            product,
            base_price,
            quantity,
            customizations,
        })
    }

    /// Return the product this line refers to.
    #[must_use]
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Return the per-unit base price, before customizations.
    pub fn base_price(&self) -> &Money<'a, Currency> {
        &self.base_price
    }

    /// Return the quantity.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Return the customizations in selection order.
    #[must_use]
    pub fn customizations(&self) -> &[Customization<'a>] {
        &self.customizations
    }

    /// Set the quantity.
    ///
    /// Dropping to zero is a removal, which is the cart's responsibility;
    /// a line item itself never holds a zero quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::InvalidQuantity`] if `quantity` is zero.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), ItemError> {
        if quantity == 0 {
            return Err(ItemError::InvalidQuantity);
        }

        self.quantity = quantity;

        Ok(())
    }

    /// Increase the quantity, saturating at `u32::MAX`.
    pub(crate) fn add_quantity(&mut self, extra: u32) {
        self.quantity = self.quantity.saturating_add(extra);
    }

    /// Per-unit price in minor units, customizations included.
    #[must_use]
    pub fn unit_price_minor(&self) -> i64 {
        self.base_price.to_minor_units()
            + self
                .customizations
                .iter()
                .map(|customization| customization.price().to_minor_units())
                .sum::<i64>()
    }

    /// Calculate the line total: `(base price + customizations) * quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::InvalidQuantity`] if the quantity is below one.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, ItemError> {
        if self.quantity == 0 {
            return Err(ItemError::InvalidQuantity);
        }

        Ok(Money::from_minor(
            self.unit_price_minor() * i64::from(self.quantity),
            self.base_price.currency(),
        ))
    }

    /// Return whether `other` is the same line for merge purposes:
    /// same product and the same customization combination.
    #[must_use]
    pub fn matches_line(&self, other: &LineItem<'a>) -> bool {
        self.product == other.product && self.customizations == other.customizations
    }
}
