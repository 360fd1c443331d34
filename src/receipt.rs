//! Receipt
//!
//! Order summary rendering: an itemized table of the cart followed by the
//! subtotal/delivery/tax/discount/total block the checkout sidebar shows.

use std::io;

use decimal_percentage::Percentage;
use rusty_money::{Money, MoneyError, iso::Currency};
use slotmap::SlotMap;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::Cart,
    delivery::DeliveryPolicy,
    items::ItemError,
    pricing::{PriceBreakdown, PricingError, price_breakdown},
    products::{Product, ProductKey},
    promotions::PromoCode,
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A cart line refers to a product missing from the product catalog.
    #[error("missing product")]
    MissingProduct(ProductKey),

    /// Wrapped line item error.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Wrapped money error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Wrapped pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error writing the receipt.
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// Final receipt for a checked-out cart.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    breakdown: PriceBreakdown<'a>,
    promo: Option<PromoCode<'a>>,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Create a receipt from an already-computed breakdown.
    #[must_use]
    pub fn new(
        breakdown: PriceBreakdown<'a>,
        promo: Option<PromoCode<'a>>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            breakdown,
            promo,
            currency,
        }
    }

    /// Price a cart and build its receipt in one step.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the price breakdown cannot be computed.
    pub fn from_checkout(
        cart: &Cart<'a>,
        policy: &DeliveryPolicy<'a>,
        tax_rate: Percentage,
        promo: Option<&PromoCode<'a>>,
    ) -> Result<Self, ReceiptError> {
        let breakdown = price_breakdown(cart, policy, tax_rate, promo)?;

        Ok(Self::new(breakdown, promo.cloned(), cart.currency()))
    }

    /// Return the computed price breakdown.
    pub fn breakdown(&self) -> &PriceBreakdown<'a> {
        &self.breakdown
    }

    /// Return the applied promo, if any.
    pub fn promo(&self) -> Option<&PromoCode<'a>> {
        self.promo.as_ref()
    }

    /// Total cost of all lines before fees, tax and discount.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.breakdown.subtotal
    }

    /// Total amount to pay.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.breakdown.total
    }

    /// Amount saved by the applied promo.
    #[must_use]
    pub fn savings(&self) -> Money<'a, Currency> {
        self.breakdown.discount
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Write the itemized receipt and summary block.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a cart line refers to an unknown
    /// product, a line total fails, or writing fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        cart: &Cart<'a>,
        product_meta: &SlotMap<ProductKey, Product<'_>>,
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Qty", "Item", "Price"]);

        for item in cart.iter() {
            let product = product_meta
                .get(item.product())
                .ok_or(ReceiptError::MissingProduct(item.product()))?;

            builder.push_record([
                item.quantity().to_string(),
                product.name.clone(),
                item.line_total()?.to_string(),
            ]);

            for customization in item.customizations() {
                builder.push_record([
                    String::new(),
                    format!("  + {}", customization.label()),
                    customization.price().to_string(),
                ]);
            }
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.modify(Columns::last(), Alignment::right());

        writeln!(out, "{table}")?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        writeln!(out, "Subtotal:     {}", self.breakdown.subtotal)?;

        if self.breakdown.delivery_fee.is_zero() {
            writeln!(out, "Delivery Fee: FREE")?;
        } else {
            writeln!(out, "Delivery Fee: {}", self.breakdown.delivery_fee)?;
        }

        writeln!(out, "Taxes & Fees: {}", self.breakdown.tax)?;

        if let Some(promo) = &self.promo {
            writeln!(
                out,
                "Discount ({}): -{}",
                promo.code(),
                self.breakdown.discount
            )?;
        }

        writeln!(out, "Total:        {}", self.breakdown.total)?;

        Ok(())
    }
}
