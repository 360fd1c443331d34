//! Checkout Fixtures
//!
//! The per-restaurant checkout policy: free-delivery threshold, standard
//! delivery fee, and tax rate.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    delivery::DeliveryPolicy,
    fixtures::{FixtureError, menu::parse_price},
};

/// Checkout policy fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CheckoutFixture {
    /// Subtotal at which delivery becomes free (e.g., "25.00 USD")
    pub free_delivery_threshold: String,

    /// Fee charged below the threshold (e.g., "4.99 USD")
    pub delivery_fee: String,

    /// Tax rate as a ratio (e.g., 0.08875 for 8.875%)
    pub tax_rate: f64,
}

impl CheckoutFixture {
    /// Convert to a [`DeliveryPolicy`] and tax rate.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be parsed, the threshold and fee
    /// use different currencies, or the tax rate is out of range.
    pub fn try_into_policy(
        self,
    ) -> Result<(DeliveryPolicy<'static>, Percentage, &'static Currency), FixtureError> {
        let (threshold_minor, currency) = parse_price(&self.free_delivery_threshold)?;
        let (fee_minor, fee_currency) = parse_price(&self.delivery_fee)?;

        if fee_currency != currency {
            return Err(FixtureError::CurrencyMismatch(
                currency.iso_alpha_code.to_string(),
                fee_currency.iso_alpha_code.to_string(),
            ));
        }

        if !self.tax_rate.is_finite() || !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(FixtureError::InvalidPercentage(self.tax_rate));
        }

        let policy = DeliveryPolicy::new(
            Money::from_minor(threshold_minor, currency),
            Money::from_minor(fee_minor, currency),
        );

        Ok((policy, Percentage::from(self.tax_rate), currency))
    }
}
