//! Promotion Fixtures

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    discounts::PromoDiscount,
    fixtures::{FixtureError, menu::parse_price},
    promotions::PromoCode,
};

/// Wrapper for the promo catalog in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Promo codes in catalog order
    pub promos: Vec<PromoFixture>,
}

/// Promo code fixture from YAML
#[derive(Debug, Deserialize)]
pub struct PromoFixture {
    /// Canonical code (e.g., "WELCOME20")
    pub code: String,

    /// Human-readable description
    pub description: String,

    /// Minimum order subtotal string (e.g., "25.00 USD")
    pub min_subtotal: String,

    /// Discount configuration
    pub discount: PromoDiscountFixtureConfig,
}

/// Promo discount configuration from YAML fixtures
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromoDiscountFixtureConfig {
    /// Percentage discount (ratio between 0.0 and 1.0)
    Percentage {
        /// Discount ratio as decimal (e.g., 0.20 for 20%)
        value: f64,
    },

    /// Fixed amount off (e.g., "10.00 USD")
    AmountOff {
        /// Discount amount string (e.g., "10.00 USD")
        value: String,
    },
}

impl TryFrom<PromoDiscountFixtureConfig> for PromoDiscount<'_> {
    type Error = FixtureError;

    fn try_from(config: PromoDiscountFixtureConfig) -> Result<Self, Self::Error> {
        match config {
            PromoDiscountFixtureConfig::Percentage { value } => {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(FixtureError::InvalidPercentage(value));
                }

                Ok(PromoDiscount::PercentageOff(Percentage::from(value)))
            }
            PromoDiscountFixtureConfig::AmountOff { value } => {
                let (minor_units, currency) = parse_price(&value)?;

                Ok(PromoDiscount::AmountOff(Money::from_minor(
                    minor_units,
                    currency,
                )))
            }
        }
    }
}

impl PromoFixture {
    /// Convert to a [`PromoCode`] with the already-parsed minimum subtotal.
    ///
    /// # Errors
    ///
    /// Returns an error if the discount configuration is invalid.
    pub fn try_into_promo(
        self,
        min_minor: i64,
        currency: &'static Currency,
    ) -> Result<PromoCode<'static>, FixtureError> {
        let discount = PromoDiscount::try_from(self.discount)?;

        Ok(PromoCode::new(
            self.code,
            self.description,
            discount,
            Money::from_minor(min_minor, currency),
        ))
    }
}
