//! Promotions
//!
//! Promo codes and the catalog they are redeemed against. Lookup is
//! case-insensitive, but a code is always stored and displayed in its
//! canonical catalog casing. At most one promo applies to an order; codes
//! never stack.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::discounts::{DiscountError, PromoDiscount, discount_amount};

/// Errors surfaced when redeeming a promo code.
#[derive(Debug, Error)]
pub enum PromoError<'a> {
    /// The submitted code does not match any catalog entry.
    #[error("invalid promo code: {0}")]
    NotFound(String),

    /// The code exists but the subtotal is below its minimum order.
    ///
    /// Carries the shortfall so the caller can render "add $X more to use
    /// this code".
    #[error("promo code {code} requires a minimum order of {minimum}; add {shortfall} more")]
    NotEligible {
        /// Canonical code of the promo.
        code: String,

        /// Minimum order subtotal the promo requires.
        minimum: Money<'a, Currency>,

        /// Amount the subtotal falls short of the minimum.
        shortfall: Money<'a, Currency>,
    },
}

/// A promo code with its eligibility and discount rules.
#[derive(Debug, Clone)]
pub struct PromoCode<'a> {
    code: String,
    description: String,
    discount: PromoDiscount<'a>,
    min_subtotal: Money<'a, Currency>,
}

impl<'a> PromoCode<'a> {
    /// Create a new promo code.
    ///
    /// `code` is the canonical casing shown to users; lookup against the
    /// catalog ignores case.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        discount: PromoDiscount<'a>,
        min_subtotal: Money<'a, Currency>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            discount,
            min_subtotal,
        }
    }

    /// Return the canonical code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Return the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Return the discount this code grants.
    pub fn discount(&self) -> &PromoDiscount<'a> {
        &self.discount
    }

    /// Return the minimum order subtotal this code requires.
    pub fn min_subtotal(&self) -> &Money<'a, Currency> {
        &self.min_subtotal
    }

    /// Return whether the given subtotal meets this code's minimum order.
    #[must_use]
    pub fn is_eligible(&self, subtotal: &Money<'a, Currency>) -> bool {
        subtotal.to_minor_units() >= self.min_subtotal.to_minor_units()
    }

    /// Return how far the subtotal falls short of the minimum order.
    #[must_use]
    pub fn shortfall_for(&self, subtotal: &Money<'a, Currency>) -> Money<'a, Currency> {
        let shortfall = (self.min_subtotal.to_minor_units() - subtotal.to_minor_units()).max(0);

        Money::from_minor(shortfall, self.min_subtotal.currency())
    }

    /// Calculate the discount this code grants on a subtotal.
    ///
    /// An ineligible subtotal discounts nothing rather than erroring; the
    /// hard failure belongs to [`PromoCatalog::apply`], where the user
    /// submits the code.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discount arithmetic fails.
    pub fn discount_for(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        if !self.is_eligible(subtotal) {
            return Ok(Money::from_minor(0, subtotal.currency()));
        }

        discount_amount(&self.discount, subtotal)
    }
}

/// The catalog of promo codes available to an order.
#[derive(Debug, Clone, Default)]
pub struct PromoCatalog<'a> {
    promos: Vec<PromoCode<'a>>,
}

impl<'a> PromoCatalog<'a> {
    /// Create a new catalog from the given codes.
    #[must_use]
    pub fn new(promos: impl Into<Vec<PromoCode<'a>>>) -> Self {
        Self {
            promos: promos.into(),
        }
    }

    /// Look up a code, ignoring ASCII case.
    ///
    /// The returned entry carries the canonical catalog casing.
    #[must_use]
    pub fn lookup(&self, code: &str) -> Option<&PromoCode<'a>> {
        self.promos
            .iter()
            .find(|promo| promo.code.eq_ignore_ascii_case(code))
    }

    /// Redeem a submitted code against a subtotal.
    ///
    /// # Errors
    ///
    /// - [`PromoError::NotFound`] if the code matches no catalog entry.
    /// - [`PromoError::NotEligible`] if the subtotal is below the code's
    ///   minimum order, carrying the shortfall amount.
    pub fn apply(
        &self,
        candidate: &str,
        subtotal: &Money<'a, Currency>,
    ) -> Result<&PromoCode<'a>, PromoError<'a>> {
        let promo = self
            .lookup(candidate)
            .ok_or_else(|| PromoError::NotFound(candidate.to_string()))?;

        if !promo.is_eligible(subtotal) {
            return Err(PromoError::NotEligible {
                code: promo.code.clone(),
                minimum: promo.min_subtotal,
                shortfall: promo.shortfall_for(subtotal),
            });
        }

        Ok(promo)
    }

    /// Iterate over the catalog in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &PromoCode<'a>> {
        self.promos.iter()
    }

    /// Get the number of codes in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.promos.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.promos.is_empty()
    }
}
