//! Delivery
//!
//! Delivery fee policy: a flat fee that is waived once the cart subtotal
//! reaches a free-delivery threshold. Threshold and fee are configuration,
//! not constants, since they vary per restaurant and region.

use rusty_money::{Money, iso::Currency};

/// Delivery fee policy for a restaurant or region.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryPolicy<'a> {
    free_threshold: Money<'a, Currency>,
    standard_fee: Money<'a, Currency>,
}

impl<'a> DeliveryPolicy<'a> {
    /// Create a new delivery policy.
    #[must_use]
    pub fn new(free_threshold: Money<'a, Currency>, standard_fee: Money<'a, Currency>) -> Self {
        Self {
            free_threshold,
            standard_fee,
        }
    }

    /// Return the subtotal at which delivery becomes free.
    pub fn free_threshold(&self) -> &Money<'a, Currency> {
        &self.free_threshold
    }

    /// Return the fee charged below the free-delivery threshold.
    pub fn standard_fee(&self) -> &Money<'a, Currency> {
        &self.standard_fee
    }

    /// Calculate the delivery fee for a given subtotal.
    ///
    /// The threshold check uses the pre-discount subtotal; an applied promo
    /// never triggers or cancels free delivery.
    #[must_use]
    pub fn fee_for(&self, subtotal: &Money<'a, Currency>) -> Money<'a, Currency> {
        if subtotal.to_minor_units() >= self.free_threshold.to_minor_units() {
            Money::from_minor(0, self.standard_fee.currency())
        } else {
            self.standard_fee
        }
    }
}
