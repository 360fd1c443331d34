//! Discounts
//!
//! Discount arithmetic for promo codes: a percentage off the subtotal or a
//! fixed amount off, capped so the discount never exceeds the subtotal.
//! Discounts apply against the subtotal only, never against fees or tax.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// A fixed discount amount is in a different currency than the subtotal.
    #[error("discount has currency {0}, but subtotal has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The discount a promo code grants once eligible.
#[derive(Debug, Clone, Copy)]
pub enum PromoDiscount<'a> {
    /// A fraction of the subtotal, e.g. `0.20` for 20% off.
    ///
    /// Catalog construction keeps the ratio at or below `1.0`, so the
    /// resulting discount never exceeds the subtotal.
    PercentageOff(Percentage),

    /// A fixed amount off the subtotal, e.g. $10 off.
    AmountOff(Money<'a, Currency>),
}

/// Calculate the discount amount a promo grants on a subtotal.
///
/// Percentage discounts are exact (`subtotal * ratio`, rounded half-up to
/// minor units). Fixed discounts are capped at the subtotal, so an $10 promo
/// on an $8 order discounts $8.
///
/// # Errors
///
/// Returns a [`DiscountError`] if:
/// - a percentage calculation cannot be safely represented in minor units
///   ([`DiscountError::PercentConversion`]).
/// - a fixed amount is in a different currency than the subtotal
///   ([`DiscountError::CurrencyMismatch`]).
pub fn discount_amount<'a>(
    discount: &PromoDiscount<'a>,
    subtotal: &Money<'a, Currency>,
) -> Result<Money<'a, Currency>, DiscountError> {
    match discount {
        PromoDiscount::PercentageOff(percent) => {
            let discount_minor = percent_of_minor(*percent, subtotal.to_minor_units())?;

            Ok(Money::from_minor(discount_minor, subtotal.currency()))
        }
        PromoDiscount::AmountOff(amount) => {
            if amount.currency() != subtotal.currency() {
                return Err(DiscountError::CurrencyMismatch(
                    amount.currency().iso_alpha_code,
                    subtotal.currency().iso_alpha_code,
                ));
            }

            let capped = amount.to_minor_units().min(subtotal.to_minor_units());

            Ok(Money::from_minor(capped, subtotal.currency()))
        }
    }
}

/// Calculate a percentage of a minor unit amount, rounded half-up.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the multiplication
/// overflows the decimal range or the result does not fit in an `i64`.
pub fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, DiscountError> {
    let ratio = percent * Decimal::ONE;

    let Some(minor) = Decimal::from_i64(minor) else {
        unreachable!("always returns `Some` for every `i64`")
    };

    let Some(applied) = ratio.checked_mul(minor) else {
        return Err(DiscountError::PercentConversion);
    };

    let rounded = applied.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let Some(rounded) = rounded.to_i64() else {
        return Err(DiscountError::PercentConversion);
    };

    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percentage_discount_is_exact() -> TestResult {
        let discount = PromoDiscount::PercentageOff(Percentage::from(0.20));
        let subtotal = Money::from_minor(6000, USD);

        assert_eq!(
            discount_amount(&discount, &subtotal)?,
            Money::from_minor(1200, USD)
        );

        Ok(())
    }

    #[test]
    fn percentage_discount_rounds_half_up() -> TestResult {
        // 20% of $0.33 = 6.6 cents -> 7 cents
        let discount = PromoDiscount::PercentageOff(Percentage::from(0.20));
        let subtotal = Money::from_minor(33, USD);

        assert_eq!(
            discount_amount(&discount, &subtotal)?,
            Money::from_minor(7, USD)
        );

        Ok(())
    }

    #[test]
    fn fixed_discount_below_subtotal_applies_in_full() -> TestResult {
        let discount = PromoDiscount::AmountOff(Money::from_minor(1000, USD));
        let subtotal = Money::from_minor(6000, USD);

        assert_eq!(
            discount_amount(&discount, &subtotal)?,
            Money::from_minor(1000, USD)
        );

        Ok(())
    }

    #[test]
    fn fixed_discount_is_capped_at_the_subtotal() -> TestResult {
        // $10 promo on an $8 order discounts $8, not $10.
        let discount = PromoDiscount::AmountOff(Money::from_minor(1000, USD));
        let subtotal = Money::from_minor(800, USD);

        assert_eq!(
            discount_amount(&discount, &subtotal)?,
            Money::from_minor(800, USD)
        );

        Ok(())
    }

    #[test]
    fn fixed_discount_on_zero_subtotal_is_zero() -> TestResult {
        let discount = PromoDiscount::AmountOff(Money::from_minor(1000, USD));
        let subtotal = Money::from_minor(0, USD);

        assert_eq!(
            discount_amount(&discount, &subtotal)?,
            Money::from_minor(0, USD)
        );

        Ok(())
    }

    #[test]
    fn fixed_discount_currency_mismatch_errors() {
        let discount = PromoDiscount::AmountOff(Money::from_minor(1000, GBP));
        let subtotal = Money::from_minor(6000, USD);

        assert!(matches!(
            discount_amount(&discount, &subtotal),
            Err(DiscountError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let result = percent_of_minor(Percentage::from(1e20), i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));
    }

    #[test]
    fn percent_of_minor_rounds_midpoints_away_from_zero() -> TestResult {
        // 50% of 3 cents = 1.5 -> 2
        assert_eq!(percent_of_minor(Percentage::from(0.5), 3)?, 2);

        Ok(())
    }
}
