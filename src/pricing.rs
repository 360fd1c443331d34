//! Pricing
//!
//! The order pricing calculator: derives a [`PriceBreakdown`] from a cart,
//! a delivery policy, a tax rate, and an optional applied promo. Pure
//! derivation with no hidden state; the view layer recomputes it on every
//! cart or promo change.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    delivery::DeliveryPolicy,
    discounts::{DiscountError, percent_of_minor},
    promotions::PromoCode,
};

/// Errors that can occur while computing a price breakdown.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Wrapped cart subtotal error.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapped discount or tax arithmetic error.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// The computed price breakdown for an order.
///
/// Always derived fresh from cart + promo + policy; never stored or
/// mutated directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown<'a> {
    /// Sum of all line totals.
    pub subtotal: Money<'a, Currency>,

    /// Delivery fee under the policy, computed from the pre-discount subtotal.
    pub delivery_fee: Money<'a, Currency>,

    /// Tax on the pre-discount subtotal.
    pub tax: Money<'a, Currency>,

    /// Discount granted by the applied promo, zero when absent or ineligible.
    pub discount: Money<'a, Currency>,

    /// `subtotal + delivery_fee + tax - discount`, floored at zero.
    pub total: Money<'a, Currency>,
}

/// Calculate the tax on a subtotal, rounded half-up to minor units.
///
/// Tax applies to the pre-discount subtotal; a promo never reduces the
/// taxable amount.
///
/// # Errors
///
/// Returns a [`DiscountError::PercentConversion`] if the rate multiplication
/// cannot be safely represented in minor units.
pub fn compute_tax<'a>(
    subtotal: &Money<'a, Currency>,
    tax_rate: Percentage,
) -> Result<Money<'a, Currency>, DiscountError> {
    let tax_minor = percent_of_minor(tax_rate, subtotal.to_minor_units())?;

    Ok(Money::from_minor(tax_minor, subtotal.currency()))
}

/// Combine the breakdown parts into the order total.
///
/// The discount is already capped at the subtotal, so the zero floor is an
/// invariant rather than an expected path; it guarantees the total never
/// goes negative for any non-negative inputs.
#[must_use]
pub fn compute_total<'a>(
    subtotal: &Money<'a, Currency>,
    delivery_fee: &Money<'a, Currency>,
    tax: &Money<'a, Currency>,
    discount: &Money<'a, Currency>,
) -> Money<'a, Currency> {
    let total = subtotal.to_minor_units() + delivery_fee.to_minor_units() + tax.to_minor_units()
        - discount.to_minor_units();

    Money::from_minor(total.max(0), subtotal.currency())
}

/// Compute the full price breakdown for an order.
///
/// The delivery threshold check and the tax both use the pre-discount
/// subtotal, so an applied promo neither triggers free delivery nor lowers
/// the taxed amount. A promo that is absent or no longer eligible (the cart
/// may have shrunk since it was applied) contributes a zero discount.
///
/// # Errors
///
/// Returns a [`PricingError`] if the cart subtotal or the percentage
/// arithmetic fails.
pub fn price_breakdown<'a>(
    cart: &Cart<'a>,
    policy: &DeliveryPolicy<'a>,
    tax_rate: Percentage,
    promo: Option<&PromoCode<'a>>,
) -> Result<PriceBreakdown<'a>, PricingError> {
    let subtotal = cart.subtotal()?;
    let delivery_fee = policy.fee_for(&subtotal);
    let tax = compute_tax(&subtotal, tax_rate)?;

    let discount = match promo {
        Some(promo) => promo.discount_for(&subtotal)?,
        None => Money::from_minor(0, cart.currency()),
    };

    let total = compute_total(&subtotal, &delivery_fee, &tax, &discount);

    Ok(PriceBreakdown {
        subtotal,
        delivery_fee,
        tax,
        discount,
        total,
    })
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        discounts::PromoDiscount,
        items::{Customization, LineItem},
        products::ProductKey,
    };

    use super::*;

    // 8.875% NY tax, exact.
    fn ny_tax() -> Percentage {
        Percentage::from(Decimal::new(8875, 5))
    }

    fn policy<'a>() -> DeliveryPolicy<'a> {
        DeliveryPolicy::new(Money::from_minor(2500, USD), Money::from_minor(499, USD))
    }

    fn pizza_cart<'a>() -> TestResult<Cart<'a>> {
        let item = LineItem::with_customizations(
            ProductKey::default(),
            Money::from_minor(1899, USD),
            2,
            smallvec![Customization::new(
                "Extra Cheese",
                Money::from_minor(250, USD)
            )],
        )?;

        Ok(Cart::with_items([item], USD)?)
    }

    #[test]
    fn breakdown_for_pizza_cart_without_promo() -> TestResult {
        // subtotal = (18.99 + 2.50) * 2 = 42.98; free delivery (>= 25);
        // tax = 42.98 * 0.08875 = 3.8145 -> 3.81; total = 46.79
        let cart = pizza_cart()?;

        let breakdown = price_breakdown(&cart, &policy(), ny_tax(), None)?;

        assert_eq!(breakdown.subtotal, Money::from_minor(4298, USD));
        assert_eq!(breakdown.delivery_fee, Money::from_minor(0, USD));
        assert_eq!(breakdown.tax, Money::from_minor(381, USD));
        assert_eq!(breakdown.discount, Money::from_minor(0, USD));
        assert_eq!(breakdown.total, Money::from_minor(4679, USD));

        Ok(())
    }

    #[test]
    fn empty_cart_still_pays_the_delivery_fee() -> TestResult {
        let cart = Cart::new(USD);

        let breakdown = price_breakdown(&cart, &policy(), ny_tax(), None)?;

        assert_eq!(breakdown.subtotal, Money::from_minor(0, USD));
        assert_eq!(breakdown.delivery_fee, Money::from_minor(499, USD));
        assert_eq!(breakdown.tax, Money::from_minor(0, USD));
        assert_eq!(breakdown.discount, Money::from_minor(0, USD));
        assert_eq!(breakdown.total, Money::from_minor(499, USD));

        Ok(())
    }

    #[test]
    fn tax_rounds_half_up() -> TestResult {
        // 10.00 * 0.08875 = 0.8875 -> 0.89
        let tax = compute_tax(&Money::from_minor(1000, USD), ny_tax())?;

        assert_eq!(tax, Money::from_minor(89, USD));

        Ok(())
    }

    #[test]
    fn tax_on_zero_subtotal_is_zero() -> TestResult {
        let tax = compute_tax(&Money::from_minor(0, USD), ny_tax())?;

        assert_eq!(tax, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn ineligible_promo_contributes_zero_discount() -> TestResult {
        let cart = pizza_cart()?;

        let promo = PromoCode::new(
            "SAVE10",
            "$10 off orders over $50",
            PromoDiscount::AmountOff(Money::from_minor(1000, USD)),
            Money::from_minor(5000, USD),
        );

        let breakdown = price_breakdown(&cart, &policy(), ny_tax(), Some(&promo))?;

        assert_eq!(breakdown.discount, Money::from_minor(0, USD));
        assert_eq!(breakdown.total, Money::from_minor(4679, USD));

        Ok(())
    }

    #[test]
    fn discount_does_not_change_delivery_fee_or_tax() -> TestResult {
        let cart = pizza_cart()?;

        let promo = PromoCode::new(
            "WELCOME20",
            "20% off your first order",
            PromoDiscount::PercentageOff(Percentage::from(0.20)),
            Money::from_minor(2500, USD),
        );

        let plain = price_breakdown(&cart, &policy(), ny_tax(), None)?;
        let discounted = price_breakdown(&cart, &policy(), ny_tax(), Some(&promo))?;

        assert_eq!(discounted.delivery_fee, plain.delivery_fee);
        assert_eq!(discounted.tax, plain.tax);
        // 20% of 42.98 = 8.596 -> 8.60
        assert_eq!(discounted.discount, Money::from_minor(860, USD));
        assert_eq!(discounted.total, Money::from_minor(3819, USD));

        Ok(())
    }

    #[test]
    fn eligible_percentage_promo_discounts_the_subtotal() -> TestResult {
        // subtotal = 60.00; 20% off = 12.00; tax = 60.00 * 0.08875 = 5.325
        // -> 5.33 (half-up); total = 60.00 + 5.33 - 12.00 = 53.33
        let item = LineItem::new(ProductKey::default(), Money::from_minor(3000, USD), 2)?;
        let cart = Cart::with_items([item], USD)?;

        let promo = PromoCode::new(
            "WELCOME20",
            "20% off your first order",
            PromoDiscount::PercentageOff(Percentage::from(0.20)),
            Money::from_minor(2500, USD),
        );

        let breakdown = price_breakdown(&cart, &policy(), ny_tax(), Some(&promo))?;

        assert_eq!(breakdown.subtotal, Money::from_minor(6000, USD));
        assert_eq!(breakdown.delivery_fee, Money::from_minor(0, USD));
        assert_eq!(breakdown.tax, Money::from_minor(533, USD));
        assert_eq!(breakdown.discount, Money::from_minor(1200, USD));
        assert_eq!(breakdown.total, Money::from_minor(5333, USD));

        Ok(())
    }

    #[test]
    fn breakdown_is_deterministic_for_identical_inputs() -> TestResult {
        let cart = pizza_cart()?;

        let first = price_breakdown(&cart, &policy(), ny_tax(), None)?;
        let second = price_breakdown(&cart, &policy(), ny_tax(), None)?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn compute_total_never_goes_negative() {
        let zero = Money::from_minor(0, USD);
        let oversized_discount = Money::from_minor(9999, USD);

        let total = compute_total(
            &Money::from_minor(500, USD),
            &zero,
            &zero,
            &oversized_discount,
        );

        assert_eq!(total, Money::from_minor(0, USD));
    }
}
