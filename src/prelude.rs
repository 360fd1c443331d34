//! Morsel prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    delivery::DeliveryPolicy,
    discounts::{DiscountError, PromoDiscount, discount_amount},
    fixtures::{Fixture, FixtureError},
    items::{Customization, ItemError, LineItem},
    pricing::{PriceBreakdown, PricingError, compute_tax, compute_total, price_breakdown},
    products::{Product, ProductKey},
    promotions::{PromoCatalog, PromoCode, PromoError},
    receipt::{Receipt, ReceiptError},
};
