//! Morsel
//!
//! Morsel is a pricing and checkout calculation engine for a food-ordering platform:
//! carts, promo codes, delivery fees, taxes and receipts, computed deterministically
//! in fixed-point minor units.

pub mod cart;
pub mod delivery;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod receipt;
pub mod utils;
