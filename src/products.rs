//! Products
//!
//! Menu-level product metadata. Pricing reads the price snapshot captured on
//! each [`crate::items::LineItem`]; the [`Product`] record exists for display
//! (receipts, fixtures) and for keying line items back to the menu.

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// A menu product.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product name as shown on the menu and receipt
    pub name: String,

    /// Current menu price
    pub price: Money<'a, Currency>,
}

impl<'a> Product<'a> {
    /// Create a new product.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}
