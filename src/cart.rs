//! Cart
//!
//! An ordered collection of [`LineItem`]s in a single currency. Insertion
//! order is display order. Adding a line that matches an existing one (same
//! product, same customization combination) merges quantities instead of
//! creating a duplicate entry.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::{ItemError, LineItem};

/// Errors related to cart construction or totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// An item's currency differs from the cart currency (index, item currency, cart currency).
    #[error("item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// An item was not found in the cart.
    #[error("item {0} not found")]
    ItemNotFound(usize),

    /// Wrapped line item error.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    items: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::CurrencyMismatch`] if any item is priced in a
    /// different currency than the cart.
    pub fn with_items(
        items: impl Into<Vec<LineItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        items.iter().enumerate().try_for_each(|(i, item)| {
            let item_currency = item.base_price().currency();

            if item_currency == currency {
                Ok(())
            } else {
                Err(CartError::CurrencyMismatch(
                    i,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Cart { items, currency })
    }

    /// Add a line item to the cart.
    ///
    /// If the cart already has a line for the same product with the same
    /// customization combination, the quantities are merged; otherwise the
    /// line is appended.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::CurrencyMismatch`] if the item is priced in a
    /// different currency than the cart.
    pub fn add(&mut self, item: LineItem<'a>) -> Result<(), CartError> {
        let item_currency = item.base_price().currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                self.items.len(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|existing| existing.matches_line(&item))
        {
            existing.add_quantity(item.quantity());
        } else {
            self.items.push(item);
        }

        Ok(())
    }

    /// Set the quantity of the line at `index`.
    ///
    /// Setting a quantity of zero removes the line entirely; a zero-quantity
    /// entry is never retained.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::ItemNotFound`] if `index` is out of range.
    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        if index >= self.items.len() {
            return Err(CartError::ItemNotFound(index));
        }

        if quantity == 0 {
            self.items.remove(index);
            return Ok(());
        }

        let item = self
            .items
            .get_mut(index)
            .ok_or(CartError::ItemNotFound(index))?;

        item.set_quantity(quantity)?;

        Ok(())
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::ItemNotFound`] if `index` is out of range.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem<'a>, CartError> {
        if index >= self.items.len() {
            return Err(CartError::ItemNotFound(index));
        }

        Ok(self.items.remove(index))
    }

    /// Get an item from the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError::ItemNotFound`] if the item is not found.
    pub fn get_item(&self, index: usize) -> Result<&LineItem<'a>, CartError> {
        self.items.get(index).ok_or(CartError::ItemNotFound(index))
    }

    /// Iterate over the items in the cart in display order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// Get the number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Calculate the subtotal of the cart: the sum of all line totals.
    ///
    /// An empty cart has a zero subtotal, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a line total or the money addition fails.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        self.items
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, item| {
                Ok(acc.add(item.line_total()?)?)
            })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{items::Customization, products::ProductKey};

    use super::*;

    fn pizza<'a>(key: ProductKey, quantity: u32) -> Result<LineItem<'a>, ItemError> {
        LineItem::with_customizations(
            key,
            Money::from_minor(1899, USD),
            quantity,
            smallvec![Customization::new(
                "Extra Cheese",
                Money::from_minor(250, USD)
            )],
        )
    }

    fn brownie<'a>(key: ProductKey) -> Result<LineItem<'a>, ItemError> {
        LineItem::new(key, Money::from_minor(699, USD), 1)
    }

    #[test]
    fn with_items_currency_mismatch_errors() -> TestResult {
        let items = [
            LineItem::new(ProductKey::default(), Money::from_minor(100, USD), 1)?,
            LineItem::new(ProductKey::default(), Money::from_minor(100, GBP), 1)?,
        ];

        let result = Cart::with_items(items, USD);

        match result {
            Err(CartError::CurrencyMismatch(idx, item_currency, cart_currency)) => {
                assert_eq!(idx, 1);
                assert_eq!(item_currency, GBP.iso_alpha_code);
                assert_eq!(cart_currency, USD.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn add_merges_matching_lines() -> TestResult {
        let key = ProductKey::default();
        let mut cart = Cart::new(USD);

        cart.add(pizza(key, 1)?)?;
        cart.add(pizza(key, 2)?)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get_item(0)?.quantity(), 3);

        Ok(())
    }

    #[test]
    fn add_keeps_distinct_customization_combinations_separate() -> TestResult {
        let key = ProductKey::default();
        let mut cart = Cart::new(USD);

        cart.add(pizza(key, 1)?)?;
        cart.add(LineItem::new(key, Money::from_minor(1899, USD), 1)?)?;

        assert_eq!(cart.len(), 2);

        Ok(())
    }

    #[test]
    fn add_rejects_foreign_currency() -> TestResult {
        let mut cart = Cart::new(USD);

        let result = cart.add(LineItem::new(
            ProductKey::default(),
            Money::from_minor(100, GBP),
            1,
        )?);

        assert!(matches!(result, Err(CartError::CurrencyMismatch(0, _, _))));

        Ok(())
    }

    #[test]
    fn set_quantity_to_zero_removes_the_line() -> TestResult {
        let key = ProductKey::default();
        let mut cart = Cart::with_items([pizza(key, 2)?, brownie(key)?], USD)?;

        cart.set_quantity(0, 0)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get_item(0)?.base_price(), &Money::from_minor(699, USD));

        Ok(())
    }

    #[test]
    fn set_quantity_updates_in_place() -> TestResult {
        let key = ProductKey::default();
        let mut cart = Cart::with_items([pizza(key, 2)?], USD)?;

        cart.set_quantity(0, 5)?;

        assert_eq!(cart.get_item(0)?.quantity(), 5);

        Ok(())
    }

    #[test]
    fn set_quantity_out_of_range_errors() {
        let mut cart = Cart::new(USD);

        assert!(matches!(
            cart.set_quantity(3, 1),
            Err(CartError::ItemNotFound(3))
        ));
    }

    #[test]
    fn remove_item_returns_the_removed_line() -> TestResult {
        let key = ProductKey::default();
        let mut cart = Cart::with_items([pizza(key, 2)?, brownie(key)?], USD)?;

        let removed = cart.remove_item(1)?;

        assert_eq!(removed.base_price(), &Money::from_minor(699, USD));
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn subtotal_sums_line_totals() -> TestResult {
        let key = ProductKey::default();
        let cart = Cart::with_items([pizza(key, 2)?, brownie(key)?], USD)?;

        // (18.99 + 2.50) * 2 + 6.99 = 49.97
        assert_eq!(cart.subtotal()?, Money::from_minor(4997, USD));

        Ok(())
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() -> TestResult {
        let cart = Cart::new(USD);

        assert_eq!(cart.subtotal()?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn iter_preserves_insertion_order() -> TestResult {
        let key = ProductKey::default();
        let cart = Cart::with_items([pizza(key, 2)?, brownie(key)?], USD)?;

        let bases: Vec<i64> = cart
            .iter()
            .map(|item| item.base_price().to_minor_units())
            .collect();

        assert_eq!(bases, vec![1899, 699]);

        Ok(())
    }
}
