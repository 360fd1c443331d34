//! Menu Fixtures

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, products::Product};

/// Wrapper for menu products in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Menu product fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Price string (e.g., "18.99 USD")
    pub price: String,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product::new(
            fixture.name,
            Money::from_minor(minor_units, currency),
        ))
    }
}

/// Parse a price string like "18.99 USD" into minor units and a currency.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the string is not
/// `<amount> <code>` or the amount does not land on a whole minor unit, and
/// [`FixtureError::UnknownCurrency`] if the code is not an ISO currency.
pub fn parse_price(value: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = value.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(value.to_string()));
    };

    let currency =
        iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    let Ok(amount) = Decimal::from_str(amount) else {
        return Err(FixtureError::InvalidPrice(value.to_string()));
    };

    let scale = Decimal::from(10i64.pow(currency.exponent));

    let Some(minor) = amount.checked_mul(scale) else {
        return Err(FixtureError::InvalidPrice(value.to_string()));
    };

    if minor.fract() != Decimal::ZERO {
        return Err(FixtureError::InvalidPrice(value.to_string()));
    }

    minor
        .to_i64()
        .map(|minor| (minor, currency))
        .ok_or_else(|| FixtureError::InvalidPrice(value.to_string()))
}
