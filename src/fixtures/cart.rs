//! Cart Fixtures

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    fixtures::{FixtureError, menu::parse_price},
    items::{Customization, LineItem},
    products::ProductKey,
};

/// Wrapper for cart lines in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines in display order
    pub lines: Vec<LineFixture>,
}

/// Cart line fixture from YAML
#[derive(Debug, Deserialize)]
pub struct LineFixture {
    /// Product key the line refers to
    pub product: String,

    /// Quantity ordered
    pub quantity: u32,

    /// Customizations in selection order
    #[serde(default)]
    pub customizations: Vec<CustomizationFixture>,
}

/// Customization fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CustomizationFixture {
    /// Customization label
    pub label: String,

    /// Per-unit price string (e.g., "2.50 USD"); free customizations use "0.00 USD"
    pub price: String,
}

impl LineFixture {
    /// Convert to a [`LineItem`] with the resolved product key and its
    /// current menu price.
    ///
    /// # Errors
    ///
    /// Returns an error if a customization price cannot be parsed or the
    /// line is invalid (zero quantity, mixed currencies).
    pub fn try_into_line<'a>(
        self,
        product_key: ProductKey,
        base_price: Money<'a, Currency>,
    ) -> Result<LineItem<'a>, FixtureError> {
        let mut customizations: SmallVec<[Customization<'a>; 4]> =
            SmallVec::with_capacity(self.customizations.len());

        for customization in self.customizations {
            let (minor_units, currency) = parse_price(&customization.price)?;

            customizations.push(Customization::new(
                customization.label,
                Money::from_minor(minor_units, currency),
            ));
        }

        Ok(LineItem::with_customizations(
            product_key,
            base_price,
            self.quantity,
            customizations,
        )?)
    }
}
