//! Checkout Demo
//!
//! Prices a fixture cart and prints the receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-p` to apply a promo code (case-insensitive)
//! Use `-n` to limit the number of cart lines

use std::io;

use anyhow::Result;
use clap::Parser;

use morsel::{fixtures::Fixture, receipt::Receipt, utils::CheckoutArgs};

/// Checkout Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = CheckoutArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let cart = fixture.cart(args.n)?;
    let policy = fixture.policy()?;
    let tax_rate = fixture.tax_rate()?;

    let subtotal = cart.subtotal()?;

    let promo = match args.promo.as_deref() {
        Some(code) => match fixture.catalog().apply(code, &subtotal) {
            Ok(promo) => Some(promo),
            Err(err) => {
                println!("{err}");
                None
            }
        },
        None => None,
    };

    let receipt = Receipt::from_checkout(&cart, &policy, tax_rate, promo)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle, &cart, fixture.product_meta_map())?;

    Ok(())
}
