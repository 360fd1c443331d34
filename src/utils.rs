//! Utils

use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct CheckoutArgs {
    /// Fixture set to use for the menu, cart & promotions
    #[clap(short, long, default_value = "demo")]
    pub fixture: String,

    /// Promo code to apply at checkout
    #[clap(short, long)]
    pub promo: Option<String>,

    /// Number of cart lines to include
    #[clap(short, long)]
    pub n: Option<usize>,
}
