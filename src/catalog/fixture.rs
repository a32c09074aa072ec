//! Catalog Fixtures

use rust_decimal::Decimal;
use rusty_money::iso::{Currency, USD};
use serde::Deserialize;

use crate::{
    catalog::{CatalogError, check_price},
    products::{Product, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products, in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product price (e.g., "1200.00 USD")
    pub price: String,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (amount, currency) = parse_price(&fixture.price)?;

        if currency != USD {
            return Err(CatalogError::UnsupportedCurrency(
                currency.iso_alpha_code.to_string(),
            ));
        }

        check_price(fixture.id, amount)?;

        Ok(Product {
            id: fixture.id,
            name: fixture.name,
            price: amount,
        })
    }
}

/// Parse price string (e.g., "45.00 USD") into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), CatalogError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    let currency = rusty_money::iso::find(code)
        .ok_or_else(|| CatalogError::UnknownCurrency(code.to_string()))?;

    Ok((amount, currency))
}
