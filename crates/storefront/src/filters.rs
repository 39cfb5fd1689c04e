//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;
use shoeworld_core::{Price, ShoeCategory};

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a decimal amount as a US dollar price, e.g. `$89.99`.
///
/// Usage in templates: `{{ shoe.price|usd }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn usd(amount: &Decimal, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(Price::usd(*amount).to_string())
}

/// Returns the emoji icon for a shoe category.
///
/// Usage in templates: `{{ shoe.category|category_icon }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn category_icon(
    category: &ShoeCategory,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(category.icon())
}
