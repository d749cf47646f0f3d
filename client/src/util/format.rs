//! Display formatting for prices and areas.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Group an integer with `.` thousands separators (`1234567` → `1.234.567`).
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Format a price in cents as whole euros, e.g. `250.000 €`.
#[must_use]
pub fn format_price(price_cents: i64) -> String {
    let euros = price_cents.max(0).unsigned_abs() / 100;
    format!("{} €", group_thousands(euros))
}

/// Format a listing price with the `/month` suffix for rentals.
#[must_use]
pub fn format_listing_price(price_cents: i64, is_rent: bool) -> String {
    let price = format_price(price_cents);
    if is_rent { format!("{price}/month") } else { price }
}

/// Format an area rounded to whole square metres.
#[must_use]
pub fn format_area(area_m2: f64) -> String {
    if !area_m2.is_finite() || area_m2 <= 0.0 {
        return "-".to_owned();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = area_m2.round() as u64;
    format!("{} m²", group_thousands(whole))
}

/// Parse a euro amount typed by a user into cents.
#[must_use]
pub fn parse_euros_to_cents(raw: &str) -> Option<i64> {
    let cleaned: String = raw.trim().chars().filter(|c| !matches!(c, '.' | ' ' | '€')).collect();
    let euros = cleaned.parse::<i64>().ok()?;
    euros.checked_mul(100)
}
