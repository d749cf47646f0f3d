//! Rent-index estimate.
//!
//! Estimated monthly rent is `area_m2 × rate(location)`. Rates are a fixed
//! reference table in €/m² per month; unknown locations use the default.

#[cfg(test)]
#[path = "rent_test.rs"]
mod rent_test;

/// Fallback rate for locations without an entry.
pub const DEFAULT_RATE_EUR_M2: f64 = 11.0;

/// Reference rates in €/m² per month, keyed by lowercase location name.
pub const RATE_TABLE: &[(&str, f64)] = &[
    ("madrid", 17.5),
    ("barcelona", 18.2),
    ("valencia", 12.4),
    ("sevilla", 11.1),
    ("málaga", 13.6),
    ("bilbao", 14.3),
    ("zaragoza", 9.8),
    ("alicante", 10.7),
    ("palma", 15.2),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RentEstimate {
    pub rate_eur_m2: f64,
    pub monthly_eur: f64,
    /// `false` when the default rate was used.
    pub location_known: bool,
}

/// Rate for `location`, case- and whitespace-insensitive.
#[must_use]
pub fn rate_for(location: &str) -> Option<f64> {
    let key = location.trim().to_lowercase();
    RATE_TABLE.iter().find(|(name, _)| *name == key).map(|(_, rate)| *rate)
}

/// Estimate monthly rent. Returns `None` for a non-positive or non-finite area.
#[must_use]
pub fn estimate(area_m2: f64, location: &str) -> Option<RentEstimate> {
    if !area_m2.is_finite() || area_m2 <= 0.0 {
        return None;
    }
    let known = rate_for(location);
    let rate = known.unwrap_or(DEFAULT_RATE_EUR_M2);
    Some(RentEstimate { rate_eur_m2: rate, monthly_eur: area_m2 * rate, location_known: known.is_some() })
}

/// Parse a user-typed area, accepting a comma decimal separator.
#[must_use]
pub fn parse_area(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}
