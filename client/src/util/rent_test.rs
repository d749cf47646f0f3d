use super::*;

#[test]
fn known_location_uses_table_rate() {
    let est = estimate(80.0, "Valencia").expect("estimate");
    assert!(est.location_known);
    assert!((est.rate_eur_m2 - 12.4).abs() < f64::EPSILON);
    assert!((est.monthly_eur - 992.0).abs() < 1e-9);
}

#[test]
fn unknown_location_uses_default_rate() {
    let est = estimate(50.0, "Teruel").expect("estimate");
    assert!(!est.location_known);
    assert!((est.monthly_eur - 50.0 * DEFAULT_RATE_EUR_M2).abs() < 1e-9);
}

#[test]
fn lookup_ignores_case_and_padding() {
    assert_eq!(rate_for("  MADRID "), Some(17.5));
    assert_eq!(rate_for("Málaga"), Some(13.6));
}

#[test]
fn non_positive_area_has_no_estimate() {
    assert_eq!(estimate(0.0, "Madrid"), None);
    assert_eq!(estimate(-3.0, "Madrid"), None);
    assert_eq!(estimate(f64::NAN, "Madrid"), None);
}

#[test]
fn parse_area_accepts_comma_decimals() {
    assert_eq!(parse_area("72,5"), Some(72.5));
    assert_eq!(parse_area(" 90 "), Some(90.0));
    assert_eq!(parse_area("noventa"), None);
}
