use super::*;

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_true_variants() {
    for val in ["1", "true", "yes", "on", "TRUE", "On", "  true  "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
}

#[test]
fn parse_bool_false_variants() {
    for val in ["0", "false", "no", "off", "NO"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_rejects_garbage() {
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}

// =============================================================================
// env helpers: unique env var names avoid races with parallel tests.
// =============================================================================

#[test]
fn env_flag_unset_is_none() {
    assert_eq!(env_flag("__TEST_IG_FLAG_UNSET_4411__").expect("flag"), None);
}

#[test]
fn env_flag_invalid_is_error() {
    let key = "__TEST_IG_FLAG_BAD_4412__";
    unsafe { std::env::set_var(key, "perhaps") };
    assert!(matches!(env_flag(key), Err(ConfigError::Invalid { .. })));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_uses_default_when_unset() {
    assert_eq!(env_parse("__TEST_IG_PARSE_UNSET_4413__", 42_u16).expect("parse"), 42);
}

#[test]
fn env_parse_reads_value() {
    let key = "__TEST_IG_PARSE_SET_4414__";
    unsafe { std::env::set_var(key, " 8080 ") };
    assert_eq!(env_parse(key, 3000_u16).expect("parse"), 8080);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_rejects_non_numeric() {
    let key = "__TEST_IG_PARSE_BAD_4415__";
    unsafe { std::env::set_var(key, "eighty") };
    assert!(env_parse(key, 3000_u16).is_err());
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// admin emails
// =============================================================================

#[test]
fn parse_admin_emails_normalizes_and_skips_blanks() {
    let emails = parse_admin_emails(" Test@InmoGestion.com, ,ops@example.com,");
    assert_eq!(emails.len(), 2);
    assert!(emails.contains("test@inmogestion.com"));
    assert!(emails.contains("ops@example.com"));
}

#[test]
fn default_config_promotes_bootstrap_admin() {
    let config = test_helpers::test_config();
    assert!(config.is_admin_email("test@inmogestion.com"));
    assert!(config.is_admin_email(" TEST@inmogestion.com "));
    assert!(!config.is_admin_email("a@b.com"));
}
