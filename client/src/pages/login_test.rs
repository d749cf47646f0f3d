use super::*;

#[test]
fn code_input_is_trimmed_and_uppercased() {
    assert_eq!(normalize_code_input(" abc123 "), "ABC123");
}

#[test]
fn request_requires_an_address() {
    assert_eq!(validate_request_code_input("  ana@inmogestion.com "), Ok("ana@inmogestion.com".to_owned()));
    assert_eq!(validate_request_code_input("   "), Err("Enter an email first."));
    assert_eq!(validate_request_code_input("ana"), Err("That does not look like an email address."));
}

#[test]
fn verify_normalizes_the_code() {
    assert_eq!(
        validate_verify_code_input(" a@b.com ", " abc123 "),
        Ok(("a@b.com".to_owned(), "ABC123".to_owned()))
    );
}

#[test]
fn verify_rejects_missing_fields_or_wrong_length() {
    for (email, code) in [("", "ABC123"), ("a@b.com", "   "), ("a@b.com", "ABCDE"), ("a@b.com", "ABCDEFG")] {
        assert_eq!(validate_verify_code_input(email, code), Err("Enter both email and 6-char code."), "{email:?} {code:?}");
    }
}
