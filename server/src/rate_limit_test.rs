use super::*;

const WINDOW: Duration = Duration::from_secs(600);

#[test]
fn per_email_allows_up_to_limit() {
    let rl = CodeRequestLimiter::new(5, WINDOW);
    let now = Instant::now();

    for i in 0..5 {
        assert!(rl.check_and_record_at("a@b.com", now).is_ok(), "request {i} should succeed");
    }
    assert_eq!(
        rl.check_and_record_at("a@b.com", now),
        Err(RateLimitError::PerEmailExceeded { limit: 5, window_secs: 600 })
    );
}

#[test]
fn per_email_limit_is_independent_between_emails() {
    let rl = CodeRequestLimiter::new(1, WINDOW);
    let now = Instant::now();

    assert!(rl.check_and_record_at("a@b.com", now).is_ok());
    assert!(rl.check_and_record_at("c@d.com", now).is_ok());
    assert!(rl.check_and_record_at("a@b.com", now).is_err());
}

#[test]
fn window_expiry_allows_again() {
    let rl = CodeRequestLimiter::new(2, WINDOW);
    let start = Instant::now();

    assert!(rl.check_and_record_at("a@b.com", start).is_ok());
    assert!(rl.check_and_record_at("a@b.com", start).is_ok());
    assert!(rl.check_and_record_at("a@b.com", start).is_err());

    let later = start + WINDOW + Duration::from_secs(1);
    assert!(rl.check_and_record_at("a@b.com", later).is_ok());
}

#[test]
fn global_limit_caps_distinct_emails() {
    let rl = CodeRequestLimiter::new(1, WINDOW);
    let now = Instant::now();

    for i in 0..GLOBAL_MULTIPLIER {
        let email = format!("user{i}@example.com");
        assert!(rl.check_and_record_at(&email, now).is_ok(), "request {i} should succeed");
    }
    assert_eq!(
        rl.check_and_record_at("late@example.com", now),
        Err(RateLimitError::GlobalExceeded { limit: GLOBAL_MULTIPLIER, window_secs: 600 })
    );
}

#[test]
fn rejected_request_is_not_recorded() {
    let rl = CodeRequestLimiter::new(1, WINDOW);
    let start = Instant::now();

    assert!(rl.check_and_record_at("a@b.com", start).is_ok());
    let mid = start + Duration::from_secs(300);
    assert!(rl.check_and_record_at("a@b.com", mid).is_err());

    // Only the first request counts toward the window.
    let after_first = start + WINDOW + Duration::from_secs(1);
    assert!(rl.check_and_record_at("a@b.com", after_first).is_ok());
}

#[test]
fn sweep_drops_idle_emails() {
    let rl = CodeRequestLimiter::new(3, WINDOW);
    let start = Instant::now();
    assert!(rl.check_and_record_at("a@b.com", start).is_ok());
    assert!(rl.check_and_record_at("c@d.com", start + Duration::from_secs(500)).is_ok());
    assert_eq!(rl.tracked_emails(), 2);

    rl.sweep_at(start + WINDOW + Duration::from_secs(1));
    assert_eq!(rl.tracked_emails(), 1);
}

#[test]
fn clones_share_counters() {
    let rl = CodeRequestLimiter::new(1, WINDOW);
    let other = rl.clone();
    let now = Instant::now();
    assert!(rl.check_and_record_at("a@b.com", now).is_ok());
    assert!(other.check_and_record_at("a@b.com", now).is_err());
}
