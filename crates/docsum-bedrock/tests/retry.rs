use std::time::Duration;

use docsum_bedrock::retry::RetryPolicy;

#[test]
fn delay_doubles_with_attempt() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay_for(0, 0.0), Duration::from_secs(1));
    assert_eq!(policy.delay_for(1, 0.0), Duration::from_secs(2));
    assert_eq!(policy.delay_for(3, 0.0), Duration::from_secs(8));
}

#[test]
fn jitter_is_additive() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay_for(2, 0.5), Duration::from_millis(4_500));
}

#[test]
fn jitter_stays_below_one_unit() {
    let policy = RetryPolicy::default();
    assert!(policy.delay_for(0, 1.0) <= Duration::from_secs(2));
    assert_eq!(policy.delay_for(0, -3.0), Duration::from_secs(1));
}

#[test]
fn drawn_jitter_stays_in_range() {
    let policy = RetryPolicy::default();
    for attempt in 0..5 {
        let floor = Duration::from_secs(1 << attempt);
        let delay = policy.jittered_delay(attempt);
        assert!(delay >= floor);
        assert!(delay <= floor + Duration::from_secs(1));
    }
}

#[test]
fn base_delay_scales_everything() {
    let policy = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(10),
    };
    assert_eq!(policy.delay_for(2, 0.0), Duration::from_millis(40));
}

#[test]
fn worst_case_total_delay_is_bounded() {
    let policy = RetryPolicy::new(5);
    // 1 + 2 + 4 + 8 plus at most one unit of jitter per sleep.
    assert!(policy.worst_case_total_delay() <= Duration::from_secs(19));
    assert!(policy.worst_case_total_delay() >= Duration::from_secs(15));
}

#[test]
fn zero_attempts_is_raised_to_one() {
    assert_eq!(RetryPolicy::new(0).max_attempts, 1);
    assert_eq!(RetryPolicy::new(1).worst_case_total_delay(), Duration::ZERO);
}
