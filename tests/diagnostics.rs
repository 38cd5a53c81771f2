use stunt_double::infrastructure::mocks::MockCaptureLayer;
use stunt_double::{any, args, Expectation, MockError, MockHandle, Times};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn capture<F: FnOnce()>(f: F) -> MockCaptureLayer {
    let layer = MockCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    layer
}

#[test]
fn test_every_call_is_traced() {
    let layer = capture(|| {
        let handle = MockHandle::new_named("writer");
        handle.call::<_, ()>("write", ("a",));
        handle.call::<_, ()>("write", ("b",));
    });

    let recorded = layer.with_message("call recorded");
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].level, Level::TRACE);
    assert_eq!(recorded[0].field("mock"), Some("writer"));
    assert_eq!(recorded[0].field("method"), Some("write"));
    assert_eq!(recorded[1].field("seq"), Some("1"));
}

#[test]
fn test_registration_and_match_are_debug_events() {
    let layer = capture(|| {
        let handle = MockHandle::new();
        handle
            .add_expectation(Expectation::on("get_logger").returns("console"))
            .unwrap();
        let _: String = handle.call("get_logger", ());
    });

    let registered = layer.with_message("expectation registered");
    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0].level, Level::DEBUG);
    assert_eq!(registered[0].field("expectation"), Some("0"));

    let matched = layer.with_message("call matched");
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].field("method"), Some("get_logger"));
}

#[test]
fn test_lenient_default_is_a_debug_event() {
    let layer = capture(|| {
        let handle = MockHandle::new();
        let _: u32 = handle.call_or_default("count", ());
    });

    let events = layer.with_message("unconfigured call, returning default");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::DEBUG);
    assert!(layer.with_message("unconfigured call rejected").is_empty());
}

#[test]
fn test_strict_rejection_is_a_warning() {
    let layer = capture(|| {
        let handle = MockHandle::builder()
            .with_name("writer")
            .strict()
            .build()
            .unwrap();
        let result: Result<(), MockError> = handle.try_call("write", ("hello",));
        assert!(result.is_err());
    });

    let events = layer.with_message("unconfigured call rejected");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::WARN);
    assert_eq!(events[0].field("mock"), Some("writer"));
    assert_eq!(events[0].field("args"), Some("(\"hello\")"));
}

#[test]
fn test_arity_mismatch_is_a_warning() {
    let layer = capture(|| {
        let handle = MockHandle::builder()
            .with_arity_checking(true)
            .with_expectation(Expectation::on("write").with(args![any()]).returns_default())
            .build()
            .unwrap();
        let result: Result<(), MockError> = handle.try_call("write", ("a", "b"));
        assert!(result.is_err());
    });

    let events = layer.with_message("arity mismatch");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::WARN);
    assert_eq!(events[0].field("expected"), Some("1"));
    assert_eq!(events[0].field("actual"), Some("2"));
}

#[test]
fn test_verification_failure_is_a_debug_event() {
    let layer = capture(|| {
        let handle = MockHandle::new();
        handle.call::<_, ()>("write", ("a",));
        assert!(handle
            .verify("write", args![any()], Times::at_least(2))
            .is_err());
        assert!(handle.verify("write", args![any()], Times::once()).is_ok());
    });

    let events = layer.with_message("verification failed");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field("expected"), Some("at least 2 times"));
    assert_eq!(events[0].field("actual"), Some("1"));
}
