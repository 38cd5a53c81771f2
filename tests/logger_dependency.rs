use stunt_double::{any, args, capability_double, eq, Expectation, MockError, Times};

pub trait LoggerDependency {
    fn get_current_directory(&self) -> String;
    fn get_directory_by_logger_name(&self, logger_name: &str) -> String;
    fn default_logger(&self) -> String;
}

capability_double! {
    pub struct MockLoggerDependency implements LoggerDependency {
        fn get_current_directory(&self) -> String;
        fn get_directory_by_logger_name(&self, logger_name: &str) -> String;
        fn default_logger(&self) -> String;
    }
}

#[test]
fn test_declarative_zero_argument_method() {
    let logger =
        MockLoggerDependency::of([Expectation::on("get_current_directory").returns("D:\\Temp")]);

    assert_eq!(logger.get_current_directory(), "D:\\Temp");
}

#[test]
fn test_any_argument_returns_fixed_value() {
    let logger = MockLoggerDependency::of([Expectation::on("get_directory_by_logger_name")
        .with(args![any()])
        .returns("C:\\Foo")]);

    assert_eq!(logger.get_directory_by_logger_name("xyz"), "C:\\Foo");
    assert_eq!(logger.get_directory_by_logger_name(""), "C:\\Foo");
}

#[test]
fn test_argument_dependent_response() {
    let logger = MockLoggerDependency::new();
    logger
        .handle()
        .add_expectation(
            Expectation::on("get_directory_by_logger_name")
                .with(args![any()])
                .returns_with(|(name,): (String,)| format!("C:\\{}", name)),
        )
        .unwrap();

    assert_eq!(logger.get_directory_by_logger_name("hren"), "C:\\hren");
}

#[test]
fn test_property_style_getter() {
    let logger =
        MockLoggerDependency::of([Expectation::on("default_logger").returns("DefaultLogger")]);

    assert_eq!(logger.default_logger(), "DefaultLogger");
}

#[test]
fn test_several_expectations_declared_together() {
    let logger = MockLoggerDependency::of([
        Expectation::on("get_current_directory").returns("D:\\Temp"),
        Expectation::on("default_logger").returns("DefaultLogger"),
        Expectation::on("get_directory_by_logger_name")
            .with(args![any()])
            .returns("C:\\Temp"),
    ]);

    assert_eq!(logger.get_current_directory(), "D:\\Temp");
    assert_eq!(logger.default_logger(), "DefaultLogger");
    assert_eq!(logger.get_directory_by_logger_name("CustomLogger"), "C:\\Temp");
}

#[test]
fn test_declared_mock_extended_incrementally() {
    // Built from a declarative table, then configured further while in use
    let handle = stunt_double::MockHandle::builder()
        .with_name("logger")
        .with_expectations([
            Expectation::on("get_current_directory").returns("D:\\Temp"),
            Expectation::on("default_logger").returns("DefaultLogger"),
        ])
        .build()
        .unwrap();
    let logger = MockLoggerDependency::from_handle(handle);

    assert_eq!(logger.get_current_directory(), "D:\\Temp");

    logger
        .handle()
        .add_expectation(
            Expectation::on("get_directory_by_logger_name")
                .with(args![any()])
                .returns_with(|(name,): (String,)| format!("C:\\{}", name)),
        )
        .unwrap();

    assert_eq!(logger.default_logger(), "DefaultLogger");
    assert_eq!(logger.get_directory_by_logger_name("Foo"), "C:\\Foo");
    assert_eq!(logger.get_directory_by_logger_name("Boo"), "C:\\Boo");
}

#[test]
fn test_declarative_mock_cannot_be_extended() {
    let logger =
        MockLoggerDependency::of([Expectation::on("default_logger").returns("DefaultLogger")]);

    let result = logger
        .handle()
        .add_expectation(Expectation::on("get_current_directory").returns("E:\\"));
    assert!(matches!(result, Err(MockError::Frozen { .. })));
    assert_eq!(logger.get_current_directory(), "");
}

#[test]
fn test_specific_literal_overrides_wildcard() {
    let logger = MockLoggerDependency::new();
    let handle = logger.handle();
    handle
        .add_expectation(
            Expectation::on("get_directory_by_logger_name")
                .with(args![any()])
                .returns("C:\\Logs"),
        )
        .unwrap();
    handle
        .add_expectation(
            Expectation::on("get_directory_by_logger_name")
                .with(args![eq("Audit")])
                .returns("C:\\Audit"),
        )
        .unwrap();

    assert_eq!(logger.get_directory_by_logger_name("Audit"), "C:\\Audit");
    assert_eq!(logger.get_directory_by_logger_name("App"), "C:\\Logs");

    handle
        .verify(
            "get_directory_by_logger_name",
            args![eq("Audit")],
            Times::once(),
        )
        .unwrap();
    handle
        .verify(
            "get_directory_by_logger_name",
            args![any()],
            Times::exactly(2),
        )
        .unwrap();
}

#[test]
#[should_panic(expected = "unconfigured call default_logger()")]
fn test_strict_mock_fails_the_test_on_unconfigured_call() {
    let handle = stunt_double::MockHandle::builder()
        .strict()
        .with_expectation(Expectation::on("get_current_directory").returns("D:\\Temp"))
        .build()
        .unwrap();
    let logger = MockLoggerDependency::from_handle(handle);

    assert_eq!(logger.get_current_directory(), "D:\\Temp");
    logger.default_logger();
}

pub trait RollingPolicy {
    fn rotate_after(&self, megabytes: f64) -> bool;
    fn archive_directory(&self, logger_name: Option<String>) -> String;
}

capability_double! {
    pub struct MockRollingPolicy implements RollingPolicy {
        fn rotate_after(&self, megabytes: f64) -> bool;
        fn archive_directory(&self, logger_name: Option<String>) -> String;
    }
}

#[test]
fn test_float_argument_literal() {
    let policy = MockRollingPolicy::of([
        Expectation::on("rotate_after").with(args![eq(2.5)]).returns(true),
        Expectation::on("rotate_after").with(args![eq(f64::INFINITY)]).returns(true),
    ]);

    assert!(policy.rotate_after(2.5));
    assert!(!policy.rotate_after(2.0));
    assert!(!policy.rotate_after(f64::MAX));
    policy
        .handle()
        .verify("rotate_after", args![eq(2.5)], Times::once())
        .unwrap();
}

#[test]
#[should_panic(expected = "argument 0 could not be encoded")]
fn test_non_finite_float_argument_fails_the_call() {
    let policy = MockRollingPolicy::new();
    policy.rotate_after(f64::NAN);
}

#[test]
fn test_optional_argument_literal() {
    let policy = MockRollingPolicy::of([
        Expectation::on("archive_directory")
            .with(args![eq(None::<String>)])
            .returns("C:\\Archive"),
        Expectation::on("archive_directory")
            .with(args![eq(Some("CustomLogger"))])
            .returns("C:\\Archive\\CustomLogger"),
    ]);

    assert_eq!(policy.archive_directory(None), "C:\\Archive");
    assert_eq!(
        policy.archive_directory(Some("CustomLogger".to_string())),
        "C:\\Archive\\CustomLogger"
    );
    assert_eq!(policy.archive_directory(Some("Other".to_string())), "");
    policy
        .handle()
        .verify("archive_directory", args![eq(None::<String>)], Times::once())
        .unwrap();
}
