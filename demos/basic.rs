//! Basic example: stubbing a dependency of the code under test.
//!
//! A `ReportService` needs a `LoggerDependency` to find out where to write.
//! The example swaps in a double, once configured declaratively and once
//! incrementally, and shows what happens to calls nobody configured.

use stunt_double::{any, args, capability_double, Expectation, MockError, MockHandle};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

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

struct ReportService<'a, D: LoggerDependency> {
    deps: &'a D,
}

impl<'a, D: LoggerDependency> ReportService<'a, D> {
    fn report_path(&self, report: &str) -> String {
        let logger = self.deps.default_logger();
        format!(
            "{}\\{}.txt",
            self.deps.get_directory_by_logger_name(&logger),
            report
        )
    }
}

fn main() {
    // RUST_LOG=stunt_double=trace shows every recorded call
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    println!("=== Declarative Setup ===\n");

    let deps = MockLoggerDependency::of([
        Expectation::on("default_logger").returns("DefaultLogger"),
        Expectation::on("get_directory_by_logger_name")
            .with(args![any()])
            .returns("C:\\Temp"),
    ]);
    let service = ReportService { deps: &deps };
    println!("report path: {}", service.report_path("daily"));

    // Declarative doubles are frozen
    if let Err(e) = deps
        .handle()
        .add_expectation(Expectation::on("get_current_directory").returns("E:\\"))
    {
        println!("extending it fails: {}", e);
    }

    println!("\n=== Incremental Setup ===\n");

    let deps = MockLoggerDependency::new();
    deps.handle()
        .add_expectation(Expectation::on("default_logger").returns("audit"))
        .ok();
    deps.handle()
        .add_expectation(
            Expectation::on("get_directory_by_logger_name")
                .with(args![any()])
                .returns_with(|(name,): (String,)| format!("C:\\{}", name)),
        )
        .ok();
    let service = ReportService { deps: &deps };
    println!("report path: {}", service.report_path("weekly"));

    println!("\n=== Unconfigured Calls ===\n");

    let lenient = MockHandle::new_named("lenient");
    let dir: String = lenient.call_or_default("get_current_directory", ());
    println!("lenient mock answers with the default: {:?}", dir);

    let strict = MockHandle::builder()
        .with_name("strict")
        .strict()
        .build()
        .expect("a non-empty name is valid");
    let result: Result<String, MockError> = strict.try_call("get_current_directory", ());
    match result {
        Ok(dir) => println!("unexpected answer: {}", dir),
        Err(e) => println!("strict mock rejects it: {}", e),
    }

    println!("\n=== Example Complete ===");
}
