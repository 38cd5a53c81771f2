//! Verification example: checking how a dependency was used.
//!
//! A `Logger` forwards lines to a `LogWriter`. After exercising it, the
//! example verifies call counts and prints the failure report for a
//! constraint that does not hold.

use stunt_double::{any, args, capability_double, eq, Times};

pub trait LogWriter {
    fn set_logger(&self, logger: &str);
    fn write(&self, message: &str);
}

capability_double! {
    pub struct MockLogWriter implements LogWriter {
        fn set_logger(&self, logger: &str);
        fn write(&self, message: &str);
    }
}

struct Logger<'a, W: LogWriter> {
    writer: &'a W,
}

impl<'a, W: LogWriter> Logger<'a, W> {
    fn log(&self, message: &str) {
        self.writer.write(message);
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Verification Example ===\n");

    let writer = MockLogWriter::new();
    let logger = Logger { writer: &writer };

    logger.log("Hello, logger!");
    logger.log("Hello again");

    let handle = writer.handle();
    let checks = [
        ("write", args![any()], Times::at_least(2)),
        ("write", args![eq("Hello, logger!")], Times::once()),
        ("set_logger", args![eq("dsfsd")], Times::never()),
        ("set_logger", args![eq("dsfsd")], Times::exactly(1)),
    ];

    for (method, matcher, expected) in checks {
        let pattern = matcher.describe();
        match handle.verify(method, matcher, expected) {
            Ok(()) => println!("ok:     {}{} called {}", method, pattern, expected),
            Err(failure) => println!("failed: {}\n", failure),
        }
    }

    println!("\nCall history:");
    for record in handle.invocations() {
        println!("  {}", record);
    }

    let metrics = handle.metrics().snapshot();
    println!("\nMetrics: {:?}", metrics);

    println!("\n=== Example Complete ===");
}
