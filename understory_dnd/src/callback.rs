// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consumer handler plumbing.
//!
//! Handlers report failure by returning `Err`. Failures are contained per call:
//! they are logged and never unwind into the coordination state. With the `std`
//! feature, a panicking handler is contained the same way.

use alloc::boxed::Box;

/// Error type returned by consumer handlers.
pub type HandlerError = Box<dyn core::error::Error + Send + Sync>;

/// Result type returned by consumer handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Run a consumer handler, containing its failure.
///
/// Returns `true` when the handler completed successfully. `context` names the
/// handler in the log record.
pub fn isolate(context: &'static str, handler: impl FnOnce() -> HandlerResult) -> bool {
    match run(handler) {
        Ok(()) => true,
        Err(Failure::Returned(err)) => {
            tracing::warn!(handler = context, error = %err, "handler returned an error");
            false
        }
        #[cfg(feature = "std")]
        Err(Failure::Panicked) => {
            tracing::warn!(handler = context, "handler panicked");
            false
        }
    }
}

enum Failure {
    Returned(HandlerError),
    #[cfg(feature = "std")]
    Panicked,
}

#[cfg(feature = "std")]
fn run(handler: impl FnOnce() -> HandlerResult) -> Result<(), Failure> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(handler)) {
        Ok(res) => res.map_err(Failure::Returned),
        Err(_) => Err(Failure::Panicked),
    }
}

#[cfg(not(feature = "std"))]
fn run(handler: impl FnOnce() -> HandlerResult) -> Result<(), Failure> {
    handler().map_err(Failure::Returned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Boom;

    impl core::fmt::Display for Boom {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("boom")
        }
    }

    impl core::error::Error for Boom {}

    #[test]
    fn ok_handler_reports_success() {
        assert!(isolate("ok", || Ok(())));
    }

    #[test]
    fn err_handler_is_contained() {
        assert!(!isolate("err", || Err(Box::new(Boom))));
    }

    #[cfg(feature = "std")]
    #[test]
    fn panicking_handler_is_contained() {
        assert!(!isolate("panic", || panic!("handler bug")));
    }
}
