use std::time::Instant;

use tracing::debug;

/// Runs a synchronous storage call from a component and logs its duration.
///
/// SQLite calls are short enough to stay on the UI thread.
pub fn run_blocking<F, T>(operation: &'static str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let started = Instant::now();
    let result = f();
    debug!(
        operation,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "storage call finished"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_closure_result() {
        assert_eq!(run_blocking("answer", || 6 * 7), 42);
    }
}
