//! Structured JSON trace output, compiled in with the `trace` feature.

#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// File created inside the trace directory.
pub const TRACE_FILE_NAME: &str = "mohu-trace.jsonl";

/// Install a global subscriber writing JSON lines to `log_dir/mohu-trace.jsonl`.
///
/// The filter comes from `RUST_LOG` and defaults to `mohu=debug`. Later calls are no-ops.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    INIT.call_once(|| {
        let file_appender = tracing_appender::rolling::never(log_dir, TRACE_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // The writer must outlive every span the host process emits.
        std::mem::forget(guard);

        tracing_subscriber::fmt()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mohu=debug")),
            )
            .init();
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}

/// Directory read by [`init_tracing_from_env`].
pub const TRACE_DIR_ENV: &str = "MOHU_TRACE_DIR";

/// Call [`init_tracing`] with `$MOHU_TRACE_DIR` when it is set and non-empty.
///
/// Returns whether a directory was found.
pub fn init_tracing_from_env() -> bool {
    match std::env::var_os(TRACE_DIR_ENV) {
        Some(dir) if !dir.is_empty() => {
            init_tracing(std::path::Path::new(&dir));
            true
        }
        _ => false,
    }
}
