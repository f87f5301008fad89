//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for interactive runs
    Development,
    /// JSON structured output for build pipelines
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup. Later calls are no-ops. Log output goes to stderr so
/// that stdout stays free for rendered reports.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, `cuemap=debug` unless `RUST_LOG` is set
/// - **Production**: JSON structured logs, `cuemap=info` unless `RUST_LOG` is set
/// - **Test**: Registry only; use `init_test_capture()` to collect events
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("cuemap=debug")),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("cuemap=info")),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
