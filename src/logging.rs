//! Tracing setup for hosts of stlscope.
//!
//! The library only emits `tracing` events: `trace` for each lookup and
//! `debug` when an object fails validation. A host that wants to see them
//! installs a subscriber once, before arming whatever fault handler runs the
//! inspector. Filtering follows `RUST_LOG` and defaults to `info`.

use std::sync::Once;

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static INIT: Once = Once::new();

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Only the first call in a process does
/// anything, whatever its format, and a subscriber the host already set is
/// left in place.
pub fn init(format: LogFormat) {
    INIT.call_once(|| {
        let layer = match format {
            LogFormat::Text => fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_current_span(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        };
        let installed = tracing_subscriber::registry()
            .with(layer.with_filter(env_filter()))
            .try_init()
            .is_ok();
        if installed {
            info!(?format, "stlscope tracing initialized");
        }
    });
}

/// [`init`] with [`LogFormat::Text`].
pub fn init_tracing() {
    init(LogFormat::Text);
}

/// [`init`] with [`LogFormat::Json`].
pub fn init_tracing_json() {
    init(LogFormat::Json);
}
