//! Request-path settings fixed at startup.

use std::sync::OnceLock;

use tracing::warn;

use crate::config::ServerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequestSettings {
    slow_request_threshold_ms: u64,
    parent_propagation: bool,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold_ms: 1_000,
            parent_propagation: false,
        }
    }
}

impl RequestSettings {
    fn from_config(config: &ServerConfig) -> Self {
        let observability = &config.observability;

        Self {
            slow_request_threshold_ms: observability.slow_request_threshold_ms,
            // Without an exporter there is no trace to join.
            parent_propagation: observability.otel_enabled
                && observability.otel_parent_propagation_enabled,
        }
    }
}

static SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

pub(super) fn apply_runtime_config(config: &ServerConfig) {
    if SETTINGS.set(RequestSettings::from_config(config)).is_err() {
        warn!("request settings were already applied, keeping the first");
    }
}

fn current() -> RequestSettings {
    SETTINGS.get().copied().unwrap_or_default()
}

pub(super) fn slow_request_threshold_ms() -> u64 {
    current().slow_request_threshold_ms
}

pub(super) fn otel_parent_propagation_enabled() -> bool {
    current().parent_propagation
}
