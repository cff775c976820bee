//! Observability
//!
//! - Structured JSON logging to stderr
//! - Typed lifecycle events
//! - Counter-only metrics
//! - Observation scopes
//!
//! Observability is read-only: nothing here changes what a command returns.

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{min_severity, set_min_severity, Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot, METRICS};
pub use scope::ObservationScope;

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
