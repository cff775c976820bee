//! Typed lifecycle events
//!
//! Every log line the analyzer emits outside an observation scope names one
//! of these events.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    BootStart,
    BootComplete,
    /// Startup aborted (FATAL)
    BootFailed,
    ConfigLoaded,
    DatasetLoaded,

    // Fact base
    FactsRebuilt,
    /// Rebuild failed; the previous base stays current
    FactsRebuildRejected,

    // Queries
    ProfileQueryExecuted,
    ProfileQueryRejected,
    SearchExecuted,

    // Model
    ModelTrained,
    PredictionServed,
    PredictionRejected,

    // Request loop
    Serving,
    RequestRejected,
    ServingStopped,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::BootComplete => "BOOT_COMPLETE",
            Event::BootFailed => "BOOT_FAILED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",

            Event::FactsRebuilt => "FACTS_REBUILT",
            Event::FactsRebuildRejected => "FACTS_REBUILD_REJECTED",

            Event::ProfileQueryExecuted => "PROFILE_QUERY_EXECUTED",
            Event::ProfileQueryRejected => "PROFILE_QUERY_REJECTED",
            Event::SearchExecuted => "SEARCH_EXECUTED",

            Event::ModelTrained => "MODEL_TRAINED",
            Event::PredictionServed => "PREDICTION_SERVED",
            Event::PredictionRejected => "PREDICTION_REJECTED",

            Event::Serving => "SERVING",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::ServingStopped => "SERVING_STOPPED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::BootFailed)
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::BootFailed => Severity::Fatal,
            Event::FactsRebuildRejected
            | Event::ProfileQueryRejected
            | Event::PredictionRejected
            | Event::RequestRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
