//! Event Log Types - Shared Types
//!
//! KHÔNG chứa logic query - chỉ data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// SERVICE CREATION EVENT
// ============================================================================

/// One recorded service installation event (System/7045)
///
/// Properties missing from the log record are empty strings, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEvent {
    pub service_name: String,
    /// Raw command line recorded for the service binary
    pub image_path_raw: String,
    pub service_type: String,
    pub start_type: String,
}

impl ServiceEvent {
    pub fn new(service_name: &str, image_path_raw: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            image_path_raw: image_path_raw.to_string(),
            service_type: String::new(),
            start_type: String::new(),
        }
    }
}

// ============================================================================
// QUERY TYPES
// ============================================================================

/// Selector for one named field under Event/EventData
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDataQuery {
    pub name: String,
}

impl EventDataQuery {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }

    /// XPath selecting this field's value in the rendered event
    pub fn xpath(&self) -> String {
        format!("Event/EventData/Data[@Name='{}']", self.name)
    }
}

/// A channel + event id query with named data selectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    pub channel: String,
    pub event_id: u32,
    pub selectors: Vec<EventDataQuery>,
}

impl EventQuery {
    pub fn new(channel: &str, event_id: u32) -> Self {
        Self {
            channel: channel.to_string(),
            event_id,
            selectors: Vec::new(),
        }
    }

    pub fn with_selector(mut self, name: &str) -> Self {
        self.selectors.push(EventDataQuery::new(name));
        self
    }

    /// XPath filter matching events with this id on the channel
    pub fn filter_xpath(&self) -> String {
        format!("*[System[EventID={}]]", self.event_id)
    }
}

// ============================================================================
// MONITORING DECLARATION
// ============================================================================

/// One audit event a caller can pre-register live monitoring for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonitoredEvent {
    pub channel: &'static str,
    pub event_id: u32,
}

// ============================================================================
// TESTS
// ============================================================================
