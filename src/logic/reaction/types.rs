//! Reaction Types - Notification Payloads
//!
//! KHÔNG chứa logic - chỉ data structures.
//! Immutable, timestamped payloads handed to whatever sink is wired in.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::logic::eventlog::types::ServiceEvent;
use crate::logic::indicators::ScanVerdict;

// ============================================================================
// SCAN METADATA
// ============================================================================

/// Context handed to the sink when a scan begins
#[derive(Debug, Clone, Serialize)]
pub struct HuntMetadata {
    pub scan_id: Uuid,
    pub hunt_name: String,
    pub mitre_technique: String,
    pub profile: String,
    pub channel: String,
    pub event_id: u32,
    pub started_at: DateTime<Utc>,
}

// ============================================================================
// DETECTION PAYLOADS
// ============================================================================

/// A log event classified as malicious
#[derive(Debug, Clone, Serialize)]
pub struct EventDetection {
    pub channel: String,
    pub event_id: u32,
    pub event: ServiceEvent,
}

impl EventDetection {
    pub fn from_service_event(event: &ServiceEvent) -> Self {
        Self {
            channel: crate::constants::SERVICE_CHANNEL.to_string(),
            event_id: crate::constants::SERVICE_INSTALL_EVENT_ID,
            event: event.clone(),
        }
    }
}

/// A file implicated by a detection
///
/// `exists` may be false - a service pointing at a missing binary is
/// itself reportable.
#[derive(Debug, Clone, Serialize)]
pub struct FileDetection {
    pub path: String,
    pub exists: bool,
    pub signed: bool,
    /// Content-scan verdict when a scan was run for this detection
    pub scan: Option<ScanVerdict>,
}
