//! Hunt - New Service Creation (T1543.003)
//!
//! Mục đích: Quét các event 7045 đã ghi để tìm persistence qua service mới.
//!
//! A scan is one synchronous pass over a batch snapshot of recorded
//! events: fresh finding cache, one classification per event, begin/end
//! bracketing on the reaction sink, severity sum returned to the caller.
//! Findings do not outlive the invocation.

pub mod engine;
pub mod types;


use chrono::Utc;
use uuid::Uuid;

use crate::constants::{SERVICE_CHANNEL, SERVICE_INSTALL_EVENT_ID};
use crate::logic::eventlog::types::MonitoredEvent;
use crate::logic::eventlog::{self, EventSource, SystemEventLog};
use crate::logic::indicators::{IndicatorLibrary, SystemIndicators};
use crate::logic::reaction::{HuntMetadata, LogReaction, Reaction};

use types::{FindingCache, ScanProfile, ScanResult};

/// Hunt identity
pub const HUNT_NAME: &str = "New Service Creation";
pub const MITRE_TECHNIQUE: &str = "T1543.003";

// ============================================================================
// SCAN ENTRY POINTS
// ============================================================================

/// Routine scan with the system collaborators and the logging sink
pub fn scan_normal() -> ScanResult {
    let mut reaction = LogReaction::new();
    scan(ScanProfile::Normal, &SystemEventLog, &SystemIndicators, &mut reaction)
}

/// Intensive scan - anomaly rule active
pub fn scan_intensive() -> ScanResult {
    let mut reaction = LogReaction::new();
    scan(ScanProfile::Intensive, &SystemEventLog, &SystemIndicators, &mut reaction)
}

/// One scan pass over the event source.
///
/// Events are processed strictly one at a time; the finding cache is
/// created here and dropped here, so verdicts never leak across scans.
pub fn scan<S, I, R>(
    profile: ScanProfile,
    source: &S,
    indicators: &I,
    reaction: &mut R,
) -> ScanResult
where
    S: EventSource,
    I: IndicatorLibrary,
    R: Reaction,
{
    let started_at = Utc::now();
    let scan_id = Uuid::new_v4();

    reaction.on_scan_begin(&HuntMetadata {
        scan_id,
        hunt_name: HUNT_NAME.to_string(),
        mitre_technique: MITRE_TECHNIQUE.to_string(),
        profile: profile.as_str().to_string(),
        channel: SERVICE_CHANNEL.to_string(),
        event_id: SERVICE_INSTALL_EVENT_ID,
        started_at,
    });

    let events = source.query_events(&eventlog::service_creation_query());
    log::info!("Processing {} service creation events", events.len());

    let mut cache = FindingCache::new();
    let mut detections: u32 = 0;

    for event in &events {
        detections += engine::classify_event(event, profile, &mut cache, indicators, reaction);
    }

    reaction.on_scan_end();

    // Every first-seen key adds one cache entry; the rest were hits
    let cache_hits = events.len() - cache.len();
    let duration_ms = (Utc::now() - started_at).num_milliseconds().max(0) as u64;

    ScanResult {
        scan_id,
        profile,
        detections,
        events_processed: events.len(),
        cache_hits,
        started_at,
        duration_ms,
    }
}

// ============================================================================
// MONITORING DECLARATION
// ============================================================================

/// The audit events this hunt depends on, for callers that pre-register
/// live monitoring independent of on-demand scanning
pub fn monitoring_events() -> Vec<MonitoredEvent> {
    vec![MonitoredEvent {
        channel: SERVICE_CHANNEL,
        event_id: SERVICE_INSTALL_EVENT_ID,
    }]
}
