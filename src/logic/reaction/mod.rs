//! Reaction - Detection Sinks
//!
//! Mục đích: Tách phần phát hiện khỏi phần xử lý kết quả.
//!
//! The engine pushes structured notifications here and keeps scanning;
//! what happens to them (logging, queueing, UI) is the sink's business.

pub mod types;

pub use types::{EventDetection, FileDetection, HuntMetadata};

// ============================================================================
// TRAIT
// ============================================================================

/// Receiver for hunt notifications
pub trait Reaction {
    fn on_scan_begin(&mut self, metadata: &HuntMetadata);
    fn on_event_identified(&mut self, detection: &EventDetection);
    fn on_file_identified(&mut self, detection: &FileDetection);
    fn on_scan_end(&mut self);
}

// ============================================================================
// LOG SINK
// ============================================================================

/// Default sink: structured log lines plus running tallies
#[derive(Debug, Default)]
pub struct LogReaction {
    pub events_identified: u32,
    pub files_identified: u32,
}

impl LogReaction {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reaction for LogReaction {
    fn on_scan_begin(&mut self, metadata: &HuntMetadata) {
        log::info!(
            "Hunting for {} ({}) at level {} [scan {}]",
            metadata.hunt_name,
            metadata.mitre_technique,
            metadata.profile,
            metadata.scan_id
        );
    }

    fn on_event_identified(&mut self, detection: &EventDetection) {
        self.events_identified += 1;
        log::warn!(
            "Malicious service creation: name='{}' image='{}' ({}#{})",
            detection.event.service_name,
            detection.event.image_path_raw,
            detection.channel,
            detection.event_id
        );
    }

    fn on_file_identified(&mut self, detection: &FileDetection) {
        self.files_identified += 1;
        let hash = detection
            .scan
            .as_ref()
            .and_then(|s| s.sha256.as_deref())
            .unwrap_or("-");
        log::warn!(
            "Malicious file: path='{}' exists={} sha256={}",
            detection.path,
            detection.exists,
            hash
        );
    }

    fn on_scan_end(&mut self) {
        log::info!(
            "Hunt finished: {} event detections, {} file detections",
            self.events_identified,
            self.files_identified
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
