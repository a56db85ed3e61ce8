//! Hunt Types - Profiles, Dedup Cache, Scan Result
//!
//! KHÔNG chứa logic classify - chỉ data structures.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::eventlog::types::ServiceEvent;

// ============================================================================
// SCAN PROFILE
// ============================================================================

/// Named strictness configuration for one scan pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanProfile {
    /// Routine scanning - signature-style rules only
    Normal,
    /// Trades false-positive tolerance for anomaly coverage
    Intensive,
}

impl ScanProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanProfile::Normal => "normal",
            ScanProfile::Intensive => "intensive",
        }
    }

    /// Whether the anomaly rule (missing image / name entropy) is active.
    ///
    /// Intentionally disabled at Normal aggressiveness: the entropy signal
    /// is too noisy for routine scans, so Normal keeps the rule unreachable
    /// rather than tuning its thresholds.
    pub fn anomaly_rule_enabled(&self) -> bool {
        matches!(self, ScanProfile::Intensive)
    }

    /// Parse a profile name, defaulting to Normal
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "intensive" => ScanProfile::Intensive,
            _ => ScanProfile::Normal,
        }
    }
}

impl std::fmt::Display for ScanProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// DEDUP KEY & FINDING CACHE
// ============================================================================

/// The (service name, raw image path) pair identifying one service-creation
/// signature within a scan pass
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub service_name: String,
    pub image_path_raw: String,
}

impl DedupKey {
    pub fn from_event(event: &ServiceEvent) -> Self {
        Self {
            service_name: event.service_name.clone(),
            image_path_raw: event.image_path_raw.clone(),
        }
    }
}

/// Per-scan verdict cache.
///
/// Lifetime is exactly one scan invocation - created empty at scan start,
/// dropped at scan end, never shared across scans. The first occurrence of
/// a key determines the cached verdict; repeats skip the expensive checks.
#[derive(Debug, Default)]
pub struct FindingCache {
    verdicts: HashMap<DedupKey, bool>,
}

impl FindingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prior verdict for this key, if one was recorded this pass
    pub fn verdict_for(&self, key: &DedupKey) -> Option<bool> {
        self.verdicts.get(key).copied()
    }

    /// Record a verdict. First write wins; repeats are ignored.
    pub fn record(&mut self, key: DedupKey, malicious: bool) {
        self.verdicts.entry(key).or_insert(malicious);
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

// ============================================================================
// SCAN RESULT
// ============================================================================

/// Summary returned by a scan invocation.
///
/// `detections` is the sum of severity increments - a coarse confidence
/// score, not a count of distinct malicious services.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub scan_id: Uuid,
    pub profile: ScanProfile,
    pub detections: u32,
    pub events_processed: usize,
    pub cache_hits: usize,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_names() {
        assert_eq!(ScanProfile::Normal.as_str(), "normal");
        assert_eq!(ScanProfile::from_name("INTENSIVE"), ScanProfile::Intensive);
        assert_eq!(ScanProfile::from_name("anything-else"), ScanProfile::Normal);
    }

    #[test]
    fn test_anomaly_rule_gating() {
        assert!(!ScanProfile::Normal.anomaly_rule_enabled());
        assert!(ScanProfile::Intensive.anomaly_rule_enabled());
    }

    #[test]
    fn test_cache_first_write_wins() {
        let mut cache = FindingCache::new();
        let key = DedupKey {
            service_name: "Updater".to_string(),
            image_path_raw: r"C:\tmp\u.exe".to_string(),
        };

        assert_eq!(cache.verdict_for(&key), None);
        cache.record(key.clone(), true);
        cache.record(key.clone(), false);
        assert_eq!(cache.verdict_for(&key), Some(true));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_distinguishes_image_path() {
        let a = DedupKey::from_event(&ServiceEvent::new("Svc", r"C:\a.exe"));
        let b = DedupKey::from_event(&ServiceEvent::new("Svc", r"C:\b.exe"));
        assert_ne!(a, b);
    }
}
