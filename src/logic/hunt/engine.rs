//! Classification Engine - Service Creation Rule Chain
//!
//! CHỈ chứa logic classify - không có types, không có orchestration.
//!
//! One ordered chain, first match wins, one branch per event. Earlier
//! rules pre-empt later ones and determine which notifications fire.
//! Both profiles run the identical chain; only the anomaly rule's trigger
//! differs (see `ScanProfile::anomaly_rule_enabled`).

use crate::constants::{ENTROPY_HIGH, ENTROPY_LOW};
use crate::logic::eventlog::types::ServiceEvent;
use crate::logic::indicators::IndicatorLibrary;
use crate::logic::reaction::{EventDetection, FileDetection, Reaction};

use super::types::{DedupKey, FindingCache, ScanProfile};

// ============================================================================
// RULES
// ============================================================================

/// Which rule in the chain matched an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleHit {
    /// Raw command line matches a known-malicious LOLBin pattern
    Lolbin,
    /// Image exists on disk and carries no valid signature
    UnsignedBinary,
    /// Service name carries the PSExec service marker
    PsexecName,
    /// Service name or image path carries mimikatz/mimidrv markers
    MimikatzName,
    /// Image missing, or service name entropy outside (3.00, 5.00)
    NameAnomaly,
}

impl RuleHit {
    /// Severity contribution of this rule
    pub fn severity(&self) -> u32 {
        match self {
            RuleHit::Lolbin => 1,
            RuleHit::UnsignedBinary => 2,
            RuleHit::PsexecName => 1,
            RuleHit::MimikatzName => 2,
            RuleHit::NameAnomaly => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleHit::Lolbin => "lolbin_command",
            RuleHit::UnsignedBinary => "unsigned_binary",
            RuleHit::PsexecName => "psexec_service_name",
            RuleHit::MimikatzName => "mimikatz_marker",
            RuleHit::NameAnomaly => "name_anomaly",
        }
    }
}

/// Image resolved from the raw command line, at most once per event
struct ResolvedImage {
    path: String,
    exists: bool,
    signed: bool,
}

impl ResolvedImage {
    fn resolve<I: IndicatorLibrary>(indicators: &I, image_path_raw: &str) -> Self {
        let path = indicators.extract_image_path(image_path_raw);
        let exists = indicators.file_exists(&path);
        // Signature lookup only makes sense for files that are there
        let signed = exists && indicators.file_is_signed(&path);
        Self { path, exists, signed }
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Classify one event, emitting notifications and updating the cache.
/// Returns the event's severity contribution.
pub fn classify_event<I: IndicatorLibrary, R: Reaction>(
    event: &ServiceEvent,
    profile: ScanProfile,
    cache: &mut FindingCache,
    indicators: &I,
    reaction: &mut R,
) -> u32 {
    let key = DedupKey::from_event(event);

    // Rule 1: dedup. Repeats of a confirmed-malicious pair re-notify;
    // repeats of a benign pair stay silent. No re-scanning either way.
    if let Some(prior) = cache.verdict_for(&key) {
        if prior {
            reaction.on_event_identified(&EventDetection::from_service_event(event));
        }
        return 0;
    }

    // Rule 2: LOLBin command line. Checked before any file I/O.
    if indicators.is_known_malicious_lolbin(&event.image_path_raw) {
        reaction.on_event_identified(&EventDetection::from_service_event(event));
        cache.record(key, true);
        return finish(RuleHit::Lolbin, event);
    }

    let image = ResolvedImage::resolve(indicators, &event.image_path_raw);

    // Rule 3: existing but unsigned binary. The content scan runs here and
    // rides on the file notification; it never gates the detection.
    if image.exists && !image.signed {
        reaction.on_event_identified(&EventDetection::from_service_event(event));
        let scan = indicators.scan_file_content(&image.path);
        reaction.on_file_identified(&FileDetection {
            path: image.path.clone(),
            exists: true,
            signed: false,
            scan: Some(scan),
        });
        cache.record(key, true);
        return finish(RuleHit::UnsignedBinary, event);
    }

    // Rule 4: PSExec service marker (case-sensitive substring)
    if event.service_name.contains("PSEXESVC") {
        reaction.on_event_identified(&EventDetection::from_service_event(event));
        cache.record(key, true);
        return finish(RuleHit::PsexecName, event);
    }

    // Rule 5: mimikatz / mimidrv markers (exact case)
    if event.service_name.contains("mimikatz")
        || event.service_name.contains("mimidrv")
        || image.path.contains("mimidrv.sys")
    {
        reaction.on_event_identified(&EventDetection::from_service_event(event));
        reaction.on_file_identified(&FileDetection {
            path: image.path.clone(),
            exists: image.exists,
            signed: image.signed,
            scan: None,
        });
        cache.record(key, true);
        return finish(RuleHit::MimikatzName, event);
    }

    // Rule 6: anomaly - missing image, or service name entropy outside
    // (3.00, 5.00) strict. MSF-generated psexec services land here.
    if profile.anomaly_rule_enabled() && is_name_anomaly(indicators, event, &image) {
        reaction.on_event_identified(&EventDetection::from_service_event(event));
        reaction.on_file_identified(&FileDetection {
            path: image.path.clone(),
            exists: image.exists,
            signed: image.signed,
            scan: None,
        });
        cache.record(key, true);
        return finish(RuleHit::NameAnomaly, event);
    }

    cache.record(key, false);
    0
}

fn is_name_anomaly<I: IndicatorLibrary>(
    indicators: &I,
    event: &ServiceEvent,
    image: &ResolvedImage,
) -> bool {
    if !image.exists {
        return true;
    }
    let entropy = indicators.shannon_entropy(&event.service_name);
    entropy < ENTROPY_LOW || entropy > ENTROPY_HIGH
}

fn finish(hit: RuleHit, event: &ServiceEvent) -> u32 {
    log::debug!(
        "Rule '{}' matched service '{}'",
        hit.as_str(),
        event.service_name
    );
    hit.severity()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(RuleHit::Lolbin.severity(), 1);
        assert_eq!(RuleHit::UnsignedBinary.severity(), 2);
        assert_eq!(RuleHit::PsexecName.severity(), 1);
        assert_eq!(RuleHit::MimikatzName.severity(), 2);
        assert_eq!(RuleHit::NameAnomaly.severity(), 2);
    }
}
