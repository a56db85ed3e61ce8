//! Indicator Library - Maliciousness Signals
//!
//! Narrow seam between the classification chain and the expensive checks
//! (lolbin table, filesystem, signature verification, byte scanning).
//! The hunt consumes this through the `IndicatorLibrary` trait so scans
//! stay testable without a live system.

pub mod content_scan;
pub mod entropy;
pub mod image_path;
pub mod lolbin;
pub mod signature;

pub use content_scan::ScanVerdict;
pub use signature::SignatureStatus;

// ============================================================================
// TRAIT
// ============================================================================

/// The indicator operations the classification chain consumes.
///
/// Every operation is total: empty strings and unreadable paths produce
/// conservative answers, never errors.
pub trait IndicatorLibrary {
    /// Does the raw command line match a known-malicious LOLBin pattern?
    fn is_known_malicious_lolbin(&self, command_line: &str) -> bool;

    /// Recover the on-disk image path from a raw command line
    fn extract_image_path(&self, command_line: &str) -> String;

    /// Does the path point at an existing file? (stat failure = no)
    fn file_exists(&self, path: &str) -> bool;

    /// Is the file cryptographically signed? (check failure = no)
    fn file_is_signed(&self, path: &str) -> bool;

    /// Byte-content scan; verdict rides on notifications, never gates
    fn scan_file_content(&self, path: &str) -> ScanVerdict;

    /// Shannon entropy of a symbol stream
    fn shannon_entropy(&self, text: &str) -> f64 {
        entropy::shannon_entropy(text)
    }
}

// ============================================================================
// SYSTEM IMPLEMENTATION
// ============================================================================

/// Production indicator library backed by the local system
pub struct SystemIndicators;

impl IndicatorLibrary for SystemIndicators {
    fn is_known_malicious_lolbin(&self, command_line: &str) -> bool {
        lolbin::is_known_malicious_lolbin(command_line)
    }

    fn extract_image_path(&self, command_line: &str) -> String {
        image_path::extract_image_path(command_line)
    }

    fn file_exists(&self, path: &str) -> bool {
        signature::file_exists(path)
    }

    fn file_is_signed(&self, path: &str) -> bool {
        signature::file_is_signed(path)
    }

    fn scan_file_content(&self, path: &str) -> ScanVerdict {
        content_scan::scan_file_content(path)
    }
}
