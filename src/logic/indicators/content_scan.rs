//! Content Scan - Byte-pattern scan of suspect binaries
//!
//! Stands in where a full rule-matching engine would sit. The verdict is
//! attached to the file notification for the analyst; the rule chain never
//! branches on it. Unreadable files yield a clean verdict.

use serde::Serialize;
use sha2::{Digest, Sha256};

// ============================================================================
// PATTERN TABLE
// ============================================================================

/// Byte patterns of known credential-dumping / implant tooling
static CONTENT_PATTERNS: &[(&str, &[u8])] = &[
    ("tool_mimikatz_banner", b"mimikatz"),
    ("tool_mimikatz_module", b"sekurlsa"),
    ("tool_mimikatz_author", b"gentilkiwi"),
    ("tool_mimikatz_ps", b"Invoke-Mimikatz"),
    ("implant_meterpreter", b"meterpreter"),
    ("implant_reflective_loader", b"ReflectiveLoader"),
    ("implant_cobalt_pipe", b"\\\\.\\pipe\\msagent_"),
];

// ============================================================================
// VERDICT
// ============================================================================

/// Result of a byte-content scan. Opaque to the classification chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanVerdict {
    pub matched: bool,
    /// Name of the first matching pattern
    pub rule: Option<String>,
    /// SHA-256 of the scanned content, when readable
    pub sha256: Option<String>,
}

impl ScanVerdict {
    pub fn clean() -> Self {
        Self::default()
    }
}

// ============================================================================
// SCAN
// ============================================================================

/// Scan a file's bytes against the pattern table
pub fn scan_file_content(path: &str) -> ScanVerdict {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("Content scan could not read {}: {}", path, e);
            return ScanVerdict::clean();
        }
    };

    let sha256 = {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        hex::encode(hasher.finalize())
    };

    let hit = CONTENT_PATTERNS
        .iter()
        .find(|(_, pattern)| contains_bytes(&bytes, pattern));

    ScanVerdict {
        matched: hit.is_some(),
        rule: hit.map(|(name, _)| name.to_string()),
        sha256: Some(sha256),
    }
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() || haystack.len() < needle.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_clean_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"ordinary service binary bytes").unwrap();

        let verdict = scan_file_content(&tmp.path().to_string_lossy());
        assert!(!verdict.matched);
        assert!(verdict.rule.is_none());
        assert!(verdict.sha256.is_some());
    }

    #[test]
    fn test_pattern_hit() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"prefix sekurlsa::logonpasswords suffix").unwrap();

        let verdict = scan_file_content(&tmp.path().to_string_lossy());
        assert!(verdict.matched);
        assert_eq!(verdict.rule.as_deref(), Some("tool_mimikatz_module"));
    }

    #[test]
    fn test_unreadable_file_is_clean() {
        let verdict = scan_file_content(r"Z:\no\such\file.exe");
        assert_eq!(verdict, ScanVerdict::clean());
        assert!(verdict.sha256.is_none());
    }

    #[test]
    fn test_contains_bytes() {
        assert!(contains_bytes(b"abcdef", b"cde"));
        assert!(!contains_bytes(b"abc", b"abcd"));
        assert!(!contains_bytes(b"abc", b""));
    }
}
