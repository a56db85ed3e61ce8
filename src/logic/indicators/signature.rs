//! Signature Check - Kiểm tra chữ ký số của service binary
//!
//! Windows sử dụng Authenticode để ký file. The hunt only needs a yes/no:
//! an existing service binary with no valid signature is a detection on
//! its own. Lookup failures degrade to the conservative default (treated
//! as unsigned) so the rule chain keeps moving.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;

// ============================================================================
// CACHE
// ============================================================================

/// Cache kết quả signature check (tránh verify lại nhiều lần)
static SIGNATURE_CACHE: Lazy<RwLock<HashMap<String, SignatureStatus>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

const CACHE_MAX_SIZE: usize = 1000;

// ============================================================================
// STATUS
// ============================================================================

/// Outcome of an Authenticode check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SignatureStatus {
    /// Valid signature present
    Signed { publisher: String },
    /// No signature
    Unsigned,
    /// Check failed (file unreadable, tool missing, parse error)
    Error { message: String },
}

impl SignatureStatus {
    pub fn is_signed(&self) -> bool {
        matches!(self, SignatureStatus::Signed { .. })
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Does the path point at an existing file?
pub fn file_exists(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    // Stat failure (permissions, bad path) reads as non-existent
    Path::new(path).is_file()
}

/// Is the file cryptographically signed?
///
/// Errors degrade to `false` - an unverifiable binary is treated the same
/// as an unsigned one.
pub fn file_is_signed(path: &str) -> bool {
    check_signature(path).is_signed()
}

/// Full signature status with caching
pub fn check_signature(path: &str) -> SignatureStatus {
    if let Some(cached) = SIGNATURE_CACHE.read().get(path) {
        return cached.clone();
    }

    let status = check_signature_internal(path);

    {
        let mut cache = SIGNATURE_CACHE.write();
        // Simple eviction: drop half when full
        if cache.len() >= CACHE_MAX_SIZE {
            let keys: Vec<_> = cache.keys().take(CACHE_MAX_SIZE / 2).cloned().collect();
            for key in keys {
                cache.remove(&key);
            }
        }
        cache.insert(path.to_string(), status.clone());
    }

    status
}

/// Clear the signature cache
pub fn clear_cache() {
    SIGNATURE_CACHE.write().clear();
}

// ============================================================================
// INTERNAL IMPLEMENTATION
// ============================================================================

/// Verify signature using PowerShell Get-AuthenticodeSignature
fn check_signature_internal(path: &str) -> SignatureStatus {
    if !file_exists(path) {
        return SignatureStatus::Error {
            message: "File not found".to_string(),
        };
    }

    if !crate::constants::is_powershell_enabled() {
        return SignatureStatus::Unsigned;
    }

    let ps_script = format!(
        r#"
        $sig = Get-AuthenticodeSignature -FilePath '{}'
        @{{
            'Status' = $sig.Status.ToString()
            'Subject' = if ($sig.SignerCertificate) {{ $sig.SignerCertificate.Subject }} else {{ $null }}
        }} | ConvertTo-Json -Compress
        "#,
        path
    );

    let output = match Command::new("powershell")
        .args(["-NoProfile", "-Command", &ps_script])
        .output()
    {
        Ok(out) => out,
        Err(e) => {
            return SignatureStatus::Error {
                message: format!("PowerShell execution failed: {}", e),
            };
        }
    };

    if !output.status.success() {
        return SignatureStatus::Error {
            message: String::from_utf8_lossy(&output.stderr).to_string(),
        };
    }

    parse_signature_result(&String::from_utf8_lossy(&output.stdout))
}

/// Parse kết quả từ PowerShell
fn parse_signature_result(json_str: &str) -> SignatureStatus {
    let parsed: serde_json::Value = match serde_json::from_str(json_str.trim()) {
        Ok(v) => v,
        Err(_) => return parse_signature_fallback(json_str),
    };

    match parsed["Status"].as_str().unwrap_or("") {
        "Valid" => {
            let subject = parsed["Subject"].as_str().unwrap_or("");
            SignatureStatus::Signed {
                publisher: extract_cn(subject),
            }
        }
        "NotSigned" => SignatureStatus::Unsigned,
        "" => SignatureStatus::Error {
            message: "No status in signature result".to_string(),
        },
        // HashMismatch, NotTrusted, UnknownError - not a valid signature
        _ => SignatureStatus::Unsigned,
    }
}

/// Fallback parsing khi JSON parse fail
fn parse_signature_fallback(output: &str) -> SignatureStatus {
    let output_lower = output.to_lowercase();

    if output_lower.contains("valid") {
        SignatureStatus::Signed {
            publisher: "Unknown".to_string(),
        }
    } else if output_lower.contains("notsigned") {
        SignatureStatus::Unsigned
    } else {
        SignatureStatus::Error {
            message: "Could not parse signature result".to_string(),
        }
    }
}

/// Extract Common Name (CN) from certificate subject
fn extract_cn(subject: &str) -> String {
    // Subject format: CN=Vendor Inc, O=Vendor, ...
    for part in subject.split(',') {
        let part = part.trim();
        if let Some(cn) = part.strip_prefix("CN=").or_else(|| part.strip_prefix("cn=")) {
            return cn.to_string();
        }
    }

    subject.split(',').next().unwrap_or(subject).trim().to_string()
}

// ============================================================================
// TESTS
// ============================================================================
