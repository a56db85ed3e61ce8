//! Central Configuration Constants
//!
//! Single source of truth for all scan defaults.
//! To change the monitored channel or thresholds, only edit this file.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "SvcHunter";

/// Audit log channel carrying service installation events
pub const SERVICE_CHANNEL: &str = "System";

/// Event id fired when a new service is registered
pub const SERVICE_INSTALL_EVENT_ID: u32 = 7045;

/// Service names with entropy below this look machine-generated
/// (strict inequality - a name at exactly 3.00 is not flagged)
pub const ENTROPY_LOW: f64 = 3.00;

/// Service names with entropy above this look machine-generated
/// (strict inequality - a name at exactly 5.00 is not flagged)
pub const ENTROPY_HIGH: f64 = 5.00;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get scan profile name from environment ("normal" | "intensive")
pub fn get_scan_profile_name() -> String {
    std::env::var("SCAN_PROFILE").unwrap_or_else(|_| "normal".to_string())
}

/// Check if PowerShell-backed collaborators are enabled
///
/// Cho phép tắt các lệnh PowerShell khi chạy ngoài Windows (CI, dev).
pub fn is_powershell_enabled() -> bool {
    std::env::var("HUNTER_DISABLE_POWERSHELL")
        .map(|s| s.to_lowercase() != "true" && s != "1")
        .unwrap_or(true)
}
