//! SvcHunter Core - Main Entry Point
//!
//! On-demand scan of recorded service-creation events. Detections go to
//! the log sink; the scan summary lands on stdout as JSON.

use svc_hunter_core::constants;
use svc_hunter_core::logic::hunt;
use svc_hunter_core::logic::hunt::types::ScanProfile;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", constants::APP_NAME, constants::APP_VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Monitoring declaration for callers that pre-register live watching
    if args.iter().any(|a| a == "--monitored-events") {
        let monitored = hunt::monitoring_events();
        println!("{}", serde_json::to_string_pretty(&monitored).unwrap_or_default());
        return;
    }

    let profile = if args.iter().any(|a| a == "--intensive") {
        ScanProfile::Intensive
    } else if args.iter().any(|a| a == "--normal") {
        ScanProfile::Normal
    } else {
        ScanProfile::from_name(&constants::get_scan_profile_name())
    };

    let result = match profile {
        ScanProfile::Normal => hunt::scan_normal(),
        ScanProfile::Intensive => hunt::scan_intensive(),
    };

    log::info!(
        "Scan complete: {} detections over {} events ({} cache hits, {} ms)",
        result.detections,
        result.events_processed,
        result.cache_hits,
        result.duration_ms
    );

    println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
}
