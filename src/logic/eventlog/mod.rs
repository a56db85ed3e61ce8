//! Event Log Adapter - Service Creation Events
//!
//! Mục đích: Lấy các event 7045 (service mới được cài) từ System channel.
//!
//! The production source shells out to PowerShell `Get-WinEvent` with an
//! XPath filter and parses the JSON back. Any failure degrades to an empty
//! batch - a scan over zero events is still a valid scan.

pub mod types;

use std::process::Command;

use serde_json::Value;

use crate::constants::{SERVICE_CHANNEL, SERVICE_INSTALL_EVENT_ID};
use types::{EventQuery, ServiceEvent};

// ============================================================================
// QUERY CONSTRUCTION
// ============================================================================

/// Build the service-creation query: System channel, event id 7045,
/// selecting the four named EventData fields.
pub fn service_creation_query() -> EventQuery {
    EventQuery::new(SERVICE_CHANNEL, SERVICE_INSTALL_EVENT_ID)
        .with_selector("ServiceName")
        .with_selector("ImagePath")
        .with_selector("ServiceType")
        .with_selector("StartType")
}

// ============================================================================
// EVENT SOURCE
// ============================================================================

/// Source of recorded service-creation events
///
/// The hunt does not depend on event order for correctness, only for
/// first-seen-wins cache behavior.
pub trait EventSource {
    fn query_events(&self, query: &EventQuery) -> Vec<ServiceEvent>;
}

/// Production source backed by the Windows event log (via PowerShell)
pub struct SystemEventLog;

impl EventSource for SystemEventLog {
    fn query_events(&self, query: &EventQuery) -> Vec<ServiceEvent> {
        if !crate::constants::is_powershell_enabled() {
            log::warn!("PowerShell collaborators disabled, returning empty event batch");
            return Vec::new();
        }

        for selector in &query.selectors {
            log::debug!("Requesting event field {}", selector.xpath());
        }

        let ps_script = build_query_script(query);

        let output = match Command::new("powershell")
            .args(["-NoProfile", "-Command", &ps_script])
            .output()
        {
            Ok(out) => out,
            Err(e) => {
                log::warn!("Event log query failed to launch: {}", e);
                return Vec::new();
            }
        };

        if !output.status.success() {
            log::warn!(
                "Event log query exited with error: {}",
                String::from_utf8_lossy(&output.stderr)
            );
            return Vec::new();
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_event_json(stdout.trim(), query)
    }
}

// ============================================================================
// INTERNAL IMPLEMENTATION
// ============================================================================

/// Render the PowerShell pipeline for a query
///
/// Each event's EventData is flattened into an object keyed by the
/// selector names, so the JSON side mirrors the query's field list.
fn build_query_script(query: &EventQuery) -> String {
    let fields = query
        .selectors
        .iter()
        .map(|s| format!("'{}' = $data['{}']", s.name, s.name))
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        r#"
        Get-WinEvent -LogName '{}' -FilterXPath '{}' -ErrorAction SilentlyContinue |
        ForEach-Object {{
            $xml = [xml]$_.ToXml()
            $data = @{{}}
            foreach ($d in $xml.Event.EventData.Data) {{ $data[[string]$d.Name] = [string]$d.'#text' }}
            [pscustomobject]@{{ {} }}
        }} | ConvertTo-Json -Compress
        "#,
        query.channel,
        query.filter_xpath(),
        fields
    )
}

/// Parse ConvertTo-Json output (single object or array) into events
fn parse_event_json(json_str: &str, query: &EventQuery) -> Vec<ServiceEvent> {
    if json_str.is_empty() {
        return Vec::new();
    }

    let parsed: Value = match serde_json::from_str(json_str) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Could not parse event log JSON: {}", e);
            return Vec::new();
        }
    };

    // ConvertTo-Json unwraps single-element pipelines to a bare object
    let records: Vec<&Value> = match &parsed {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![&parsed],
        _ => {
            log::warn!("Unexpected event log JSON shape");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .map(|record| {
            let get = |name: &str| -> String {
                // Absent or null properties are empty strings, not errors
                if query.selectors.iter().any(|s| s.name == name) {
                    record
                        .get(name)
                        .and_then(|v| v.as_str())
                        .unwrap_or("")
                        .to_string()
                } else {
                    String::new()
                }
            };

            ServiceEvent {
                service_name: get("ServiceName"),
                image_path_raw: get("ImagePath"),
                service_type: get("ServiceType"),
                start_type: get("StartType"),
            }
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
