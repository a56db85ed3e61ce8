//! Logic Module - Hunt Engines & Collaborators
//!
//! Chứa các engines xử lý: Event Log Adapter, Indicator Library, Hunt, Reaction.
//!
//! ## Architecture
//! - `eventlog/` - Service-creation event acquisition (System/7045)
//! - `indicators/` - Lolbin table, image path extraction, signature, entropy
//! - `hunt/` - Classification engine, finding cache, scan profiles
//! - `reaction/` - Detection sinks (begin/event/file/end notifications)

pub mod eventlog;
pub mod indicators;
pub mod hunt;
pub mod reaction;
