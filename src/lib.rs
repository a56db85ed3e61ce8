//! SvcHunter Core - Service Creation Hunt Engine
//!
//! Heuristic classification of Windows service-installation telemetry
//! (System/7045): known LOLBin command lines, unsigned binaries, remote
//! execution artifacts, credential-dumping tooling, anomalous names.

pub mod constants;
pub mod logic;
