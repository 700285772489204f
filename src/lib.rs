#![doc(test(attr(deny(warnings))))]

//! Cadence answers two questions for a personal-finance app: which budget
//! period are we in, and how urgent is each recurring bill.
//!
//! The engine lives in `cadence-core`; this crate adds logging setup,
//! snapshot files, build metadata, and the `cadence_cli` binary.

pub mod cli;
pub mod errors;
pub mod utils;

pub use cadence_config as config;
pub use cadence_core as engine;
pub use cadence_domain as domain;

use serde::Serialize;

/// Initializes global tracing with the default `cadence=info` directive.
pub fn init() {
    init_with_filter(&config::Config::default_log_filter());
}

/// Initializes global tracing, layering `directive` over `RUST_LOG`. Later calls are no-ops.
pub fn init_with_filter(directive: &str) {
    utils::init_tracing(directive);
}

/// Compile-time provenance of this build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("CADENCE_BUILD_HASH"),
        git_status: env!("CADENCE_BUILD_STATUS"),
        timestamp: env!("CADENCE_BUILD_TIMESTAMP"),
        target: env!("CADENCE_BUILD_TARGET"),
        profile: env!("CADENCE_BUILD_PROFILE"),
        rustc: env!("CADENCE_BUILD_RUSTC"),
    }
}
