#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/optima-ads/optima/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod account;
pub mod sample;

// Re-export main types from sub-crates
pub use optima_budget as budget;
pub use optima_metrics as metrics;

pub use account::{Account, Marketplace};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
