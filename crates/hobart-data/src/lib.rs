#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod store;
pub mod yahoo;

pub use cache::{CacheStats, QuoteCache};
pub use error::{DataError, Result};
pub use store::price_store_from_frame;
pub use yahoo::{BatchCloses, YahooCloseProvider};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
