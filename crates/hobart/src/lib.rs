#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export main types from sub-crates
pub use hobart_breadth as breadth;
pub use hobart_data as data;
pub use hobart_output as output;

// Re-export the common core types
pub use hobart_breadth::{
    BreadthConfig, BreadthError, BreadthReport, Constituent, Diagnostics, PriceSeries,
    PriceStore, StockUniverse, UniverseDiagnostics, compute_breadth,
    compute_breadth_with_diagnostics,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
