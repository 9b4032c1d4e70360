#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod ma;
pub mod pipeline;
pub mod report;
pub mod series;
pub mod signal;
pub mod universe;

pub use aggregate::breadth_fraction;
pub use config::BreadthConfig;
pub use error::BreadthError;
pub use ma::{rolling_mean, trailing_mean};
pub use pipeline::{compute_breadth, compute_breadth_with_diagnostics};
pub use report::{BreadthReport, Diagnostics, SectorRow};
pub use series::{Observation, PriceSeries, PriceStore};
pub use signal::{SymbolSignals, WindowSignal, above_average};
pub use universe::{Constituent, StockUniverse, UniverseDiagnostics};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
