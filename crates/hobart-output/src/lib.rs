#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod frame;
pub mod render;

pub use export::{ExportError, ExportFormat, Exporter};
pub use frame::{detail_frame, sector_frame};
pub use render::BreadthDashboard;
