//! Close-price fetching from Yahoo Finance.

pub mod quotes;

pub use quotes::{BatchCloses, YahooCloseProvider};
