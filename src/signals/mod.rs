//! Signals: the evidence model consumed by the resolver
//!
//! - [`catalog`]: the closed set of signal ids and their categories
//! - [`signal`]: `Signal`, `RawSignal` and the ordered `SignalSet`
//! - [`table`]: static file/content patterns used by the detector

pub mod catalog;
pub mod signal;
pub mod table;

pub use catalog::{SignalCategory, SignalId, SIGNAL_CATALOG_VERSION};
pub use signal::{RawSignal, Signal, SignalSet};
pub use table::{FilePattern, MatchSpec, DETECTION_TABLE};
