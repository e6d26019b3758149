//! # Mockup Pattern Detector
//!
//! Scans markup for repeating structures (cards, list items, navigation
//! links) and for well-known single sections (hero, banner, cta, ...).
//! Confidence mixes how often a group repeats with how similar the members'
//! child structures are.

pub mod classify;
pub mod detector;
pub mod options;
pub mod similarity;

pub use classify::{classify_pattern, PatternType};
pub use detector::{pattern_confidence, PatternDetectionResult, PatternDetector};
pub use options::PatternOptions;
