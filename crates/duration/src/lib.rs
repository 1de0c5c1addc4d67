//! Drought-duration threshold filtering.
//!
//! A drought-duration series holds `0` for time steps outside a drought and,
//! at the last step of each drought episode, the episode's total length.
//! This crate removes (zeroes) every episode shorter than a threshold.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │   episode     │────▶│    filter      │────▶│     matrix       │
//!  │  (scan/check) │     │ (zero short)   │     │ (rows, parallel) │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use drought_duration::{apply_duration_threshold, duration_thresholded};
//!
//! // A 2-step episode ending at index 2 and a 3-step episode ending at index 6.
//! let series = [0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0, 0.0];
//!
//! let kept = duration_thresholded(&series, 3.0).unwrap();
//! assert_eq!(kept, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0]);
//!
//! let mut in_place = series;
//! apply_duration_threshold(&mut in_place, 3.0).unwrap();
//! assert_eq!(in_place.as_slice(), kept.as_slice());
//! ```

pub mod config;
pub mod episode;
pub mod error;
pub mod filter;
pub mod matrix;

pub use config::FilterConfig;
pub use episode::{Episode, EpisodeSummary, Episodes, episodes, summarize, validate_series};
pub use error::DurationError;
pub use filter::{apply_duration_threshold, apply_duration_threshold_into, duration_thresholded};
pub use matrix::DurationMatrix;
