#![forbid(unsafe_code)]

//! Typed analytics payload and configuration for the chatlens dashboard (headless).
//!
//! The analytics backend owns chat parsing and every statistic; this crate only describes the
//! shape of what it returns, validates it once at the boundary, and carries the knobs the
//! renderer reads.

pub mod config;
pub mod error;
pub mod payload;

pub use config::{ChartConfig, ChatlensConfig, WordCloudConfig};
pub use error::{Error, Result};
pub use payload::{
    AnalyticsResults, EmojiCount, ErrorResponse, StatsRequest, StatsResponse, TimelinePoint,
    UploadResponse, UserSelection, WordFrequency, parse_results,
};
