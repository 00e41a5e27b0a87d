#![forbid(unsafe_code)]

//! Headless layout and chart models for the chatlens dashboard.
//!
//! Nothing here draws: layouts and chart models are plain data handed to whatever surface the
//! host owns. [`svg`] is the one built-in consumer, for headless previews.

pub mod charts;
pub mod model;
pub mod session;
pub mod svg;
pub mod text;
pub mod wordcloud;

use crate::model::{Canvas, WordCloudLayout};
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use chatlens_core::{AnalyticsResults, ChatlensConfig};
use std::sync::Arc;

pub use wordcloud::{layout_word_cloud, layout_word_cloud_with_config};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
    #[error(transparent)]
    Core(#[from] chatlens_core::Error),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub config: ChatlensConfig,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            config: ChatlensConfig::default(),
        }
    }
}

/// Lays out the payload's `word_cloud` series. Missing canvas dimensions (`<= 0`) take the
/// configured fallback size.
pub fn layout_results_word_cloud(
    results: &AnalyticsResults,
    canvas_width: f64,
    canvas_height: f64,
    options: &LayoutOptions,
) -> Result<WordCloudLayout> {
    let config = &options.config.word_cloud;
    let canvas = Canvas::or_fallback(canvas_width, canvas_height, config);
    layout_word_cloud_with_config(
        &results.word_cloud,
        canvas.width,
        canvas.height,
        options.text_measurer.as_ref(),
        config,
    )
}
