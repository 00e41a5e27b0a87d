use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Colours cycled by word clouds and chart legends.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#36A2EB", "#FF6384", "#4BC0C0", "#FF9F40", "#9966FF", "#FFCD56", "#C9CBCF", "#2E8B57",
];

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect()
}

/// Word-cloud layout knobs. Every field has a default, so a partial JSON object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WordCloudConfig {
    /// Entries kept from the head of the input (positional, not by frequency).
    pub max_words: usize,
    pub min_font_size: f64,
    pub max_font_size: f64,
    /// Spiral angle increment, in radians.
    pub angle_step: f64,
    /// Radius added after each full spiral revolution, in pixels.
    pub radius_step: f64,
    /// Minimum gap kept between placed words, in pixels.
    pub margin: f64,
    /// Canvas size used when the host surface reports no intrinsic size.
    pub fallback_width: f64,
    pub fallback_height: f64,
    pub font_family: Option<String>,
    pub palette: Vec<String>,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            max_words: 50,
            min_font_size: 16.0,
            max_font_size: 80.0,
            angle_step: 0.3,
            radius_step: 5.0,
            margin: 8.0,
            fallback_width: 800.0,
            fallback_height: 500.0,
            font_family: None,
            palette: default_palette(),
        }
    }
}

impl WordCloudConfig {
    pub fn validate(&self) -> Result<()> {
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if self.max_words == 0 {
            return Err(Error::invalid_config("wordCloud.maxWords must be at least 1"));
        }
        if !finite_positive(self.min_font_size) || !finite_positive(self.max_font_size) {
            return Err(Error::invalid_config(
                "wordCloud font sizes must be finite and positive",
            ));
        }
        if self.min_font_size > self.max_font_size {
            return Err(Error::invalid_config(format!(
                "wordCloud.minFontSize ({}) exceeds maxFontSize ({})",
                self.min_font_size, self.max_font_size
            )));
        }
        if !finite_positive(self.angle_step) || !finite_positive(self.radius_step) {
            return Err(Error::invalid_config(
                "wordCloud spiral steps must be finite and positive",
            ));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(Error::invalid_config("wordCloud.margin must be finite and >= 0"));
        }
        if !finite_positive(self.fallback_width) || !finite_positive(self.fallback_height) {
            return Err(Error::invalid_config(
                "wordCloud fallback canvas size must be finite and positive",
            ));
        }
        if self.palette.is_empty() {
            return Err(Error::invalid_config("wordCloud.palette must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ChartConfig {
    /// Slices shown by the top-users and emoji pies.
    pub pie_limit: usize,
    /// Rows shown by the top-users table.
    pub table_limit: usize,
    pub palette: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            pie_limit: 5,
            table_limit: 10,
            palette: default_palette(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ChatlensConfig {
    pub word_cloud: WordCloudConfig,
    pub charts: ChartConfig,
}

impl ChatlensConfig {
    /// Parses a (possibly partial) JSON config and validates it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.word_cloud.validate()?;
        if self.charts.palette.is_empty() {
            return Err(Error::invalid_config("charts.palette must not be empty"));
        }
        Ok(())
    }
}
