use chatlens_core::WordCloudConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Substitutes the configured fallback for each dimension the host reports as missing
    /// (zero, negative or non-finite).
    pub fn or_fallback(width: f64, height: f64, config: &WordCloudConfig) -> Self {
        let pick = |v: f64, fallback: f64| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };
        Self {
            width: pick(width, config.fallback_width),
            height: pick(height, config.fallback_height),
        }
    }
}

/// Axis-aligned box, `x`/`y` being the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= width && self.bottom() <= height
    }

    /// True when the two boxes are closer than `margin` on both axes.
    pub fn collides_with(&self, other: &BoundingBox, margin: f64) -> bool {
        self.x < other.right() + margin
            && self.right() + margin > other.x
            && self.y < other.bottom() + margin
            && self.bottom() + margin > other.y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub text: String,
    /// Input frequency after clamping negatives to zero.
    pub frequency: f64,
    pub font_size: f64,
    /// Measured extents; the position is only meaningful when `placed` is true.
    pub bounding_box: BoundingBox,
    pub placed: bool,
    pub color: String,
    /// Position in the selected input prefix, before the size sort.
    pub source_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Every selected word, largest font first.
    pub words: Vec<PlacedWord>,
}

impl WordCloudLayout {
    pub fn empty(canvas: Canvas) -> Self {
        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            words: Vec::new(),
        }
    }

    pub fn placed(&self) -> impl Iterator<Item = &PlacedWord> {
        self.words.iter().filter(|w| w.placed)
    }

    pub fn placed_count(&self) -> usize {
        self.placed().count()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub value: f64,
    pub color: String,
    /// Share of the legend total, `0..=100`.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartModel {
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    pub begin_at_zero: bool,
    pub show_legend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartModel {
    pub title: String,
    pub entries: Vec<LegendEntry>,
    /// One tooltip per entry, index-aligned.
    pub tooltips: Vec<String>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableModel {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimelineKind {
    Daily,
    Monthly,
    Hourly,
}

impl TimelineKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Daily => "Daily Timeline",
            Self::Monthly => "Monthly Timeline",
            Self::Hourly => "Hourly Activity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartModel {
    pub kind: TimelineKind,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: String,
}
