//! Greedy spiral word-cloud layout.
//!
//! Words are sized linearly between the configured font bounds by frequency, then placed
//! largest-first along an Archimedean spiral from the canvas centre. A candidate is accepted
//! when its box is fully inside the canvas and keeps `margin` pixels from every box placed
//! before it. Words that reach the spiral's maximum radius without a slot stay unplaced.

use crate::model::{BoundingBox, Canvas, PlacedWord, WordCloudLayout};
use crate::text::{TextMeasurer, TextStyle};
use crate::{Error, Result};
use chatlens_core::{WordCloudConfig, WordFrequency};
use std::f64::consts::TAU;

pub fn layout_word_cloud(
    words: &[WordFrequency],
    canvas_width: f64,
    canvas_height: f64,
    measurer: &dyn TextMeasurer,
) -> Result<WordCloudLayout> {
    layout_word_cloud_with_config(
        words,
        canvas_width,
        canvas_height,
        measurer,
        &WordCloudConfig::default(),
    )
}

pub fn layout_word_cloud_with_config(
    words: &[WordFrequency],
    canvas_width: f64,
    canvas_height: f64,
    measurer: &dyn TextMeasurer,
    config: &WordCloudConfig,
) -> Result<WordCloudLayout> {
    config.validate()?;
    if !(canvas_width.is_finite() && canvas_width > 0.0) {
        return Err(Error::invalid_argument(format!(
            "canvas width must be a positive number, got {canvas_width}"
        )));
    }
    if !(canvas_height.is_finite() && canvas_height > 0.0) {
        return Err(Error::invalid_argument(format!(
            "canvas height must be a positive number, got {canvas_height}"
        )));
    }
    let canvas = Canvas::new(canvas_width, canvas_height);

    // Positional truncation: the backend sends words most-frequent first.
    let selected = &words[..words.len().min(config.max_words)];
    if selected.is_empty() {
        return Ok(WordCloudLayout::empty(canvas));
    }
    if let Some(bad) = selected.iter().find(|w| !w.frequency.is_finite()) {
        return Err(Error::invalid_argument(format!(
            "word {:?} has a non-finite frequency ({})",
            bad.text, bad.frequency
        )));
    }

    let mut entries = size_words(selected, config);
    entries.sort_by(|a, b| b.font_size.total_cmp(&a.font_size));

    let mut placed_boxes: Vec<BoundingBox> = Vec::with_capacity(entries.len());
    for entry in &mut entries {
        let style = TextStyle {
            font_family: config.font_family.clone(),
            font_size: entry.font_size,
            font_weight: None,
        };
        let metrics = measurer.measure(&entry.text, &style);
        entry.bounding_box.width = metrics.width;
        entry.bounding_box.height = metrics.height;

        match spiral_search(metrics.width, metrics.height, canvas, config, &placed_boxes) {
            Some(found) => {
                entry.bounding_box = found;
                entry.placed = true;
                placed_boxes.push(found);
            }
            None => {
                tracing::trace!(
                    text = entry.text.as_str(),
                    font_size = entry.font_size,
                    "no free spiral position"
                );
            }
        }
    }

    tracing::debug!(
        selected = entries.len(),
        placed = placed_boxes.len(),
        width = canvas.width,
        height = canvas.height,
        "word cloud laid out"
    );

    Ok(WordCloudLayout {
        canvas_width: canvas.width,
        canvas_height: canvas.height,
        words: entries,
    })
}

/// Maps frequencies onto `[min_font_size, max_font_size]`, in input order.
fn size_words(selected: &[WordFrequency], config: &WordCloudConfig) -> Vec<PlacedWord> {
    let frequencies: Vec<f64> = selected.iter().map(|w| w.frequency.max(0.0)).collect();
    let max_freq = frequencies.iter().copied().fold(f64::MIN, f64::max);
    let min_freq = frequencies.iter().copied().fold(f64::MAX, f64::min);
    let range = if max_freq == min_freq {
        1.0
    } else {
        max_freq - min_freq
    };
    let font_range = config.max_font_size - config.min_font_size;

    selected
        .iter()
        .zip(frequencies)
        .enumerate()
        .map(|(i, (word, frequency))| {
            let scale = (frequency - min_freq) / range;
            PlacedWord {
                text: word.text.clone(),
                frequency,
                font_size: config.min_font_size + font_range * scale,
                bounding_box: BoundingBox::default(),
                placed: false,
                color: config.palette[i % config.palette.len()].clone(),
                source_index: i,
            }
        })
        .collect()
}

fn spiral_search(
    width: f64,
    height: f64,
    canvas: Canvas,
    config: &WordCloudConfig,
    placed: &[BoundingBox],
) -> Option<BoundingBox> {
    if width > canvas.width || height > canvas.height {
        return None;
    }

    let center_x = canvas.width / 2.0;
    let center_y = canvas.height / 2.0;
    let max_radius = canvas.width.min(canvas.height) / 2.0;

    let mut angle: f64 = 0.0;
    let mut radius: f64 = 0.0;
    while radius <= max_radius {
        let candidate = BoundingBox {
            x: center_x + radius * angle.cos() - width / 2.0,
            y: center_y + radius * angle.sin() - height / 2.0,
            width,
            height,
        };
        if candidate.fits_within(canvas.width, canvas.height)
            && !placed
                .iter()
                .any(|b| b.collides_with(&candidate, config.margin))
        {
            return Some(candidate);
        }

        // Every angle at radius 0 yields the same candidate.
        if radius == 0.0 {
            angle = 0.0;
            radius += config.radius_step;
            continue;
        }

        angle += config.angle_step;
        if angle > TAU {
            angle = 0.0;
            radius += config.radius_step;
        }
    }
    None
}
