use crate::model::WordCloudLayout;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`; defaults to `chatlens`.
    pub diagram_id: Option<String>,
    /// CSS colour painted behind the words. Transparent when `None`.
    pub background: Option<String>,
    pub font_family: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            background: None,
            font_family: "sans-serif".to_string(),
        }
    }
}

pub fn render_word_cloud_svg(layout: &WordCloudLayout, options: &SvgRenderOptions) -> String {
    let diagram_id = escape_xml(options.diagram_id.as_deref().unwrap_or("chatlens"));
    let w = fmt(layout.canvas_width.max(1.0));
    let h = fmt(layout.canvas_height.max(1.0));

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{diagram_id}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="wordcloud">"#
    );
    if let Some(bg) = options.background.as_deref() {
        let _ = write!(
            &mut out,
            r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{fill}"/>"#,
            fill = escape_xml(bg)
        );
    }
    let _ = write!(
        &mut out,
        r#"<g class="words" font-family="{family}" text-anchor="middle" dominant-baseline="central">"#,
        family = escape_xml(&options.font_family)
    );
    for word in layout.placed() {
        let (cx, cy) = word.bounding_box.center();
        let _ = write!(
            &mut out,
            r#"<text x="{x}" y="{y}" font-size="{size}" fill="{fill}">{text}</text>"#,
            x = fmt(cx),
            y = fmt(cy),
            size = fmt(word.font_size),
            fill = escape_xml(&word.color),
            text = escape_xml(&word.text)
        );
    }
    out.push_str("</g></svg>");
    out
}

fn fmt(v: f64) -> String {
    // Round-trippable decimal form without `-0` or tiny float noise.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, PlacedWord};

    fn word(text: &str, placed: bool) -> PlacedWord {
        PlacedWord {
            text: text.to_string(),
            frequency: 1.0,
            font_size: 20.0,
            bounding_box: BoundingBox {
                x: 10.0,
                y: 20.0,
                width: 40.0,
                height: 24.0,
            },
            placed,
            color: "#36A2EB".to_string(),
            source_index: 0,
        }
    }

    #[test]
    fn only_placed_words_are_emitted_and_text_is_escaped() {
        let layout = WordCloudLayout {
            canvas_width: 800.0,
            canvas_height: 500.0,
            words: vec![word("<b>&co", true), word("hidden", false)],
        };
        let svg = render_word_cloud_svg(&layout, &SvgRenderOptions::default());
        assert!(svg.starts_with(r#"<svg id="chatlens""#));
        assert!(svg.contains(r#"viewBox="0 0 800 500""#));
        assert!(svg.contains(
            r##"<text x="30" y="32" font-size="20" fill="#36A2EB">&lt;b&gt;&amp;co</text>"##
        ));
        assert!(!svg.contains("hidden"));
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn background_rect_is_optional() {
        let layout = WordCloudLayout {
            canvas_width: 100.0,
            canvas_height: 50.0,
            words: Vec::new(),
        };
        let plain = render_word_cloud_svg(&layout, &SvgRenderOptions::default());
        assert!(!plain.contains("<rect"));

        let options = SvgRenderOptions {
            diagram_id: Some("cloud-1".to_string()),
            background: Some("white".to_string()),
            ..Default::default()
        };
        let svg = render_word_cloud_svg(&layout, &options);
        assert!(svg.contains(r#"id="cloud-1""#));
        assert!(svg.contains(r#"<rect x="0" y="0" width="100" height="50" fill="white"/>"#));
    }

    #[test]
    fn fmt_drops_float_noise() {
        assert_eq!(fmt(250.00000000000003), "250");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(12.5), "12.5");
    }
}
