use chatlens_core::{ChatlensConfig, UserSelection, parse_results};
use chatlens_render::charts::{activity_bar, top_users_pie, top_users_table};
use chatlens_render::model::WordCloudLayout;
use chatlens_render::session::{ChartSlot, RenderPlan, SlotAction};
use chatlens_render::svg::{SvgRenderOptions, render_word_cloud_svg};
use chatlens_render::{Error, LayoutOptions, layout_results_word_cloud};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn load(name: &str) -> chatlens_core::AnalyticsResults {
    let path = workspace_root().join("fixtures").join("stats").join(name);
    let text = std::fs::read_to_string(&path).expect("fixture");
    parse_results(&text).expect("valid payload")
}

fn assert_no_overlap(layout: &WordCloudLayout, margin: f64) {
    let placed: Vec<_> = layout.placed().collect();
    for (i, a) in placed.iter().enumerate() {
        assert!(
            a.bounding_box
                .fits_within(layout.canvas_width, layout.canvas_height)
        );
        for b in &placed[i + 1..] {
            assert!(
                !a.bounding_box.collides_with(&b.bounding_box, margin),
                "{} overlaps {}",
                a.text,
                b.text
            );
        }
    }
}

#[test]
fn fixture_word_cloud_uses_fallback_canvas_and_keeps_invariants() {
    let results = load("overall.json");
    let options = LayoutOptions::default();
    let layout = layout_results_word_cloud(&results, 0.0, 0.0, &options).expect("layout ok");

    assert_eq!(layout.canvas_width, 800.0);
    assert_eq!(layout.canvas_height, 500.0);
    assert_eq!(layout.words.len(), 20);
    assert_eq!(layout.words[0].text, "tonight");
    assert_eq!(layout.words[0].font_size, 80.0);
    assert!(layout.words[0].placed);
    assert_eq!(layout.words.last().unwrap().font_size, 16.0);
    assert_no_overlap(&layout, options.config.word_cloud.margin);

    for w in &layout.words {
        assert!(w.bounding_box.width.is_finite() && w.bounding_box.width > 0.0);
        assert!(w.bounding_box.height.is_finite() && w.bounding_box.height > 0.0);
    }
}

#[test]
fn config_override_flows_through_layout_options() {
    let results = load("overall.json");
    let config =
        ChatlensConfig::from_json_str(r#"{"wordCloud":{"maxWords":5,"maxFontSize":40}}"#)
            .expect("config");
    let options = LayoutOptions {
        config,
        ..Default::default()
    };
    let layout = layout_results_word_cloud(&results, 640.0, 480.0, &options).expect("layout ok");
    assert_eq!(layout.words.len(), 5);
    assert_eq!(layout.words[0].font_size, 40.0);
    assert_eq!(layout.canvas_width, 640.0);
}

#[test]
fn fixture_svg_has_one_text_per_placed_word() {
    let results = load("overall.json");
    let layout =
        layout_results_word_cloud(&results, 800.0, 500.0, &LayoutOptions::default()).unwrap();
    let svg = render_word_cloud_svg(&layout, &SvgRenderOptions::default());
    assert_eq!(svg.matches("<text ").count(), layout.placed_count());
}

#[test]
fn fixture_user_payload_drops_top_user_charts() {
    let results = load("user.json");
    let selection = UserSelection::parse("Bruno");
    let plan = RenderPlan::for_results(&results, &selection);
    assert_eq!(plan.action(ChartSlot::TopUsersPie), SlotAction::Clear);
    assert_eq!(plan.action(ChartSlot::WordCloud), SlotAction::Render);

    let config = ChatlensConfig::default().charts;
    assert_eq!(activity_bar(&results, &config).values, [311.0, 9.0, 0.0]);
    assert!(top_users_pie(&results, &config).is_none());
    assert!(top_users_table(&results, &config).is_none());
}

#[test]
fn invalid_config_surfaces_as_core_error() {
    let results = load("overall.json");
    let mut options = LayoutOptions::default();
    options.config.word_cloud.max_words = 0;
    let err = layout_results_word_cloud(&results, 800.0, 500.0, &options).unwrap_err();
    match err {
        Error::Core(chatlens_core::Error::InvalidConfig { .. }) => {}
        Error::Core(other) => panic!("unexpected core error: {other}"),
        Error::InvalidArgument { message } => panic!("unexpected invalid argument: {message}"),
    }
}
