use super::*;

#[test]
fn deterministic_width_scales_with_font_size() {
    let measurer = DeterministicTextMeasurer::default();
    let m16 = measurer.measure("hello", &TextStyle::sized(16.0));
    assert_eq!(m16.width, 48.0);
    assert_eq!(m16.height, 19.2);
    assert_eq!(m16.line_count, 1);

    let m80 = measurer.measure("hello", &TextStyle::sized(80.0));
    assert_eq!(m80.width, 240.0);
    assert_eq!(m80.height, 96.0);
}

#[test]
fn wide_glyphs_take_two_columns() {
    let measurer = DeterministicTextMeasurer::default();
    let style = TextStyle::sized(10.0);
    let narrow = measurer.measure("ab", &style);
    let wide = measurer.measure("日本", &style);
    assert_eq!(narrow.width, 12.0);
    assert_eq!(wide.width, 24.0);
}

#[test]
fn line_breaks_grow_height_and_keep_widest_line() {
    let measurer = DeterministicTextMeasurer {
        char_width_factor: 0.5,
        line_height_factor: 1.0,
    };
    let m = measurer.measure("abcd\nab", &TextStyle::sized(10.0));
    assert_eq!(m.line_count, 2);
    assert_eq!(m.width, 20.0);
    assert_eq!(m.height, 20.0);
}

#[test]
fn markup_in_a_word_is_measured_as_plain_text() {
    let measurer = DeterministicTextMeasurer {
        char_width_factor: 0.5,
        line_height_factor: 1.0,
    };
    let m = measurer.measure("a<br>b", &TextStyle::sized(10.0));
    assert_eq!(m.line_count, 1);
    assert_eq!(m.width, 30.0);
    assert_eq!(m.height, 10.0);
}

#[test]
fn closures_are_measurers() {
    let fixed = |_text: &str, style: &TextStyle| TextMetrics::single_line(style.font_size, 1.0);
    let measurer: &dyn TextMeasurer = &fixed;
    assert_eq!(measurer.measure("anything", &TextStyle::sized(7.0)).width, 7.0);
}
