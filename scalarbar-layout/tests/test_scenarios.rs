use float_cmp::assert_approx_eq;
use ordered_float::OrderedFloat;
use rstest::rstest;
use scalarbar_colors::LookupTable;
use scalarbar_common::types::{LayoutBox, Orientation, TextPosition};
use scalarbar_layout::frame::MAX_FRAME_EXTENT;
use scalarbar_layout::{compute_layout, LayoutResult, ScalarBarConfig, ViewportRect};
use scalarbar_text::measurement::heuristic::HeuristicTextMeasurer;
use scalarbar_text::types::TextProperty;

fn ramp(range: (f64, f64)) -> LookupTable {
    LookupTable::try_linear_ramp([0.0, 0.0, 1.0, 1.0], [1.0, 0.0, 0.0, 1.0], 16, range).unwrap()
}

fn layout(config: &ScalarBarConfig, colors: &LookupTable, size: [i32; 2]) -> LayoutResult {
    compute_layout(
        &ViewportRect::from_origin_size([0, 0], size),
        config,
        colors,
        &HeuristicTextMeasurer::default(),
        None,
    )
    .unwrap()
}

fn disjoint(a: [f64; 2], b: [f64; 2]) -> bool {
    a[1] <= b[0] + 1e-9 || b[1] <= a[0] + 1e-9
}

#[test]
fn test_vertical_ticks_span_range() {
    let colors = ramp((0.0, 100.0));
    let result = layout(&ScalarBarConfig::default(), &colors, [200, 400]);

    let values: Vec<f64> = result.tick_labels.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    assert!(result.boxes.scalar_bar.length() < 400);
    assert!(result.boxes.scalar_bar.length() > 0);

    let items = &result.geometry.tick_labels;
    assert_eq!(items.len(), 5);
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            let a = [items[i].bounds[2], items[i].bounds[3]];
            let b = [items[j].bounds[2], items[j].bounds[3]];
            assert!(disjoint(a, b), "tick labels {i} and {j} overlap");
        }
    }
}

#[test]
fn test_tick_labels_use_label_format() {
    let colors = ramp((0.0, 100.0));
    let config = ScalarBarConfig {
        label_format: "%.1f".to_string(),
        number_of_labels: 3,
        ..Default::default()
    };
    let result = layout(&config, &colors, [200, 400]);
    let texts: Vec<&str> = result.tick_labels.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["0.0", "50.0", "100.0"]);
}

#[test]
fn test_log_scale_ticks_are_powers_of_ten() {
    let colors = ramp((1.0, 10000.0)).with_log_scale(true).unwrap();
    let result = layout(&ScalarBarConfig::default(), &colors, [200, 400]);
    let expected = [1.0, 10.0, 100.0, 1000.0, 10000.0];
    assert_eq!(result.tick_labels.len(), expected.len());
    for (tick, expected) in result.tick_labels.iter().zip(expected) {
        assert_approx_eq!(f64, tick.value, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_indexed_categories_with_nan() {
    let colors = LookupTable::try_new(
        vec![
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
        ],
        (0.0, 2.0),
    )
    .unwrap()
    .with_indexed_lookup(true)
    .with_annotation("granite", "Granite")
    .with_annotation("basalt", "Basalt")
    .with_annotation("shale", "Shale");
    let config = ScalarBarConfig {
        draw_nan_annotation: true,
        ..Default::default()
    };
    let result = layout(&config, &colors, [200, 400]);

    assert_eq!(result.labels.len(), 4);
    let nan = result.boxes.nan;
    let center = nan.posn[1] as f64 + nan.size[1] as f64 / 2.0;
    let entry = result.labels.get(&OrderedFloat(center)).unwrap();
    assert_eq!(entry.text, "NaN");

    // the first category sits at the top of a vertical bar
    let texts: Vec<&str> = result.labels.values().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["NaN", "Shale", "Basalt", "Granite"]);

    let swatches = &result.geometry.annotation_swatches;
    assert_eq!(swatches.points.len(), 12);
    assert_eq!(swatches.triangles.len(), 6);
    assert_eq!(swatches.triangles[0].color, [255, 0, 0, 255]);
    assert!(result.geometry.color_bar.is_empty());
    assert!(result.tick_labels.is_empty());
    assert!(result.geometry.nan_swatch.is_some());
}

#[test]
fn test_dense_horizontal_annotations_spread_outward() {
    let mut colors = ramp((0.0, 6.0));
    for i in 0..7 {
        colors = colors.with_annotation(i as f64, format!("Annotation {i}"));
    }
    let config = ScalarBarConfig {
        orientation: Orientation::Horizontal,
        ..Default::default()
    };
    let result = layout(&config, &colors, [400, 100]);
    assert_eq!(result.annotations.len(), 7);

    let levels: Vec<f64> = result
        .annotations
        .iter()
        .map(|a| a.placement.anchor[1])
        .collect();
    let base = levels[3];
    let displacement: Vec<f64> = levels.iter().map(|y| (y - base).abs()).collect();
    for (i, d) in displacement.iter().enumerate() {
        if i != 3 {
            assert!(*d > 0.0, "label {i} was not displaced");
        }
    }
    let inner = [1, 2, 4, 5].map(|i| displacement[i]);
    for d in inner {
        assert!(displacement[0] > d);
        assert!(displacement[6] > d);
    }
}

#[rstest]
#[case(false, 396)]
#[case(true, 322)]
fn test_empty_title_takes_no_length(#[case] draw_nan: bool, #[case] expected: i32) {
    let colors = ramp((0.0, 1.0));
    let config = ScalarBarConfig {
        draw_nan_annotation: draw_nan,
        unconstrained_font_size: true,
        ..Default::default()
    };
    let result = layout(&config, &colors, [200, 400]);
    assert_eq!(result.boxes.title.size, [0, 0]);
    assert!(result.geometry.title.is_none());
    assert_eq!(result.boxes.scalar_bar.length(), expected);
}

#[test]
fn test_title_shortens_vertical_bar() {
    let colors = ramp((0.0, 1.0));
    let untitled = ScalarBarConfig {
        unconstrained_font_size: true,
        ..Default::default()
    };
    let titled = ScalarBarConfig {
        title: "Temperature".to_string(),
        ..untitled.clone()
    };
    let a = layout(&untitled, &colors, [200, 400]);
    let b = layout(&titled, &colors, [200, 400]);
    assert_eq!(b.boxes.title.size[1], 18);
    assert_eq!(
        b.boxes.scalar_bar.length(),
        a.boxes.scalar_bar.length() - 18
    );
    let title = b.geometry.title.unwrap();
    assert_eq!(title.text, "Temperature");
}

#[rstest]
#[case(Orientation::Vertical, TextPosition::SucceedScalarBar, [200, 400])]
#[case(Orientation::Vertical, TextPosition::PrecedeScalarBar, [200, 400])]
#[case(Orientation::Horizontal, TextPosition::SucceedScalarBar, [400, 100])]
#[case(Orientation::Horizontal, TextPosition::PrecedeScalarBar, [400, 100])]
fn test_boxes_stay_inside_frame_thickness(
    #[case] orientation: Orientation,
    #[case] text_position: TextPosition,
    #[case] size: [i32; 2],
) {
    let colors = ramp((0.0, 1.0));
    let config = ScalarBarConfig {
        orientation,
        text_position,
        title: "Temperature".to_string(),
        draw_nan_annotation: true,
        draw_below_range_swatch: true,
        draw_above_range_swatch: true,
        ..Default::default()
    };
    let result = layout(&config, &colors, size);
    let tl = orientation.tl();
    let frame = result.boxes.frame;

    for (name, b) in result.boxes.iter() {
        assert!(b.size[0] >= 0 && b.size[1] >= 0, "{name} has a negative size");
        if name == "frame" {
            continue;
        }
        let across = b.posn[tl[0]];
        assert!(across >= 0, "{name} starts before the frame");
        assert!(
            across + b.size[0] <= frame.size[0],
            "{name} ends past the frame: {b:?}"
        );
    }
}

#[test]
fn test_degenerate_frame_yields_empty_boxes() {
    let colors = ramp((0.0, 1.0));
    let config = ScalarBarConfig {
        title: "Temperature".to_string(),
        ..Default::default()
    };
    let result = layout(&config, &colors, [0, 0]);
    assert_eq!(result.boxes.frame, LayoutBox::ZERO);
    for (_, b) in result.boxes.iter() {
        assert!(b.size[0] >= 0 && b.size[1] >= 0);
    }
}

#[test]
fn test_layout_is_idempotent() {
    let mut colors = ramp((0.0, 10.0));
    for v in [1.0, 1.2, 1.4, 5.0, 9.0] {
        colors = colors.with_annotation(v, format!("v = {v}"));
    }
    let config = ScalarBarConfig {
        title: "Speed".to_string(),
        draw_nan_annotation: true,
        draw_above_range_swatch: true,
        ..Default::default()
    };
    let a = layout(&config, &colors, [240, 500]);
    let b = layout(&config, &colors, [240, 500]);
    assert_eq!(a, b);
}

#[rstest]
#[case(Orientation::Vertical, TextPosition::SucceedScalarBar)]
#[case(Orientation::Vertical, TextPosition::PrecedeScalarBar)]
#[case(Orientation::Horizontal, TextPosition::SucceedScalarBar)]
#[case(Orientation::Horizontal, TextPosition::PrecedeScalarBar)]
fn test_extreme_pixel_settings_are_clamped(
    #[case] orientation: Orientation,
    #[case] text_position: TextPosition,
) {
    let mut colors = ramp((0.0, 1.0));
    for v in [0.1, 0.5, 0.9] {
        colors = colors.with_annotation(v, format!("{v}"));
    }
    for (text_pad, separation, line_width) in [
        (1_000_000_000, i32::MIN, i32::MAX),
        (i32::MAX, i32::MAX, i32::MIN),
        (i32::MIN, 0, 1),
    ] {
        let config = ScalarBarConfig {
            orientation,
            text_position,
            title: "Pressure".to_string(),
            text_pad,
            vertical_title_separation: separation,
            frame_line_width: line_width,
            draw_nan_annotation: true,
            draw_below_range_swatch: true,
            draw_above_range_swatch: true,
            ..Default::default()
        };
        let result = layout(&config, &colors, [200, 400]);
        for (_, b) in result.boxes.iter() {
            assert!(b.size[0] >= 0 && b.size[1] >= 0);
        }
    }
}

#[test]
fn test_huge_frame_and_fonts_are_clamped() {
    let colors = ramp((0.0, 1.0)).with_annotation(0.5, "half");
    let config = ScalarBarConfig {
        title: "Pressure".to_string(),
        unconstrained_font_size: true,
        title_text_property: Some(TextProperty::default().with_font_size(1.0e30)),
        label_text_property: Some(TextProperty::default().with_font_size(f32::MAX)),
        ..Default::default()
    };
    let result = compute_layout(
        &ViewportRect::new([i32::MIN, i32::MIN], [i32::MAX, i32::MAX]),
        &config,
        &colors,
        &HeuristicTextMeasurer::default(),
        None,
    )
    .unwrap();
    assert_eq!(result.boxes.frame.size, [MAX_FRAME_EXTENT, MAX_FRAME_EXTENT]);
    assert!(result.boxes.title.size[1] <= MAX_FRAME_EXTENT);
}
