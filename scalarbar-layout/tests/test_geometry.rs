use float_cmp::assert_approx_eq;
use scalarbar_colors::{ColorTransferFunction, LookupTable};
use scalarbar_common::types::{Orientation, TextPosition};
use scalarbar_layout::{compute_layout, LayoutResult, ScalarBarConfig, ViewportRect};
use scalarbar_text::measurement::heuristic::HeuristicTextMeasurer;
use scalarbar_text::types::{TextAlign, VerticalAlign};

fn two_tone() -> LookupTable {
    LookupTable::try_new(
        vec![[0.0, 0.0, 1.0, 1.0], [1.0, 0.0, 0.0, 1.0]],
        (0.0, 1.0),
    )
    .unwrap()
}

fn layout(
    config: &ScalarBarConfig,
    colors: &dyn scalarbar_colors::ColorSource,
    size: [i32; 2],
) -> LayoutResult {
    compute_layout(
        &ViewportRect::from_origin_size([0, 0], size),
        config,
        colors,
        &HeuristicTextMeasurer::default(),
        None,
    )
    .unwrap()
}

#[test]
fn test_color_bar_tiles_the_bar() {
    let result = layout(&ScalarBarConfig::default(), &two_tone(), [200, 400]);
    let quads = &result.geometry.color_bar;
    assert_eq!(quads.len(), 64);

    let bar = result.boxes.scalar_bar;
    assert_eq!(quads[0].points[0], [bar.posn[0] as f64, bar.posn[1] as f64]);
    assert_approx_eq!(
        f64,
        quads[63].points[2][1],
        (bar.posn[1] + bar.size[1]) as f64,
        epsilon = 1e-9
    );
    assert_eq!(quads[0].color, [0, 0, 255, 255]);
    assert_eq!(quads[63].color, [255, 0, 0, 255]);
}

#[test]
fn test_opacity_only_with_use_opacity() {
    let colors = two_tone().with_opacity(0.5);
    let opaque = layout(&ScalarBarConfig::default(), &colors, [200, 400]);
    assert_eq!(opaque.geometry.color_bar[0].color[3], 255);

    let config = ScalarBarConfig {
        use_opacity: true,
        ..Default::default()
    };
    let translucent = layout(&config, &colors, [200, 400]);
    assert_eq!(translucent.geometry.color_bar[0].color[3], 127);
}

#[test]
fn test_frame_and_background() {
    let config = ScalarBarConfig {
        draw_frame: true,
        draw_background: true,
        ..Default::default()
    };
    let result = layout(&config, &two_tone(), [200, 400]);
    let frame = result.geometry.frame.unwrap();
    assert_eq!(frame.points[0], frame.points[4]);
    assert_eq!(frame.points[2], [199.5, 399.5]);
    let background = result.geometry.background.unwrap();
    assert_eq!(background.color, [255, 255, 255, 127]);

    let plain = layout(&ScalarBarConfig::default(), &two_tone(), [200, 400]);
    assert!(plain.geometry.frame.is_none());
    assert!(plain.geometry.background.is_none());
}

#[test]
fn test_out_of_range_swatch_colors() {
    let config = ScalarBarConfig {
        draw_nan_annotation: true,
        draw_below_range_swatch: true,
        draw_above_range_swatch: true,
        ..Default::default()
    };
    let table = two_tone()
        .with_nan_color([0.0, 1.0, 0.0, 1.0])
        .with_below_range_color([0.0, 0.0, 0.0, 1.0])
        .with_above_range_color([1.0, 1.0, 1.0, 1.0]);
    let result = layout(&config, &table, [200, 400]);
    let geometry = &result.geometry;
    assert_eq!(geometry.nan_swatch.unwrap().color, [0, 255, 0, 255]);
    assert_eq!(geometry.below_range_swatch.unwrap().color, [0, 0, 0, 255]);
    assert_eq!(geometry.above_range_swatch.unwrap().color, [255, 255, 255, 255]);

    let ctf = ColorTransferFunction::try_new(vec![
        (0.0, [0.0, 0.0, 0.0, 1.0]),
        (1.0, [1.0, 1.0, 1.0, 1.0]),
    ])
    .unwrap()
    .with_nan_color([1.0, 0.0, 0.0, 1.0])
    .with_below_range_color([0.0, 0.0, 1.0, 1.0])
    .with_above_range_color([1.0, 1.0, 0.0, 1.0]);
    let result = layout(&config, &ctf, [200, 400]);
    let geometry = &result.geometry;
    assert_eq!(geometry.nan_swatch.unwrap().color, [255, 0, 0, 255]);
    assert_eq!(geometry.below_range_swatch.unwrap().color, [0, 0, 255, 255]);
    assert_eq!(geometry.above_range_swatch.unwrap().color, [255, 255, 0, 255]);
    let leader_color = |text: &str| {
        result
            .labels
            .values()
            .find(|entry| entry.text == text)
            .unwrap()
            .color
    };
    assert_eq!(leader_color("Below"), [0, 0, 255]);
    assert_eq!(leader_color("Above"), [255, 255, 0]);
}

#[test]
fn test_vertical_tick_items() {
    let result = layout(&ScalarBarConfig::default(), &two_tone(), [200, 400]);
    let ticks = result.boxes.ticks;
    let items = &result.geometry.tick_labels;
    assert_eq!(items.len(), 5);
    for item in items {
        assert_eq!(item.align, TextAlign::Left);
        assert_eq!(item.vertical_align, VerticalAlign::Bottom);
        assert_eq!(item.position[0], ticks.posn[0] as f64);
    }
    // labels are centered on their tick values
    let first = &items[0];
    let center = (first.bounds[2] + first.bounds[3]) / 2.0;
    assert_approx_eq!(f64, center, ticks.posn[1] as f64, epsilon = 1e-6);
}

#[test]
fn test_horizontal_tick_items() {
    let config = ScalarBarConfig {
        orientation: Orientation::Horizontal,
        text_position: TextPosition::PrecedeScalarBar,
        ..Default::default()
    };
    let result = layout(&config, &two_tone(), [400, 100]);
    let ticks = result.boxes.ticks;
    for item in &result.geometry.tick_labels {
        assert_eq!(item.align, TextAlign::Center);
        assert_eq!(item.vertical_align, VerticalAlign::Top);
        assert_eq!(item.position[1], (ticks.posn[1] + ticks.size[0]) as f64);
    }
    let first = &result.geometry.tick_labels[0];
    assert_eq!(first.position[0], ticks.posn[0] as f64);
}

#[test]
fn test_hidden_tick_labels_still_reserve_space() {
    let config = ScalarBarConfig {
        draw_tick_labels: false,
        ..Default::default()
    };
    let hidden = layout(&config, &two_tone(), [200, 400]);
    let shown = layout(&ScalarBarConfig::default(), &two_tone(), [200, 400]);
    assert!(hidden.geometry.tick_labels.is_empty());
    assert_eq!(hidden.tick_labels.len(), 5);
    assert_eq!(hidden.boxes, shown.boxes);
}

#[test]
fn test_fixed_leader_color() {
    let colors = two_tone().with_annotation(0.5, "half");
    let config = ScalarBarConfig {
        fixed_annotation_leader_line_color: true,
        ..Default::default()
    };
    let result = layout(&config, &colors, [200, 400]);
    let leaders = &result.geometry.leader_lines;
    assert_eq!(leaders.fixed_color, Some([255, 255, 255]));
    assert_eq!(leaders.segments.len(), 1);
    assert_eq!(result.geometry.annotation_labels.len(), 1);
    assert_eq!(result.geometry.annotation_labels[0].text, "half");

    let hidden = ScalarBarConfig {
        draw_annotations: false,
        ..Default::default()
    };
    let result = layout(&hidden, &colors, [200, 400]);
    assert!(result.labels.is_empty());
    assert!(result.geometry.leader_lines.segments.is_empty());
}

#[test]
fn test_debug_outlines_and_bar_rect() {
    let result = layout(&ScalarBarConfig::default(), &two_tone(), [200, 400]);
    assert_eq!(result.debug_outlines().len(), 4);
    let bar = result.boxes.scalar_bar;
    assert_eq!(
        result.scalar_bar_rect([10, 20]),
        [10 + bar.posn[0], 20 + bar.posn[1], bar.size[0], bar.size[1]]
    );

    let config = ScalarBarConfig {
        number_of_labels: 0,
        ..Default::default()
    };
    let result = layout(&config, &two_tone(), [200, 400]);
    assert_eq!(result.debug_outlines().len(), 3);
}
