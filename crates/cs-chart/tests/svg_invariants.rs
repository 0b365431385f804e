//! SVG chart invariant tests.
//!
//! These tests validate the generated markup without requiring a browser:
//! - one `<rect>` per present (non-zero) segment, plus legend swatches
//! - every group label appears on the category axis
//! - palette colors come from the fixed 11-color set
//! - the HTML page embeds the chart and the summary block

use cs_chart::{ChartConfig, ChartGenerator, BinLine, StatsBlock, CHART_PALETTE};
use cs_stack::{compute_stack, StackLayout, ValueMode};

struct Case {
    age_bin: &'static str,
    optype: Option<&'static str>,
}

fn sample_layout(mode: ValueMode) -> StackLayout {
    let records = [
        Case { age_bin: "20-29", optype: Some("Biliary") },
        Case { age_bin: "20-29", optype: Some("Vascular") },
        Case { age_bin: "40-49", optype: Some("Biliary") },
        Case { age_bin: "40-49", optype: None },
        Case { age_bin: "60-69", optype: Some("Vascular") },
    ];
    compute_stack(
        &records,
        |c| c.age_bin.to_string(),
        |c| c.optype.map(str::to_string),
        mode,
    )
}

fn present_segments(layout: &StackLayout) -> usize {
    layout
        .groups
        .iter()
        .flat_map(|g| &g.segments)
        .filter(|s| !s.is_degenerate())
        .count()
}

#[test]
fn rect_count_matches_segments_plus_legend() {
    let generator = ChartGenerator::default_config();
    let layout = sample_layout(ValueMode::Fraction);
    let svg = generator.render_svg(&layout).unwrap();

    let expected = present_segments(&layout) + layout.series.len();
    assert_eq!(svg.matches("<rect").count(), expected);
}

#[test]
fn every_group_label_is_on_the_axis() {
    let generator = ChartGenerator::default_config();
    let layout = sample_layout(ValueMode::Count);
    let svg = generator.render_svg(&layout).unwrap();

    for group in &layout.groups {
        assert!(
            svg.contains(&format!(">{}<", group.key.label())),
            "missing axis label {}",
            group.key
        );
    }
}

#[test]
fn fill_colors_come_from_the_palette() {
    let generator = ChartGenerator::default_config();
    let layout = sample_layout(ValueMode::Fraction);
    let svg = generator.render_svg(&layout).unwrap();

    for chunk in svg.split("fill=\"#").skip(1) {
        let hex = &chunk[..6];
        // Axis strokes use fill-free lines, so any fill is a bar or swatch.
        if hex.chars().all(|c| c.is_ascii_hexdigit()) && hex != "111827" && hex != "6b7280" {
            assert!(
                CHART_PALETTE.iter().any(|c| c.hex() == format!("#{hex}")),
                "unexpected fill #{hex}"
            );
        }
    }
}

#[test]
fn missing_series_appears_in_legend_as_none() {
    let generator = ChartGenerator::default_config();
    let layout = sample_layout(ValueMode::Fraction);
    let svg = generator.render_svg(&layout).unwrap();
    assert!(svg.contains(">(none)<"));
}

#[test]
fn dimensions_follow_config() {
    let config = ChartConfig {
        width: 640,
        height: 480,
        ..ChartConfig::default()
    };
    let generator = ChartGenerator::new(config).unwrap();
    let svg = generator.render_svg(&sample_layout(ValueMode::Fraction)).unwrap();
    assert!(svg.contains(r#"width="640" height="480""#));
    assert!(svg.contains(r#"viewBox="0 0 640 480""#));
}

#[test]
fn html_page_contains_svg_and_stats() {
    let generator = ChartGenerator::default_config();
    let layout = sample_layout(ValueMode::Fraction);
    let stats = StatsBlock {
        total: 5,
        bins: vec![
            BinLine { label: "60-69".to_string(), count: 1 },
            BinLine { label: "40-49".to_string(), count: 2 },
            BinLine { label: "20-29".to_string(), count: 2 },
        ],
    };
    let html = generator
        .render_html(&layout, "Cases by age bin", Some(&stats))
        .unwrap();

    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<svg"));
    assert!(html.contains("Cases by age bin"));
    assert!(html.contains("Total records"));
    assert!(html.contains("60-69"));
}

#[test]
fn title_text_is_escaped_in_html() {
    let generator = ChartGenerator::default_config();
    let layout = sample_layout(ValueMode::Fraction);
    let html = generator
        .render_html(&layout, "a < b & c", None)
        .unwrap();
    assert!(html.contains("a &lt; b &amp; c"));
}
