//! SVG and HTML chart generation.

use cs_stack::{StackLayout, ValueMode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ChartConfig;
use crate::error::Result;
use crate::palette::series_color;
use crate::scale::{BandScale, LinearScale};

const LEGEND_ROW_HEIGHT: u32 = 20;
const LEGEND_SWATCH: u32 = 19;
const LEGEND_OFFSET: u32 = 20;
const TICK_TARGET: usize = 10;

/// Per-bin line of the summary block rendered next to the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinLine {
    pub label: String,
    pub count: usize,
}

/// Record counts shown alongside the chart in HTML output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsBlock {
    pub total: usize,
    pub bins: Vec<BinLine>,
}

/// Chart generator.
pub struct ChartGenerator {
    config: ChartConfig,
}

impl ChartGenerator {
    /// Create a generator, rejecting unusable geometry up front.
    pub fn new(config: ChartConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self {
            config: ChartConfig::default(),
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Render the layout as a standalone SVG document.
    pub fn render_svg(&self, layout: &StackLayout) -> Result<String> {
        let cfg = &self.config;
        let mut svg = String::with_capacity(16 * 1024);

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
            w = cfg.width,
            h = cfg.height
        ));
        svg.push('\n');

        if layout.is_empty() {
            svg.push_str(&format!(
                r##"  <text x="{x}" y="{y}" text-anchor="middle" fill="#6b7280">no records to display</text>"##,
                x = cfg.width / 2,
                y = cfg.height / 2
            ));
            svg.push_str("\n</svg>\n");
            return Ok(svg);
        }

        let left = f64::from(cfg.margins.left);
        let top = f64::from(cfg.margins.top);
        let bottom = top + cfg.inner_height();

        let x_scale = BandScale::new(
            left,
            left + cfg.inner_width(),
            layout.groups.len(),
            cfg.band_padding,
        );
        let y_scale = LinearScale::new(layout.axis_max(), bottom, top);

        self.push_bars(&mut svg, layout, &x_scale, &y_scale);
        self.push_x_axis(&mut svg, layout, &x_scale, bottom);
        self.push_y_axis(&mut svg, layout, &y_scale, left, bottom);
        self.push_legend(&mut svg, layout);

        svg.push_str("</svg>\n");

        info!(
            bytes = svg.len(),
            groups = layout.groups.len(),
            series = layout.series.len(),
            "chart rendered"
        );
        Ok(svg)
    }

    /// Render a full HTML page: chart plus an optional summary block.
    pub fn render_html(
        &self,
        layout: &StackLayout,
        title: &str,
        stats: Option<&StatsBlock>,
    ) -> Result<String> {
        let svg = self.render_svg(layout)?;
        let stats_html = stats.map(render_stats_block).unwrap_or_default();

        let html = format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="casestack {version}">
    <style>
        body {{
            font-family: ui-sans-serif, system-ui, sans-serif;
            color: #111827;
            margin: 2rem auto;
            max-width: {max_width}px;
        }}
        h1 {{ font-size: 1.5rem; }}
        dl {{ display: grid; grid-template-columns: max-content auto; gap: 0.25rem 1rem; }}
        dt {{ color: #6b7280; }}
        dd {{ margin: 0; font-variant-numeric: tabular-nums; }}
        .bars rect:hover {{ fill-opacity: 1; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    {svg}
    {stats_html}
</body>
</html>"##,
            title = xml_escape(title),
            version = env!("CARGO_PKG_VERSION"),
            max_width = self.config.width + 40,
            svg = svg,
            stats_html = stats_html,
        );

        // Optionally minify
        let output = if cfg!(debug_assertions) {
            html
        } else {
            let cfg = minify_html::Cfg {
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        };

        info!(bytes = output.len(), "chart page generated");
        Ok(output)
    }

    fn push_bars(
        &self,
        svg: &mut String,
        layout: &StackLayout,
        x_scale: &BandScale,
        y_scale: &LinearScale,
    ) {
        svg.push_str("  <g class=\"bars\">\n");
        for (gi, group) in layout.groups.iter().enumerate() {
            let x = x_scale.position(gi);
            for (si, segment) in group.segments.iter().enumerate() {
                if segment.is_degenerate() {
                    continue;
                }
                let y = y_scale.scale(segment.end);
                let height = y_scale.scale(segment.start) - y;
                svg.push_str(&format!(
                    r#"    <rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{fill}" fill-opacity="{opacity}"><title>{group} · {series} · {value}</title></rect>"#,
                    x = x,
                    y = y,
                    w = x_scale.bandwidth(),
                    h = height,
                    fill = series_color(si).hex(),
                    opacity = self.config.fill_opacity,
                    group = xml_escape(group.key.label()),
                    series = xml_escape(segment.series.label()),
                    value = format_value(layout.mode, segment.value()),
                ));
                svg.push('\n');
            }
        }
        svg.push_str("  </g>\n");
    }

    fn push_x_axis(
        &self,
        svg: &mut String,
        layout: &StackLayout,
        x_scale: &BandScale,
        baseline: f64,
    ) {
        svg.push_str("  <g class=\"x-axis\">\n");
        svg.push_str(&format!(
            r##"    <line x1="{x1}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#111827"/>"##,
            x1 = self.config.margins.left,
            y = baseline,
            x2 = f64::from(self.config.margins.left) + self.config.inner_width(),
        ));
        svg.push('\n');
        for (gi, group) in layout.groups.iter().enumerate() {
            svg.push_str(&format!(
                r#"    <text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
                x = x_scale.center(gi),
                y = baseline + 16.0,
                label = xml_escape(group.key.label()),
            ));
            svg.push('\n');
        }
        svg.push_str("  </g>\n");
    }

    fn push_y_axis(
        &self,
        svg: &mut String,
        layout: &StackLayout,
        y_scale: &LinearScale,
        left: f64,
        baseline: f64,
    ) {
        svg.push_str("  <g class=\"y-axis\">\n");
        svg.push_str(&format!(
            r##"    <line x1="{x:.2}" y1="{y1}" x2="{x:.2}" y2="{y2:.2}" stroke="#111827"/>"##,
            x = left,
            y1 = self.config.margins.top,
            y2 = baseline,
        ));
        svg.push('\n');
        for tick in y_scale.ticks(TICK_TARGET) {
            let y = y_scale.scale(tick);
            svg.push_str(&format!(
                r##"    <line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#111827"/>"##,
                x1 = left - 6.0,
                x2 = left,
                y = y,
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"    <text x="{x:.2}" y="{y:.2}" text-anchor="end" dominant-baseline="middle">{label}</text>"#,
                x = left - 9.0,
                y = y,
                label = format_value(layout.mode, tick),
            ));
            svg.push('\n');
        }
        svg.push_str("  </g>\n");
    }

    fn push_legend(&self, svg: &mut String, layout: &StackLayout) {
        let x = self.config.width - self.config.margins.right + LEGEND_OFFSET;
        svg.push_str(&format!(
            "  <g class=\"legend\" transform=\"translate({x},{y})\">\n",
            x = x,
            y = self.config.margins.top
        ));
        // Topmost legend entry matches the topmost stacked segment.
        for (row, si) in (0..layout.series.len()).rev().enumerate() {
            let y = row as u32 * LEGEND_ROW_HEIGHT;
            svg.push_str(&format!(
                r#"    <rect x="0" y="{y}" width="{s}" height="{s}" fill="{fill}"/>"#,
                y = y,
                s = LEGEND_SWATCH,
                fill = series_color(si).hex(),
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"    <text x="{x}" y="{y}" dominant-baseline="middle">{label}</text>"#,
                x = LEGEND_SWATCH + 5,
                y = y + LEGEND_SWATCH / 2,
                label = xml_escape(layout.series[si].label()),
            ));
            svg.push('\n');
        }
        svg.push_str("  </g>\n");
    }
}

fn render_stats_block(stats: &StatsBlock) -> String {
    let mut dl = String::from("<dl>\n        <dt>Total records</dt>\n");
    dl.push_str(&format!("        <dd>{}</dd>\n", stats.total));
    for bin in &stats.bins {
        dl.push_str(&format!(
            "        <dt>{}</dt>\n        <dd>{}</dd>\n",
            xml_escape(&bin.label),
            bin.count
        ));
    }
    dl.push_str("    </dl>");
    dl
}

/// Format an axis or tooltip value for the given mode: percentages in
/// FRACTION mode, plain numbers in COUNT mode.
fn format_value(mode: ValueMode, value: f64) -> String {
    match mode {
        ValueMode::Fraction => format!("{:.0}%", value * 100.0),
        ValueMode::Count => {
            if value.fract() == 0.0 {
                format!("{}", value as u64)
            } else {
                format!("{value:.1}")
            }
        }
    }
}

/// Escape XML special characters.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
