//! Server-side SVG charts.
//!
//! Charts are emitted as markup strings and embedded unescaped in the page,
//! so every label goes through [`escape`].

use std::f64::consts::PI;
use std::fmt::Write;

use crate::aggregate::Share;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_BOTTOM: f64 = 48.0;
const MARGIN_TOP: f64 = 16.0;
const PIE_RADIUS: f64 = 120.0;

const PALETTE: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

/// Geometry of one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lay out bars across the plot area, scaled to the largest value.
pub fn bar_layout(values: &[i64]) -> Vec<BarGeometry> {
    if values.is_empty() {
        return Vec::new();
    }
    let plot_width = WIDTH - MARGIN_LEFT;
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let max = values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let slot = plot_width / values.len() as f64;

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let height = value.max(0) as f64 / max * plot_height;
            BarGeometry {
                x: MARGIN_LEFT + i as f64 * slot + slot * 0.1,
                y: MARGIN_TOP + plot_height - height,
                width: slot * 0.8,
                height,
            }
        })
        .collect()
}

/// Render a labelled bar chart.
pub fn bar_chart(title: &str, bars: &[(String, i64)], x_label: &str, y_label: &str) -> String {
    let values: Vec<i64> = bars.iter().map(|(_, v)| *v).collect();
    let baseline = HEIGHT - MARGIN_BOTTOM;

    let mut svg = open_svg(title);
    let _ = write!(
        svg,
        r##"<line x1="{MARGIN_LEFT}" y1="{baseline}" x2="{WIDTH}" y2="{baseline}" stroke="#555"/>"##
    );

    for ((label, value), geometry) in bars.iter().zip(bar_layout(&values)) {
        let center = geometry.x + geometry.width / 2.0;
        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
            PALETTE[0],
            escape(label),
            value
        );
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11">{}</text>"#,
            center,
            baseline + 14.0,
            escape(label)
        );
    }

    let _ = write!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
        MARGIN_LEFT + (WIDTH - MARGIN_LEFT) / 2.0,
        HEIGHT - 8.0,
        escape(x_label)
    );
    let _ = write!(
        svg,
        r#"<text x="14" y="{:.1}" text-anchor="middle" font-size="12" transform="rotate(-90 14 {:.1})">{}</text>"#,
        HEIGHT / 2.0,
        HEIGHT / 2.0,
        escape(y_label)
    );
    svg.push_str("</svg>");
    svg
}

/// Render a pie chart with a percentage legend.
pub fn pie_chart(title: &str, slices: &[Share]) -> String {
    let cx = PIE_RADIUS + 16.0;
    let cy = HEIGHT / 2.0;
    let mut svg = open_svg(title);

    let visible: Vec<&Share> = slices.iter().filter(|s| s.count > 0).collect();
    let mut start = -PI / 2.0;
    for (i, share) in visible.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let label = escape(&share.label);
        if visible.len() == 1 {
            let _ = write!(
                svg,
                r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{PIE_RADIUS:.1}" fill="{color}"><title>{label}: 100.0%</title></circle>"#
            );
        } else {
            let sweep = share.percent / 100.0 * 2.0 * PI;
            let end = start + sweep;
            let _ = write!(
                svg,
                r#"<path d="{}" fill="{color}"><title>{label}: {:.1}%</title></path>"#,
                arc_path(cx, cy, PIE_RADIUS, start, end),
                share.percent
            );
            start = end;
        }

        let legend_y = MARGIN_TOP + 20.0 * i as f64;
        let legend_x = cx + PIE_RADIUS + 32.0;
        let _ = write!(
            svg,
            r#"<rect x="{legend_x:.1}" y="{legend_y:.1}" width="12" height="12" fill="{color}"/><text x="{:.1}" y="{:.1}" font-size="12">{label} ({:.1}%)</text>"#,
            legend_x + 18.0,
            legend_y + 10.0,
            share.percent
        );
    }

    svg.push_str("</svg>");
    svg
}

/// SVG path for a pie slice between two angles (radians, clockwise).
pub fn arc_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let (x1, y1) = (cx + r * start.cos(), cy + r * start.sin());
    let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
    let large_arc = if end - start > PI { 1 } else { 0 };
    format!("M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z")
}

fn open_svg(title: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{0}"><title>{0}</title>"#,
        escape(title)
    )
}

/// Escape text for SVG/XML content and attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::shares;

    #[test]
    fn test_bars_scale_to_largest() {
        let bars = bar_layout(&[10, 5, 0]);
        assert_eq!(bars.len(), 3);
        let full = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        assert!((bars[0].height - full).abs() < 1e-9);
        assert!((bars[1].height - full / 2.0).abs() < 1e-9);
        assert_eq!(bars[2].height, 0.0);
        assert!(bars[0].x < bars[1].x);
    }

    #[test]
    fn test_bar_layout_all_zero() {
        let bars = bar_layout(&[0, 0]);
        assert!(bars.iter().all(|b| b.height == 0.0));
        assert!(bar_layout(&[]).is_empty());
    }

    #[test]
    fn test_bar_chart_escapes_labels() {
        let svg = bar_chart("Hotspots", &[("<K>".to_string(), 3)], "Borough", "Arrests Count");
        assert!(svg.contains("&lt;K&gt;"));
        assert!(!svg.contains("<K>"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_pie_one_path_per_slice() {
        let svg = pie_chart("Race", &shares([("BLACK", 6), ("WHITE", 3), ("ASIAN", 1)]));
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains("BLACK (60.0%)"));
    }

    #[test]
    fn test_pie_single_slice_is_circle() {
        let svg = pie_chart("Gender", &shares([("M", 4), ("F", 0)]));
        assert_eq!(svg.matches("<circle").count(), 1);
        assert_eq!(svg.matches("<path").count(), 0);
    }

    #[test]
    fn test_large_arc_flag() {
        assert!(arc_path(0.0, 0.0, 1.0, 0.0, PI * 1.5).contains(" 0 1 1 "));
        assert!(arc_path(0.0, 0.0, 1.0, 0.0, PI * 0.5).contains(" 0 0 1 "));
    }
}
