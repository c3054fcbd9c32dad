//! Standalone SVG documents over the chart geometry.

use std::fmt::Write;

use crate::chart::{self, BarChart, DonutChart, Frame, LineChart};

const ACCENT: &str = "#4a90e2";
const AXIS: &str = "#ddd";
const BACKDROP: &str = "#f9f9f9";
const INK: &str = "#666";

fn document(frame: &Frame, body: &str) -> String {
    format!(
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">
<rect x="0" y="0" width="{w}" height="{h}" fill="{BACKDROP}" rx="5" ry="5"/>
{body}</svg>
"#,
        w = frame.width,
        h = frame.height,
    )
}

fn empty_state(frame: &Frame, message: &str) -> String {
    let body = format!(
        r#"<text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="middle" font-size="12" fill="{INK}">{message}</text>
"#,
        x = frame.width / 2.0,
        y = frame.height / 2.0,
    );
    document(frame, &body)
}

fn axes(frame: &Frame) -> String {
    format!(
        r#"<line x1="{p}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="{AXIS}" stroke-width="1"/>
<line x1="{p}" y1="{p}" x2="{p}" y2="{bottom}" stroke="{AXIS}" stroke-width="1"/>
"#,
        p = frame.padding,
        bottom = frame.height - frame.padding,
        right = frame.width - frame.padding,
    )
}

/// Cumulative XP polyline with a marker circle per sample.
pub fn xp_line_svg(values: &[f64], frame: &Frame) -> String {
    match chart::line_series(values, frame) {
        LineChart::NoData => empty_state(frame, "Not enough XP data to draw a graph"),
        LineChart::Plot { points, max } => {
            let mut body = axes(frame);
            let path: Vec<String> = points.iter().map(|p| format!("{:.2},{:.2}", p.x, p.y)).collect();
            let _ = writeln!(
                body,
                r#"<polyline points="{}" fill="none" stroke="{ACCENT}" stroke-width="2"/>"#,
                path.join(" "),
            );
            for p in &points {
                let _ = writeln!(
                    body,
                    r#"<circle cx="{:.2}" cy="{:.2}" r="3" fill="{ACCENT}"/>"#,
                    p.x, p.y,
                );
            }
            let _ = writeln!(
                body,
                r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="10" fill="{INK}">Time</text>"#,
                x = frame.width / 2.0,
                y = frame.height - 5.0,
            );
            let _ = writeln!(
                body,
                r#"<text x="{x}" y="{y}" text-anchor="end" font-size="10" fill="{INK}">{max}</text>"#,
                x = frame.width - frame.padding,
                y = frame.padding - 5.0,
            );
            document(frame, &body)
        }
    }
}

/// Donut chart. The first slice's share of the total is the headline figure
/// in the center.
pub fn donut_svg(slices: &[(&str, f64)], frame: &Frame, title: &str) -> String {
    let wedges = match chart::donut_wedges(slices) {
        DonutChart::NoData => return empty_state(frame, "No data"),
        DonutChart::Wedges(wedges) => wedges,
    };

    let cx = frame.width / 2.0;
    let cy = frame.height / 2.0;
    let radius = frame.plot_width().min(frame.plot_height()) / 2.0;
    let palette = [ACCENT, "#e27a4a", "#7a4ae2", "#4ae2a9"];

    let mut body = String::new();
    for (i, wedge) in wedges.iter().enumerate() {
        let fill = palette[i % palette.len()];
        if wedge.sweep_deg >= 359.999 {
            // A full-turn arc degenerates to a zero-length path; draw the
            // whole disc instead.
            let _ = writeln!(body, r#"<circle cx="{cx}" cy="{cy}" r="{radius}" fill="{fill}"/>"#);
            continue;
        }
        if wedge.sweep_deg <= 0.0 {
            continue;
        }
        let start = chart::polar_point(cx, cy, radius, wedge.start_deg);
        let end = chart::polar_point(cx, cy, radius, wedge.start_deg + wedge.sweep_deg);
        let large_arc = if wedge.sweep_deg > 180.0 { 1 } else { 0 };
        let _ = writeln!(
            body,
            r#"<path d="M {cx} {cy} L {sx:.2} {sy:.2} A {radius} {radius} 0 {large_arc} 1 {ex:.2} {ey:.2} Z" fill="{fill}"/>"#,
            sx = start.x,
            sy = start.y,
            ex = end.x,
            ey = end.y,
        );
    }

    let _ = writeln!(body, r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{BACKDROP}"/>"#, r = radius * 0.6);

    let total: f64 = wedges.iter().map(|w| w.value).sum();
    let headline = wedges[0].value / total * 100.0;
    let _ = writeln!(
        body,
        r##"<text x="{cx}" y="{cy}" text-anchor="middle" dominant-baseline="middle" font-size="20" fill="#444">{headline:.1}%</text>"##,
    );
    let _ = writeln!(
        body,
        r#"<text x="{cx}" y="{y}" text-anchor="middle" dominant-baseline="middle" font-size="10" fill="{INK}">{title}</text>"#,
        y = cy + 20.0,
    );
    document(frame, &body)
}

/// Labeled bar chart with the value printed above each bar.
pub fn bars_svg(values: &[(&str, f64)], frame: &Frame, axis_label: &str) -> String {
    let bars = match chart::bar_layout(values, frame) {
        BarChart::NoData => return empty_state(frame, "No data"),
        BarChart::Bars(bars) => bars,
    };

    let mut body = axes(frame);
    for bar in &bars {
        let _ = writeln!(
            body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{ACCENT}" rx="2" ry="2"/>"#,
            x = bar.x,
            y = bar.y,
            w = bar.width,
            h = bar.height,
        );
        let label_x = bar.x + bar.width / 2.0;
        let _ = writeln!(
            body,
            r#"<text x="{label_x:.2}" y="{y}" text-anchor="end" font-size="9" fill="{INK}" transform="rotate(-30, {label_x:.2}, {y})">{label}</text>"#,
            y = frame.height - frame.padding + 12.0,
            label = bar.label,
        );
        let _ = writeln!(
            body,
            r#"<text x="{label_x:.2}" y="{y:.2}" text-anchor="middle" font-size="8" fill="{INK}">{value}</text>"#,
            y = bar.y - 5.0,
            value = bar.value,
        );
    }
    let _ = writeln!(
        body,
        r#"<text x="10" y="{y}" text-anchor="middle" font-size="10" fill="{INK}" transform="rotate(-90, 10, {y})">{axis_label}</text>"#,
        y = frame.height / 2.0,
    );
    document(frame, &body)
}
