//! Chart geometry: pure mappings from aggregate values to 2D coordinates.
//!
//! Every function recomputes from scratch; identical input yields identical
//! output. Degenerate input maps to an explicit no-data variant instead of a
//! division by zero.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Frame {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self { width, height, padding }
    }

    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineChart {
    NoData,
    Plot { points: Vec<Point>, max: f64 },
}

/// Maps an ordered series of cumulative values onto the frame. X is linear
/// in index across [padding, width - padding]; Y is inverse-linear in value,
/// so the maximum lands `padding` from the top and zero sits on the bottom
/// axis.
pub fn line_series(values: &[f64], frame: &Frame) -> LineChart {
    if values.len() < 2 {
        return LineChart::NoData;
    }
    let max = values.iter().cloned().fold(f64::MIN, f64::max);
    if max <= 0.0 {
        return LineChart::NoData;
    }
    let last = (values.len() - 1) as f64;
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| Point {
            x: frame.padding + (i as f64 / last) * frame.plot_width(),
            y: frame.height - frame.padding - (v / max) * frame.plot_height(),
        })
        .collect();
    LineChart::Plot { points, max }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub value: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DonutChart {
    NoData,
    Wedges(Vec<Wedge>),
}

/// Wedge angles are value/total fractions of 360 degrees, accumulated from
/// zero. Angle zero points up; Cartesian conversion happens in
/// [`polar_point`].
pub fn donut_wedges(slices: &[(&str, f64)]) -> DonutChart {
    let total: f64 = slices.iter().map(|(_, v)| v.max(0.0)).sum();
    if slices.is_empty() || total <= 0.0 {
        return DonutChart::NoData;
    }
    let mut start = 0.0;
    let wedges = slices
        .iter()
        .map(|(label, value)| {
            let sweep = value.max(0.0) / total * 360.0;
            let wedge = Wedge {
                label: label.to_string(),
                value: *value,
                start_deg: start,
                sweep_deg: sweep,
            };
            start += sweep;
            wedge
        })
        .collect();
    DonutChart::Wedges(wedges)
}

/// Converts a chart angle (0 = up, clockwise) to a point on a circle.
pub fn polar_point(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> Point {
    let rad = (angle_deg - 90.0).to_radians();
    Point {
        x: cx + radius * rad.cos(),
        y: cy + radius * rad.sin(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BarChart {
    NoData,
    Bars(Vec<Bar>),
}

/// Bar height is value/max of the plot height. Bars split the plot width
/// evenly, with 10% gutters on each side of the slot.
pub fn bar_layout(values: &[(&str, f64)], frame: &Frame) -> BarChart {
    if values.is_empty() {
        return BarChart::NoData;
    }
    let max = values.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max);
    if max <= 0.0 {
        return BarChart::NoData;
    }
    let slot = frame.plot_width() / values.len() as f64;
    let bars = values
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let height = (value.max(0.0) / max) * frame.plot_height();
            let x = frame.padding + i as f64 * slot;
            Bar {
                label: label.to_string(),
                value: *value,
                x: x + slot * 0.1,
                y: frame.height - frame.padding - height,
                width: slot * 0.8,
                height,
            }
        })
        .collect();
    BarChart::Bars(bars)
}
