//! Minimal SVG chart rendering.
//!
//! Charts are emitted as SVG markup built with `std::fmt::Write`. Three
//! shapes are supported:
//!
//! - grouped bars, one or more panels side by side ([`render_bars`])
//! - lines with point markers ([`render_lines`])
//! - a pie with a legend ([`render_pie`])
//!
//! Callers hand over finished labels and series; every series must be as
//! long as the label list.

use crate::error::ChartError;
use quick_xml::escape::escape;
use std::f64::consts::PI;
use std::fmt::Write as _;

const PANEL_WIDTH: f64 = 640.0;
const PANEL_HEIGHT: f64 = 480.0;
const HEADER_HEIGHT: f64 = 48.0;
const PLOT_LEFT: f64 = 64.0;
const PLOT_RIGHT: f64 = 24.0;
const PLOT_TOP: f64 = 56.0;
const PLOT_BOTTOM: f64 = 104.0;
const Y_TICKS: usize = 4;
const FONT: &str = "DejaVu Sans, Helvetica, sans-serif";

/// Pie slice colours, cycled when there are more slices than entries.
pub const PALETTE: [&str; 6] = [
    "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: &str, color: &'static str, values: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            color,
            values,
        }
    }
}

/// Labels along the x axis with one or more value series over them.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesChart {
    pub title: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl SeriesChart {
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.labels.is_empty() || self.series.is_empty() {
            return Err(ChartError::Empty {
                title: self.title.clone(),
            });
        }
        for s in &self.series {
            if s.values.len() != self.labels.len() {
                return Err(ChartError::LengthMismatch {
                    title: self.title.clone(),
                    series: s.name.clone(),
                    expected: self.labels.len(),
                    actual: s.values.len(),
                });
            }
        }
        Ok(())
    }

    fn value_range(&self) -> (f64, f64) {
        let values = self.series.iter().flat_map(|s| s.values.iter().copied());
        let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if (hi - lo).abs() < f64::EPSILON {
            (lo, lo + 1.0)
        } else {
            (lo, hi)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Plot area of one panel, in canvas coordinates.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    lo: f64,
    hi: f64,
}

impl Frame {
    fn for_panel(index: usize, lo: f64, hi: f64) -> Self {
        Self {
            left: index as f64 * PANEL_WIDTH + PLOT_LEFT,
            top: HEADER_HEIGHT + PLOT_TOP,
            width: PANEL_WIDTH - PLOT_LEFT - PLOT_RIGHT,
            height: PANEL_HEIGHT - PLOT_TOP - PLOT_BOTTOM,
            lo,
            hi,
        }
    }

    fn y(&self, v: f64) -> f64 {
        self.top + (self.hi - v) / (self.hi - self.lo) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

fn open_canvas(svg: &mut String, width: f64, height: f64, title: &str) {
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width:.0}' height='{height:.0}' viewBox='0 0 {width:.0} {height:.0}' role='img'>"
    );
    let _ = writeln!(svg, "  <title>{}</title>", escape(title));
    let _ = writeln!(svg, "  <rect width='{width:.0}' height='{height:.0}' fill='#ffffff'/>");
    let _ = writeln!(
        svg,
        "  <text x='{:.0}' y='32' text-anchor='middle' fill='#222222' font-family='{FONT}' font-size='20' font-weight='700'>{}</text>",
        width / 2.0,
        escape(title)
    );
}

fn panel_axes(svg: &mut String, chart: &SeriesChart, index: usize, frame: &Frame) {
    let center = index as f64 * PANEL_WIDTH + PANEL_WIDTH / 2.0;
    let _ = writeln!(
        svg,
        "  <text x='{center:.0}' y='{:.0}' text-anchor='middle' fill='#222222' font-family='{FONT}' font-size='16' font-weight='600'>{}</text>",
        HEADER_HEIGHT + 28.0,
        escape(&chart.title)
    );

    for k in 0..=Y_TICKS {
        let v = frame.lo + (frame.hi - frame.lo) * k as f64 / Y_TICKS as f64;
        let y = frame.y(v);
        let label = if frame.hi - frame.lo >= 10.0 {
            format!("{v:.0}")
        } else {
            format!("{v:.1}")
        };
        let _ = writeln!(
            svg,
            "  <line x1='{:.1}' y1='{y:.1}' x2='{:.1}' y2='{y:.1}' stroke='#e5e5e5'/>",
            frame.left,
            frame.left + frame.width
        );
        let _ = writeln!(
            svg,
            "  <text x='{:.1}' y='{:.1}' text-anchor='end' fill='#555555' font-family='{FONT}' font-size='11'>{label}</text>",
            frame.left - 6.0,
            y + 4.0
        );
    }

    let axis_y = frame.y(0.0_f64.clamp(frame.lo, frame.hi));
    let _ = writeln!(
        svg,
        "  <line x1='{:.1}' y1='{axis_y:.1}' x2='{:.1}' y2='{axis_y:.1}' stroke='#333333'/>",
        frame.left,
        frame.left + frame.width
    );

    let mid_y = frame.top + frame.height / 2.0;
    let _ = writeln!(
        svg,
        "  <text transform='translate({:.1} {mid_y:.1}) rotate(-90)' text-anchor='middle' fill='#333333' font-family='{FONT}' font-size='13'>{}</text>",
        frame.left - 44.0,
        escape(&chart.y_label)
    );
}

fn x_label(svg: &mut String, x: f64, frame: &Frame, label: &str) {
    let _ = writeln!(
        svg,
        "  <text transform='translate({x:.1} {:.1}) rotate(-45)' text-anchor='end' fill='#333333' font-family='{FONT}' font-size='11'>{}</text>",
        frame.bottom() + 14.0,
        escape(label)
    );
}

fn legend(svg: &mut String, series: &[Series], right: f64, top: f64) {
    for (i, s) in series.iter().enumerate() {
        let y = top + i as f64 * 18.0;
        let _ = writeln!(
            svg,
            "  <rect x='{:.1}' y='{:.1}' width='12' height='12' fill='{}'/>",
            right - 110.0,
            y,
            s.color
        );
        let _ = writeln!(
            svg,
            "  <text x='{:.1}' y='{:.1}' fill='#333333' font-family='{FONT}' font-size='12'>{}</text>",
            right - 92.0,
            y + 10.0,
            escape(&s.name)
        );
    }
}

/// Grouped bar panels laid out left to right under one title.
pub fn render_bars(title: &str, panels: &[SeriesChart]) -> Result<String, ChartError> {
    if panels.is_empty() {
        return Err(ChartError::Empty {
            title: title.to_string(),
        });
    }
    for panel in panels {
        panel.validate()?;
    }

    let width = PANEL_WIDTH * panels.len() as f64;
    let mut svg = String::new();
    open_canvas(&mut svg, width, HEADER_HEIGHT + PANEL_HEIGHT, title);

    for (index, chart) in panels.iter().enumerate() {
        let (lo, hi) = chart.value_range();
        let frame = Frame::for_panel(index, lo, hi);
        panel_axes(&mut svg, chart, index, &frame);

        let group = frame.width / chart.labels.len() as f64;
        let bar = group * 0.8 / chart.series.len() as f64;
        let zero = frame.y(0.0_f64.clamp(lo, hi));

        for (i, label) in chart.labels.iter().enumerate() {
            let group_left = frame.left + i as f64 * group;
            for (s, series) in chart.series.iter().enumerate() {
                let v = series.values[i];
                let x = group_left + group * 0.1 + s as f64 * bar;
                let y = frame.y(v);
                let _ = writeln!(
                    svg,
                    "  <rect x='{x:.1}' y='{:.1}' width='{bar:.1}' height='{:.1}' fill='{}'><title>{}: {v}</title></rect>",
                    y.min(zero),
                    (zero - y).abs(),
                    series.color,
                    escape(label)
                );
            }
            x_label(&mut svg, group_left + group / 2.0, &frame, label);
        }

        legend(
            &mut svg,
            &chart.series,
            frame.left + frame.width,
            frame.top - 4.0,
        );
    }

    let _ = writeln!(svg, "</svg>");
    Ok(svg)
}

/// One panel of lines, a point marker at every label.
pub fn render_lines(chart: &SeriesChart) -> Result<String, ChartError> {
    chart.validate()?;

    let (lo, hi) = chart.value_range();
    let frame = Frame::for_panel(0, lo, hi);
    let mut svg = String::new();
    open_canvas(&mut svg, PANEL_WIDTH, HEADER_HEIGHT + PANEL_HEIGHT, &chart.title);
    panel_axes(&mut svg, chart, 0, &frame);

    let n = chart.labels.len();
    let x_at = |i: usize| {
        if n == 1 {
            frame.left + frame.width / 2.0
        } else {
            frame.left + i as f64 * frame.width / (n - 1) as f64
        }
    };

    for series in &chart.series {
        let points = series
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:.1},{:.1}", x_at(i), frame.y(*v)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            svg,
            "  <polyline points='{points}' fill='none' stroke='{}' stroke-width='2'/>",
            series.color
        );
        for (i, v) in series.values.iter().enumerate() {
            let _ = writeln!(
                svg,
                "  <circle cx='{:.1}' cy='{:.1}' r='3' fill='{}'/>",
                x_at(i),
                frame.y(*v),
                series.color
            );
        }
    }

    for (i, label) in chart.labels.iter().enumerate() {
        x_label(&mut svg, x_at(i), &frame, label);
    }
    legend(&mut svg, &chart.series, frame.left + frame.width, frame.top - 4.0);

    let _ = writeln!(svg, "</svg>");
    Ok(svg)
}

/// Pie of non-negative shares with a legend listing each percentage.
pub fn render_pie(chart: &PieChart) -> Result<String, ChartError> {
    if chart.values.len() != chart.labels.len() {
        return Err(ChartError::LengthMismatch {
            title: chart.title.clone(),
            series: "values".to_string(),
            expected: chart.labels.len(),
            actual: chart.values.len(),
        });
    }
    let total: f64 = chart.values.iter().map(|v| v.max(0.0)).sum();
    if chart.labels.is_empty() || total <= 0.0 {
        return Err(ChartError::Empty {
            title: chart.title.clone(),
        });
    }

    let mut svg = String::new();
    open_canvas(&mut svg, PANEL_WIDTH, HEADER_HEIGHT + PANEL_HEIGHT, &chart.title);

    let (cx, cy, r) = (240.0, HEADER_HEIGHT + PANEL_HEIGHT / 2.0, 180.0);
    let mut start = -PI / 2.0;

    for (i, (label, value)) in chart.labels.iter().zip(&chart.values).enumerate() {
        let share = value.max(0.0) / total;
        let color = PALETTE[i % PALETTE.len()];
        let sweep = share * 2.0 * PI;
        let end = start + sweep;

        if share >= 1.0 - f64::EPSILON {
            let _ = writeln!(svg, "  <circle cx='{cx:.1}' cy='{cy:.1}' r='{r:.1}' fill='{color}'/>");
        } else if share > 0.0 {
            let (x1, y1) = (cx + r * start.cos(), cy + r * start.sin());
            let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
            let large = if sweep > PI { 1 } else { 0 };
            let _ = writeln!(
                svg,
                "  <path d='M {cx:.1} {cy:.1} L {x1:.1} {y1:.1} A {r:.1} {r:.1} 0 {large} 1 {x2:.1} {y2:.1} Z' fill='{color}' stroke='#ffffff'/>"
            );
        }

        if share > 0.0 {
            let mid = start + sweep / 2.0;
            let _ = writeln!(
                svg,
                "  <text x='{:.1}' y='{:.1}' text-anchor='middle' fill='#ffffff' font-family='{FONT}' font-size='12'>{:.1}%</text>",
                cx + r * 0.65 * mid.cos(),
                cy + r * 0.65 * mid.sin() + 4.0,
                share * 100.0
            );
        }

        let ly = HEADER_HEIGHT + 80.0 + i as f64 * 22.0;
        let _ = writeln!(svg, "  <rect x='450' y='{ly:.1}' width='14' height='14' fill='{color}'/>");
        let _ = writeln!(
            svg,
            "  <text x='470' y='{:.1}' fill='#333333' font-family='{FONT}' font-size='12'>{} ({value:.1})</text>",
            ly + 11.0,
            escape(label)
        );

        start = end;
    }

    let _ = writeln!(svg, "</svg>");
    Ok(svg)
}
