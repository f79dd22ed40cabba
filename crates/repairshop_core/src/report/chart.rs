//! Cost/income bar charts keyed by group label.
//!
//! A chart is plain data handed to an output surface: SVG for files and
//! `#` bars for the terminal. No aggregation happens here.

use crate::model::period::Period;
use crate::model::summary::GroupTotal;
use crate::report::currency::format_currency;
use crate::report::{write_artifact, ReportResult};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const DEFAULT_COLOR: &str = "steelblue";
const SVG_WIDTH: f64 = 800.0;
const SVG_HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 150.0;

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Single-series bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: String,
    pub bars: Vec<Bar>,
}

/// Cost and income charts rendered from the same groups.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPair {
    pub costs: BarChart,
    pub incomes: BarChart,
}

/// Fill colour used for a period's charts.
pub fn period_color(period: Period) -> &'static str {
    match period {
        Period::Daily => "lightblue",
        Period::Weekly => "lightgreen",
        Period::Monthly => "lightcoral",
    }
}

/// Projects groups into a cost chart and an income chart titled
/// `"{title} Repair Costs"` and `"{title} Repair Incomes"`.
pub fn render_chart(groups: &[GroupTotal], title: &str) -> ChartPair {
    let series = |metric: &str, value: fn(&GroupTotal) -> f64| BarChart {
        title: format!("{title} Repair {metric}"),
        x_label: "Descriptions".to_string(),
        y_label: metric.to_string(),
        color: DEFAULT_COLOR.to_string(),
        bars: groups
            .iter()
            .map(|group| Bar {
                label: group.label.clone(),
                value: value(group),
            })
            .collect(),
    };

    ChartPair {
        costs: series("Costs", |group| group.cost),
        incomes: series("Incomes", |group| group.income),
    }
}

/// [`render_chart`] titled and coloured for `period`.
pub fn render_period_chart(groups: &[GroupTotal], period: Period) -> ChartPair {
    render_chart(groups, period.label()).with_color(period_color(period))
}

impl ChartPair {
    pub fn with_color(mut self, color: &str) -> Self {
        self.costs.color = color.to_string();
        self.incomes.color = color.to_string();
        self
    }

    /// Writes `<period>_chart_costs.svg` and `<period>_chart_incomes.svg`
    /// into `dir`, replacing earlier files.
    pub fn write_svg(&self, dir: &Path, period: Period) -> ReportResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(2);
        for (chart, suffix) in [(&self.costs, "costs"), (&self.incomes, "incomes")] {
            let path = dir.join(format!("{}_chart_{suffix}.svg", period.key()));
            write_artifact(&path, chart.to_svg().as_bytes())?;
            written.push(path);
        }
        Ok(written)
    }
}

impl BarChart {
    fn max_value(&self) -> f64 {
        self.bars
            .iter()
            .map(|bar| bar.value)
            .fold(0.0_f64, f64::max)
    }

    /// Renders the chart as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let plot_width = SVG_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = SVG_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let baseline = MARGIN_TOP + plot_height;
        let max_value = self.max_value();

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SVG_WIDTH}" height="{SVG_HEIGHT}" viewBox="0 0 {SVG_WIDTH} {SVG_HEIGHT}" font-family="Helvetica, Arial, sans-serif">"#
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="30" font-size="20" text-anchor="middle">{}</text>"#,
            SVG_WIDTH / 2.0,
            xml_escape(&self.title)
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{baseline}" stroke="black"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{baseline}" x2="{}" y2="{baseline}" stroke="black"/>"#,
            SVG_WIDTH - MARGIN_RIGHT
        );
        let _ = writeln!(
            svg,
            r#"<text x="20" y="{}" font-size="14" text-anchor="middle" transform="rotate(-90 20 {})">{}</text>"#,
            MARGIN_TOP + plot_height / 2.0,
            MARGIN_TOP + plot_height / 2.0,
            xml_escape(&self.y_label)
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" font-size="14" text-anchor="middle">{}</text>"#,
            MARGIN_LEFT + plot_width / 2.0,
            SVG_HEIGHT - 15.0,
            xml_escape(&self.x_label)
        );

        if !self.bars.is_empty() {
            let slot = plot_width / self.bars.len() as f64;
            let bar_width = slot * 0.7;
            for (index, bar) in self.bars.iter().enumerate() {
                let height = if max_value > 0.0 {
                    bar.value / max_value * plot_height
                } else {
                    0.0
                };
                let x = MARGIN_LEFT + slot * index as f64 + (slot - bar_width) / 2.0;
                let center = x + bar_width / 2.0;
                let _ = writeln!(
                    svg,
                    r#"<rect x="{x:.1}" y="{:.1}" width="{bar_width:.1}" height="{height:.1}" fill="{}" stroke="black" stroke-width="0.5"/>"#,
                    baseline - height,
                    xml_escape(&self.color)
                );
                let _ = writeln!(
                    svg,
                    r#"<text x="{center:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"#,
                    baseline - height - 4.0,
                    xml_escape(&format_currency(bar.value))
                );
                let _ = writeln!(
                    svg,
                    r#"<text x="{center:.1}" y="{:.1}" font-size="12" text-anchor="end" transform="rotate(-45 {center:.1} {:.1})">{}</text>"#,
                    baseline + 16.0,
                    baseline + 16.0,
                    xml_escape(&bar.label)
                );
            }
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Renders the chart as horizontal `#` bars at most `width` characters
    /// long.
    pub fn to_text(&self, width: usize) -> String {
        let mut text = format!("{}\n", self.title);
        if self.bars.is_empty() {
            text.push_str("  (no repairs in this period)\n");
            return text;
        }

        let label_width = self
            .bars
            .iter()
            .map(|bar| bar.label.chars().count())
            .max()
            .unwrap_or(0);
        let max_value = self.max_value();

        for bar in &self.bars {
            let length = if max_value > 0.0 {
                (bar.value / max_value * width as f64).round() as usize
            } else {
                0
            };
            let _ = writeln!(
                text,
                "  {:<label_width$} | {} {}",
                bar.label,
                "#".repeat(length),
                format_currency(bar.value)
            );
        }
        text
    }
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{render_chart, render_period_chart};
    use crate::model::period::Period;
    use crate::model::summary::GroupTotal;

    fn sample_groups() -> Vec<GroupTotal> {
        vec![
            GroupTotal::new("screen repair", 50.0, 100.0),
            GroupTotal::new("battery", 20.0, 40.0),
        ]
    }

    #[test]
    fn chart_pair_projects_cost_and_income_by_label() {
        let charts = render_chart(&sample_groups(), "Weekly");

        assert_eq!(charts.costs.title, "Weekly Repair Costs");
        assert_eq!(charts.incomes.title, "Weekly Repair Incomes");
        assert_eq!(charts.costs.y_label, "Costs");
        assert_eq!(charts.incomes.x_label, "Descriptions");

        let cost_values: Vec<_> = charts.costs.bars.iter().map(|bar| bar.value).collect();
        let income_labels: Vec<_> = charts
            .incomes
            .bars
            .iter()
            .map(|bar| bar.label.as_str())
            .collect();
        assert_eq!(cost_values, vec![50.0, 20.0]);
        assert_eq!(income_labels, vec!["screen repair", "battery"]);
    }

    #[test]
    fn period_chart_uses_period_colour() {
        let charts = render_period_chart(&sample_groups(), Period::Monthly);
        assert_eq!(charts.costs.color, "lightcoral");
        assert_eq!(charts.incomes.color, "lightcoral");
        assert_eq!(charts.costs.title, "Monthly Repair Costs");
    }

    #[test]
    fn text_bars_scale_to_largest_value() {
        let text = render_chart(&sample_groups(), "Daily").costs.to_text(10);

        assert!(text.starts_with("Daily Repair Costs\n"));
        assert!(text.contains("screen repair | ########## $50.00"));
        assert!(text.contains("battery       | #### $20.00"));
    }

    #[test]
    fn svg_escapes_labels_and_draws_one_rect_per_bar() {
        let groups = vec![GroupTotal::new("glass <front> & back", 10.0, 0.0)];
        let svg = render_chart(&groups, "Daily").costs.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("glass &lt;front&gt; &amp; back"));
        assert_eq!(svg.matches("fill=\"steelblue\"").count(), 1);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn empty_chart_renders_placeholder() {
        let charts = render_chart(&[], "Daily");
        assert!(charts.incomes.to_text(20).contains("no repairs"));
        assert!(!charts.incomes.to_svg().contains("stroke-width=\"0.5\""));
    }
}
