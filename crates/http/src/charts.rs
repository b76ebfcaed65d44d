//! Inline SVG bar charts for the statistics page.

use std::fmt::Write as _;

use crate::views::escape_html;

const WIDTH: f64 = 640.0;
const LABEL_COLUMN: f64 = 150.0;
const ROW_HEIGHT: f64 = 28.0;
const BAR_COLOR: &str = "#4e79a7";

const PLOT_HEIGHT: f64 = 220.0;
const PLOT_TOP: f64 = 40.0;
const PLOT_LEFT: f64 = 40.0;

fn empty_chart() -> String {
    "<p class=\"empty\">No data yet.</p>\n".to_owned()
}

fn max_value(bars: &[(String, u64)]) -> f64 {
    bars.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1) as f64
}

/// One horizontal bar per entry, in the order given (first at the top).
pub fn horizontal_bars(title: &str, bars: &[(String, u64)]) -> String {
    if bars.is_empty() {
        return empty_chart();
    }
    let max = max_value(bars);
    let bar_area = WIDTH - LABEL_COLUMN - 60.0;
    let height = PLOT_TOP + ROW_HEIGHT * bars.len() as f64 + 10.0;

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" width=\"{WIDTH}\" height=\"{height}\" viewBox=\"0 0 {WIDTH} {height}\">\n\
         <title>{}</title>\n\
         <text x=\"{}\" y=\"20\" text-anchor=\"middle\" font-weight=\"bold\">{}</text>\n",
        escape_html(title),
        WIDTH / 2.0,
        escape_html(title)
    );
    for (i, (label, value)) in bars.iter().enumerate() {
        let y = PLOT_TOP + ROW_HEIGHT * i as f64;
        let width = (*value as f64 / max * bar_area).max(1.0);
        let _ = writeln!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{}</text>\
             <rect x=\"{LABEL_COLUMN}\" y=\"{y:.1}\" width=\"{width:.1}\" height=\"{:.1}\" fill=\"{BAR_COLOR}\"/>\
             <text x=\"{:.1}\" y=\"{:.1}\">{value}</text>",
            LABEL_COLUMN - 8.0,
            y + ROW_HEIGHT / 2.0 + 4.0,
            escape_html(label),
            ROW_HEIGHT - 6.0,
            LABEL_COLUMN + width + 6.0,
            y + ROW_HEIGHT / 2.0 + 4.0,
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// One vertical bar per entry, left to right, labelled underneath.
pub fn vertical_bars(title: &str, bars: &[(String, u64)]) -> String {
    if bars.is_empty() {
        return empty_chart();
    }
    let max = max_value(bars);
    let slot = (WIDTH - 2.0 * PLOT_LEFT) / bars.len() as f64;
    let bar_width = slot * 0.6;
    let baseline = PLOT_TOP + PLOT_HEIGHT;
    let height = baseline + 40.0;

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" width=\"{WIDTH}\" height=\"{height}\" viewBox=\"0 0 {WIDTH} {height}\">\n\
         <title>{}</title>\n\
         <text x=\"{}\" y=\"20\" text-anchor=\"middle\" font-weight=\"bold\">{}</text>\n\
         <line x1=\"{PLOT_LEFT}\" y1=\"{baseline}\" x2=\"{}\" y2=\"{baseline}\" stroke=\"#9aa5b1\"/>\n",
        escape_html(title),
        WIDTH / 2.0,
        escape_html(title),
        WIDTH - PLOT_LEFT
    );
    for (i, (label, value)) in bars.iter().enumerate() {
        let bar_height = *value as f64 / max * PLOT_HEIGHT;
        let center = PLOT_LEFT + slot * i as f64 + slot / 2.0;
        let x = center - bar_width / 2.0;
        let y = baseline - bar_height;
        let _ = writeln!(
            svg,
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{bar_width:.1}\" height=\"{bar_height:.1}\" fill=\"{BAR_COLOR}\"/>\
             <text x=\"{center:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{value}</text>\
             <text x=\"{center:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>",
            y - 4.0,
            baseline + 18.0,
            escape_html(label),
        );
    }
    svg.push_str("</svg>\n");
    svg
}
