//! Charts screen: a 2x2 panel of exploratory plots over the housing dataset.
//!
//! Panel contents mirror the classic exploratory figure for this dataset:
//! bedrooms histogram, price boxplot, price-vs-area scatter, and a numeric
//! correlation heatmap. Everything here is presentational; the series are
//! precomputed by `data::housing`.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::data::{BoxStats, CorrMatrix, HousingSummary};
use crate::report::format_five_number;
use crate::tui::plotters_chart::ScatterChart;

pub fn draw(frame: &mut ratatui::Frame<'_>, area: Rect, summary: &HousingSummary) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(47),
            Constraint::Length(1),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    draw_histogram(frame, top[0], summary);
    draw_boxplot(frame, top[1], &summary.price_box);
    draw_scatter(frame, bottom[0], summary);
    draw_heatmap(frame, bottom[1], &summary.corr);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Esc/q back to form",
        Style::default().fg(Color::Gray),
    )));
    frame.render_widget(footer, rows[2]);
}

fn draw_histogram(frame: &mut ratatui::Frame<'_>, area: Rect, summary: &HousingSummary) {
    let bars: Vec<Bar> = summary
        .bedrooms_hist
        .iter()
        .map(|bin| {
            Bar::default()
                .value(bin.count)
                .label(Line::from(bin.label.clone()))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Distribution of Bedrooms")
                .borders(Borders::ALL),
        )
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn draw_boxplot(frame: &mut ratatui::Frame<'_>, area: Rect, stats: &BoxStats) {
    let block = Block::default()
        .title("Boxplot of Price")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2).max(10) as usize;
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            render_box_line(stats, width),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format_five_number(stats),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!(
                "IQR fences: [{:.0}, {:.0}]",
                stats.lower_fence, stats.upper_fence
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_scatter(frame: &mut ratatui::Frame<'_>, area: Rect, summary: &HousingSummary) {
    let block = Block::default()
        .title("Price vs. Area")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (x_bounds, y_bounds) = padded_bounds(&summary.scatter);
    let widget = ScatterChart {
        points: &summary.scatter,
        x_bounds,
        y_bounds,
        x_label: "area (sq ft)",
        y_label: "price",
    };
    frame.render_widget(widget, inner);
}

fn draw_heatmap(frame: &mut ratatui::Frame<'_>, area: Rect, corr: &CorrMatrix) {
    let block = Block::default()
        .title("Correlation Heatmap")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cell = 6usize;
    let mut lines = Vec::with_capacity(corr.len() + 1);

    // Column header with abbreviated labels.
    let mut header = vec![Span::raw(" ".repeat(cell))];
    for label in &corr.labels {
        header.push(Span::styled(
            pad_cell(&abbrev(label), cell),
            Style::default().fg(Color::Gray),
        ));
    }
    lines.push(Line::from(header));

    for i in 0..corr.len() {
        let mut spans = vec![Span::styled(
            pad_cell(&abbrev(&corr.labels[i]), cell),
            Style::default().fg(Color::Gray),
        )];
        for j in 0..corr.len() {
            let r = corr.get(i, j);
            spans.push(Span::styled(
                pad_cell(&format!("{r:.2}"), cell),
                Style::default().fg(Color::Black).bg(heat_color(r)),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Map a correlation in [-1, 1] to a blue-white-red ramp.
fn heat_color(r: f64) -> Color {
    let r = r.clamp(-1.0, 1.0);
    if r >= 0.0 {
        let fade = (255.0 * (1.0 - r)) as u8;
        Color::Rgb(255, fade, fade)
    } else {
        let fade = (255.0 * (1.0 + r)) as u8;
        Color::Rgb(fade, fade, 255)
    }
}

fn abbrev(label: &str) -> String {
    label.chars().take(5).collect()
}

fn pad_cell(s: &str, width: usize) -> String {
    format!("{s:>width$}")
}

/// Render a one-line box-and-whisker glyph scaled to `width` characters.
///
/// Whiskers span min..max; `[` and `]` mark the quartiles and `|` the median.
fn render_box_line(stats: &BoxStats, width: usize) -> String {
    let width = width.max(10);
    let span = stats.max - stats.min;
    let pos = |v: f64| -> usize {
        if span <= 0.0 {
            return 0;
        }
        (((v - stats.min) / span) * (width - 1) as f64).round() as usize
    };

    let mut chars = vec![' '; width];
    for slot in chars.iter_mut().take(pos(stats.max) + 1).skip(pos(stats.min)) {
        *slot = '-';
    }
    for slot in chars.iter_mut().take(pos(stats.q3) + 1).skip(pos(stats.q1)) {
        *slot = '=';
    }
    chars[pos(stats.min)] = '|';
    chars[pos(stats.max)] = '|';
    chars[pos(stats.q1)] = '[';
    chars[pos(stats.q3)] = ']';
    chars[pos(stats.median)] = '|';

    chars.into_iter().collect()
}

/// Bounds with a 5% pad, falling back to a unit box for degenerate data.
fn padded_bounds(points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite())
        || x_max <= x_min
        || y_max <= y_min
    {
        return ([0.0, 1.0], [0.0, 1.0]);
    }

    let x_pad = ((x_max - x_min) * 0.05).max(1e-12);
    let y_pad = ((y_max - y_min) * 0.05).max(1e-12);
    ([x_min - x_pad, x_max + x_pad], [y_min - y_pad, y_max + y_pad])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_color_hits_the_ramp_endpoints() {
        assert_eq!(heat_color(1.0), Color::Rgb(255, 0, 0));
        assert_eq!(heat_color(-1.0), Color::Rgb(0, 0, 255));
        assert_eq!(heat_color(0.0), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn box_line_orders_its_glyphs() {
        let stats = BoxStats {
            min: 0.0,
            q1: 25.0,
            median: 50.0,
            q3: 75.0,
            max: 100.0,
            lower_fence: -50.0,
            upper_fence: 150.0,
        };
        let line = render_box_line(&stats, 41);
        assert_eq!(line.len(), 41);
        let q1 = line.find('[').unwrap();
        let q3 = line.find(']').unwrap();
        let median = line[q1..q3].find('|').unwrap() + q1;
        assert!(q1 < median && median < q3);
        assert_eq!(line.chars().next(), Some('|'));
        assert_eq!(line.chars().last(), Some('|'));
    }

    #[test]
    fn degenerate_scatter_falls_back_to_unit_bounds() {
        assert_eq!(padded_bounds(&[]), ([0.0, 1.0], [0.0, 1.0]));
        assert_eq!(padded_bounds(&[(2.0, 3.0)]), ([0.0, 1.0], [0.0, 1.0]));
    }

    #[test]
    fn padded_bounds_extend_past_the_data() {
        let ([x0, x1], [y0, y1]) = padded_bounds(&[(0.0, 10.0), (100.0, 20.0)]);
        assert!(x0 < 0.0 && x1 > 100.0);
        assert!(y0 < 10.0 && y1 > 20.0);
    }
}
