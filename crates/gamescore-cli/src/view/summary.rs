use gamescore_stats::{descriptive::DescriptiveStats, regression::LinearTrend};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

/// Text panel with summary statistics and the trend slope.
#[derive(Debug)]
pub struct SummaryPanel<'a> {
    pub title: &'a str,
    pub summary: Option<&'a DescriptiveStats>,
    pub trend: Option<LinearTrend>,
    /// Extra lines appended below the statistics.
    pub notes: Vec<Line<'a>>,
}

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut text = match self.summary {
            Some(stats) => vec![
                Line::raw(format!("  Count:  {:10}", stats.count)),
                Line::raw(format!("  Mean:   {:10.2}", stats.mean)),
                Line::raw(format!("  Median: {:10.2}", stats.median)),
                Line::raw(format!("  Min:    {:10.2}", stats.min)),
                Line::raw(format!("  Max:    {:10.2}", stats.max)),
                Line::raw(format!("  StdDev: {:10.2}", stats.std_dev)),
            ],
            None => vec![Line::raw("  no data")],
        };
        if let Some(trend) = self.trend {
            text.push(Line::raw(format!("  Slope:  {:+10.3}", trend.slope)));
        }
        text.extend(self.notes);

        let paragraph = Paragraph::new(text).block(
            Block::bordered()
                .merge_borders(MergeStrategy::Exact)
                .title(self.title),
        );
        Widget::render(paragraph, area, buf);
    }
}
