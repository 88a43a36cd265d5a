use gamescore_stats::histogram::Histogram;
use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    symbols::merge::MergeStrategy,
    widgets::{Bar, BarChart, Block, Widget},
};

/// Horizontal bar chart of histogram bins.
#[derive(Debug)]
pub struct Distribution<'a> {
    pub title: &'a str,
    pub histogram: &'a Histogram,
}

impl Widget for Distribution<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let chart = BarChart::new(
            self.histogram
                .bins
                .iter()
                .map(|bin| {
                    Bar::with_label(
                        format!("{:6.2}..{:6.2}", bin.range.start, bin.range.end),
                        bin.count,
                    )
                    .text_value(format!("{}", bin.count))
                })
                .collect::<Vec<_>>(),
        )
        .block(
            Block::bordered()
                .merge_borders(MergeStrategy::Exact)
                .title(self.title),
        )
        .direction(Direction::Horizontal)
        .bar_gap(0);

        Widget::render(chart, area, buf);
    }
}
