use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::{Marker, merge::MergeStrategy},
    widgets::{Axis, Block, Chart, Dataset, GraphType, Widget},
};

/// Scatter of a series with its fitted trend and optional horizontal guides.
#[derive(Debug)]
pub struct SeriesChart<'a> {
    pub title: &'a str,
    pub points: &'a [(f64, f64)],
    pub trend: &'a [(f64, f64)],
    pub x_title: &'a str,
    pub y_title: &'a str,
    /// Horizontal lines drawn across the chart (e.g. z = 0 and the outlier thresholds).
    pub guides: &'a [f64],
}

impl SeriesChart<'_> {
    fn x_bounds(&self) -> [f64; 2] {
        padded_bounds(self.points.iter().chain(self.trend).map(|(x, _)| *x))
    }

    fn y_bounds(&self) -> [f64; 2] {
        padded_bounds(
            self.points
                .iter()
                .chain(self.trend)
                .map(|(_, y)| *y)
                .chain(self.guides.iter().copied()),
        )
    }
}

/// Range covering every value, widened when empty or degenerate.
fn padded_bounds<I>(values: I) -> [f64; 2]
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        });
    if min > max {
        return [0.0, 1.0];
    }
    if min == max {
        return [min - 0.5, max + 0.5];
    }
    let margin = (max - min) * 0.05;
    [min - margin, max + margin]
}

fn labels(bounds: [f64; 2]) -> [String; 3] {
    [
        format!("{:.1}", bounds[0]),
        format!("{:.1}", f64::midpoint(bounds[0], bounds[1])),
        format!("{:.1}", bounds[1]),
    ]
}

impl Widget for SeriesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let x_bounds = self.x_bounds();
        let y_bounds = self.y_bounds();
        let guide_lines = self
            .guides
            .iter()
            .map(|y| [(x_bounds[0], *y), (x_bounds[1], *y)])
            .collect::<Vec<_>>();

        let mut datasets = guide_lines
            .iter()
            .map(|line| {
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::DarkGray))
                    .data(line)
            })
            .collect::<Vec<_>>();
        datasets.push(
            Dataset::default()
                .name("trend")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(self.trend),
        );
        datasets.push(
            Dataset::default()
                .name(self.y_title)
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Cyan))
                .data(self.points),
        );

        let x_axis = Axis::default()
            .title(self.x_title)
            .bounds(x_bounds)
            .labels(labels(x_bounds));
        let y_axis = Axis::default()
            .title(self.y_title)
            .bounds(y_bounds)
            .labels(labels(y_bounds));
        let chart = Chart::new(datasets)
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(self.title),
            )
            .x_axis(x_axis)
            .y_axis(y_axis);

        Widget::render(chart, area, buf);
    }
}
