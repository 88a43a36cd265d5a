use crossterm::event::{Event, KeyCode};
use gamescore_table::analysis::{ScoreAnalysis, Z_THRESHOLD, ZScoreAnalysis};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Tabs,
};

use crate::{
    tui::App,
    view::{Distribution, SeriesChart, SummaryPanel},
};

/// Screen of the plot viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr)]
pub(crate) enum PlotView {
    #[display("scores")]
    Scores,
    #[display("zscores")]
    ZScores,
    #[display("distribution")]
    Distribution,
}

impl PlotView {
    const ALL: [Self; 3] = [Self::Scores, Self::ZScores, Self::Distribution];

    fn index(self) -> usize {
        match self {
            Self::Scores => 0,
            Self::ZScores => 1,
            Self::Distribution => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug)]
pub(crate) struct PlotApp {
    scores: ScoreAnalysis,
    z_scores: ZScoreAnalysis,
    // chart-ready copies of the series
    score_points: Vec<(f64, f64)>,
    score_trend: Vec<(f64, f64)>,
    z_points: Vec<(f64, f64)>,
    z_trend: Vec<(f64, f64)>,
    view: PlotView,
    should_exit: bool,
}

impl PlotApp {
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn new(scores: ScoreAnalysis, z_scores: ZScoreAnalysis, view: PlotView) -> Self {
        let score_points = scores
            .scores
            .iter()
            .enumerate()
            .map(|(position, (_, score))| (position as f64, *score))
            .collect();
        let z_points = z_scores
            .z_scores
            .iter()
            .map(|(game, z)| (*game as f64, *z))
            .collect();
        Self {
            score_trend: scores.trend_line(),
            z_trend: z_scores.trend_line(),
            scores,
            z_scores,
            score_points,
            z_points,
            view,
            should_exit: false,
        }
    }

    fn draw_scores(&self, frame: &mut Frame, area: Rect) {
        let [summary_area, chart_area] =
            Layout::horizontal([Constraint::Length(26), Constraint::Fill(1)]).areas(area);
        frame.render_widget(
            SummaryPanel {
                title: "Scores",
                summary: self.scores.summary.as_ref(),
                trend: self.scores.trend,
                notes: vec![],
            },
            summary_area,
        );
        frame.render_widget(
            SeriesChart {
                title: &self.scores.player,
                points: &self.score_points,
                trend: &self.score_trend,
                x_title: "games played",
                y_title: "score",
                guides: &[],
            },
            chart_area,
        );
    }

    fn draw_z_scores(&self, frame: &mut Frame, area: Rect) {
        let [summary_area, chart_area] =
            Layout::horizontal([Constraint::Length(26), Constraint::Fill(1)]).areas(area);
        let outliers = self.z_scores.outliers().count();
        frame.render_widget(
            SummaryPanel {
                title: "Z-scores",
                summary: self.z_scores.summary.as_ref(),
                trend: self.z_scores.trend,
                notes: vec![
                    Line::raw(""),
                    Line::raw(format!("  Ref:    {:>10}", self.z_scores.reference)),
                    Line::raw(format!("  |z|>{Z_THRESHOLD}: {outliers:>10}")),
                ],
            },
            summary_area,
        );
        frame.render_widget(
            SeriesChart {
                title: &self.z_scores.player,
                points: &self.z_points,
                trend: &self.z_trend,
                x_title: "game",
                y_title: "z",
                guides: &[-Z_THRESHOLD, 0.0, Z_THRESHOLD],
            },
            chart_area,
        );
    }

    fn draw_distribution(&self, frame: &mut Frame, area: Rect) {
        let [summary_area, chart_area] =
            Layout::horizontal([Constraint::Length(26), Constraint::Fill(1)]).areas(area);
        frame.render_widget(
            SummaryPanel {
                title: "Z-scores",
                summary: self.z_scores.summary.as_ref(),
                trend: None,
                notes: vec![],
            },
            summary_area,
        );
        frame.render_widget(
            Distribution {
                title: "Z-score distribution",
                histogram: &self.z_scores.distribution,
            },
            chart_area,
        );
    }
}

impl App for PlotApp {
    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
                KeyCode::Tab | KeyCode::Right => self.view = self.view.next(),
                KeyCode::BackTab | KeyCode::Left => self.view = self.view.prev(),
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [tabs_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let tabs = Tabs::new(PlotView::ALL.map(|view| view.to_string()))
            .select(self.view.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, tabs_area);

        match self.view {
            PlotView::Scores => self.draw_scores(frame, body_area),
            PlotView::ZScores => self.draw_z_scores(frame, body_area),
            PlotView::Distribution => self.draw_distribution(frame, body_area),
        }

        frame.render_widget(
            Line::raw(" Tab/→ next view   Shift+Tab/← previous view   q quit"),
            help_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use gamescore_table::{ScoreTable, ZScoreReference};

    use super::*;

    fn app(view: PlotView) -> PlotApp {
        let table = ScoreTable::new(
            ["A", "B"].map(String::from).to_vec(),
            vec![vec![Some(1.0), Some(3.0)], vec![Some(9.0), Some(5.0)]],
        )
        .unwrap();
        PlotApp::new(
            ScoreAnalysis::new(&table, "A").unwrap(),
            ZScoreAnalysis::new(&table, "A", ZScoreReference::Computed).unwrap(),
            view,
        )
    }

    fn press(app: &mut PlotApp, code: KeyCode) {
        app.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_view_cycles() {
        let mut app = app(PlotView::Scores);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, PlotView::ZScores);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.view, PlotView::Distribution);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.view, PlotView::Scores);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.view, PlotView::Distribution);
        assert!(!app.should_exit());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_view_parses() {
        assert_eq!("zscores".parse::<PlotView>().unwrap(), PlotView::ZScores);
        assert_eq!(PlotView::Distribution.to_string(), "distribution");
    }

    #[test]
    fn test_series_are_prepared() {
        let app = app(PlotView::ZScores);
        assert_eq!(app.score_points, vec![(0.0, 1.0), (1.0, 9.0)]);
        assert_eq!(app.z_points, vec![(0.0, -1.0), (1.0, 1.0)]);
        assert_eq!(app.z_trend.len(), 2);
    }
}
