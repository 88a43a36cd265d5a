pub use self::{distribution::Distribution, series_chart::SeriesChart, summary::SummaryPanel};

mod distribution;
mod series_chart;
mod summary;
