//! Side-by-side horizontal bar chart of the good/bad rating distributions.
#![allow(clippy::cast_precision_loss)]

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use flavorstat_core::error::{Error, Result};
use flavorstat_core::types::PartitionedGroups;

use crate::histogram::{RatingHistogram, RATING_VALUES};

pub const CAPTION: &str = "Food.com Recipe Ratings (2000-2018)";

/// Bar colors for ratings 1 through 5.
pub const BAR_COLORS: [RGBColor; 5] = [RED, RGBColor(255, 192, 203), YELLOW, CYAN, BLUE];

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub histogram: RatingHistogram,
}

impl Panel {
    fn new(title: String, histogram: RatingHistogram) -> Self {
        let x_label = format!("Number of Ratings (Total: {})", histogram.total());
        Self { title, x_label, histogram }
    }

    pub fn mean_label(&self) -> Option<String> { self.histogram.mean().map(|m| format!("Average Rating {m:.5}")) }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    pub with: Panel,
    pub without: Panel,
    size: (u32, u32),
}

impl ComparisonChart {
    pub fn new(ingredient: &str, groups: &PartitionedGroups) -> Self {
        let name = capitalize(ingredient);
        Self {
            with: Panel::new(format!("Recipes With {name}"), RatingHistogram::from_group(&groups.good)),
            without: Panel::new(format!("Recipes Without {name}"), RatingHistogram::from_group(&groups.bad)),
            size: (800, 600),
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Write the chart; `.svg` paths use the SVG backend, anything else a bitmap.
    pub fn render(&self, path: &Path) -> Result<PathBuf> {
        let is_svg = path.extension().and_then(|s| s.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg {
            self.draw(SVGBackend::new(path, self.size).into_drawing_area())?;
        } else {
            self.draw(BitMapBackend::new(path, self.size).into_drawing_area())?;
        }
        info!(path = %path.display(), "rendered comparison chart");
        Ok(path.to_path_buf())
    }

    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE).map_err(plot_err)?;
        let root = root.titled(CAPTION, ("sans-serif", 22)).map_err(plot_err)?;
        let areas = root.split_evenly((1, 2));
        for (area, panel) in areas.iter().zip([&self.with, &self.without]) {
            draw_panel(area, panel)?;
        }
        root.present().map_err(plot_err)
    }
}

fn draw_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &Panel) -> Result<()> {
    let histogram = &panel.histogram;
    let x_max = (histogram.max_count() as f64 * 1.15).max(1.0);
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 16))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(30)
        .build_cartesian_2d(0f64..x_max, (-0.5f64..4.5f64).with_key_points(bar_positions()))
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&panel.x_label)
        .y_labels(5)
        .y_label_formatter(&rating_tick)
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(histogram.counts().iter().enumerate().map(|(i, &count)| {
            let y = i as f64;
            Rectangle::new([(0.0, y - 0.5), (count as f64, y + 0.5)], BAR_COLORS[i].filled())
        }))
        .map_err(plot_err)?;

    if let (Some(marker), Some(label)) = (histogram.mean_marker(), panel.mean_label()) {
        chart.draw_series(LineSeries::new(vec![(0.0, marker), (x_max, marker)], &GREEN)).map_err(plot_err)?;
        let style = ("sans-serif", 12).into_font().color(&GREEN).pos(Pos::new(HPos::Right, VPos::Top));
        chart
            .draw_series(std::iter::once(Text::new(format!("{label}  "), (x_max, marker - 0.05), style)))
            .map_err(plot_err)?;
    }
    Ok(())
}

/// Bar centers on the zero-based axis, one per rating.
fn bar_positions() -> Vec<f64> { (0..RATING_VALUES.len()).map(|i| i as f64).collect() }

/// Bar positions 0..=4 carry the ratings 1..=5.
fn rating_tick(y: &f64) -> String {
    let nearest = y.round();
    if (y - nearest).abs() < 1e-6 && (0.0..=4.0).contains(&nearest) { format!("{}", nearest + 1.0) } else { String::new() }
}

fn plot_err(e: impl std::fmt::Display) -> Error { Error::Plot(e.to_string()) }

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_label_ratings() {
        assert_eq!(rating_tick(&0.0), "1");
        assert_eq!(rating_tick(&4.0), "5");
        assert_eq!(rating_tick(&0.5), "");
        assert_eq!(rating_tick(&-0.5), "");
    }

    #[test]
    fn every_bar_gets_a_rating_label() {
        let labels: Vec<String> = bar_positions().iter().map(rating_tick).collect();
        assert_eq!(labels, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn capitalize_matches_title_case_of_one_word() {
        assert_eq!(capitalize("bread crumb"), "Bread crumb");
        assert_eq!(capitalize("KALE"), "Kale");
        assert_eq!(capitalize(""), "");
    }
}
