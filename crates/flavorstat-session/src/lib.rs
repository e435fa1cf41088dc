//! flavorstat-session
//!
//! Wires catalog, dataset builder, significance tester and chart into the
//! interactive ingredient session. The dataset and chart sides sit behind
//! `GroupSource` and `ChartWriter` so the session can be driven without the
//! Food.com dumps or a font stack.

pub mod prompt;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use flavorstat_core::config::PlotSettings;
use flavorstat_core::types::PartitionedGroups;
use flavorstat_data::{DatasetBuilder, IngredientCatalog};
use flavorstat_stats::{SignificanceReport, SignificanceTester};
use flavorstat_viz::ComparisonChart;

pub use prompt::{IngredientPrompt, PromptState};

pub trait GroupSource {
    /// Fails when a required input is missing; runs before any progress output.
    fn check_sources(&self) -> flavorstat_core::Result<()> { Ok(()) }

    fn groups(&self, catalog: &IngredientCatalog, ingredient: &str) -> flavorstat_core::Result<PartitionedGroups>;
}

impl GroupSource for DatasetBuilder {
    fn check_sources(&self) -> flavorstat_core::Result<()> { self.sources().map(|_| ()) }

    fn groups(&self, catalog: &IngredientCatalog, ingredient: &str) -> flavorstat_core::Result<PartitionedGroups> { self.build(catalog, ingredient) }
}

pub trait ChartWriter {
    fn write_chart(&self, ingredient: &str, groups: &PartitionedGroups) -> flavorstat_core::Result<PathBuf>;
}

/// Renders `ComparisonChart` to the configured output file.
pub struct ChartFile {
    settings: PlotSettings,
}

impl ChartFile {
    pub fn new(settings: PlotSettings) -> Self { Self { settings } }
}

impl ChartWriter for ChartFile {
    fn write_chart(&self, ingredient: &str, groups: &PartitionedGroups) -> flavorstat_core::Result<PathBuf> {
        ComparisonChart::new(ingredient, groups)
            .with_size(self.settings.width, self.settings.height)
            .render(&self.settings.output_path())
    }
}

#[derive(Debug)]
pub enum SessionOutcome {
    Cancelled,
    Reported { report: SignificanceReport, plot: Option<PathBuf> },
}

pub struct Session<'a, GS, CW, R, W> where GS: GroupSource, CW: ChartWriter, R: BufRead, W: Write {
    catalog: &'a IngredientCatalog,
    source: GS,
    chart: CW,
    tester: SignificanceTester,
    input: R,
    output: W,
    show_progress: bool,
}

impl<'a, GS, CW, R, W> Session<'a, GS, CW, R, W> where GS: GroupSource, CW: ChartWriter, R: BufRead, W: Write {
    pub fn new(catalog: &'a IngredientCatalog, source: GS, chart: CW, input: R, output: W) -> Self {
        Self { catalog, source, chart, tester: SignificanceTester::new(), input, output, show_progress: false }
    }

    /// Show a spinner on stderr while the dataset loads.
    #[must_use]
    pub fn with_progress(mut self, show: bool) -> Self { self.show_progress = show; self }

    pub fn into_output(self) -> W { self.output }

    /// One full run: prompt, build, report, optionally plot. `seed` is used as
    /// the first answer to the ingredient prompt.
    pub fn run(&mut self, seed: Option<&str>) -> Result<SessionOutcome> {
        let Some(ingredient) = self.prompt_ingredient(seed)? else {
            writeln!(self.output, "Have a nice day!")?;
            return Ok(SessionOutcome::Cancelled);
        };

        self.source.check_sources()?;
        writeln!(self.output, "Extracting and cleaning data ...")?;
        writeln!(self.output)?;
        let groups = self.load_groups(&ingredient)?;

        let report = self.tester.evaluate(&ingredient, &groups);
        write!(self.output, "{report}")?;

        let plot = if self.confirm_plot()? {
            let path = self.chart.write_chart(&ingredient, &groups)?;
            writeln!(self.output, "Plot saved as '{}'", path.display())?;
            Some(path)
        } else {
            None
        };
        info!(%ingredient, plotted = plot.is_some(), "session finished");
        Ok(SessionOutcome::Reported { report, plot })
    }

    fn prompt_ingredient(&mut self, seed: Option<&str>) -> Result<Option<String>> {
        writeln!(self.output, "Enter the ingredient you would like to test, or press <enter> to quit.")?;
        writeln!(self.output, "(Examples: sugar, kale, tofu, lamb, bread crumb, jackfruit ... )")?;
        writeln!(self.output)?;

        let mut pending = seed.map(str::to_string);
        loop {
            let line = match pending.take() {
                Some(seeded) => Some(seeded),
                None => self.ask("Ingredient: ")?,
            };
            match IngredientPrompt::new(self.catalog).step(line.as_deref()) {
                PromptState::Validated(name) => return Ok(Some(name)),
                PromptState::Cancelled => return Ok(None),
                PromptState::Prompting => {
                    writeln!(self.output, "There are no recipes with that ingredient.  Please enter another or press <enter> to quit.")?;
                    writeln!(self.output)?;
                }
            }
        }
    }

    fn confirm_plot(&mut self) -> Result<bool> {
        let answer = self.ask("Plot the rating comparison for recipes with/without this ingredient? (y/n) ")?;
        Ok(answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y")))
    }

    fn load_groups(&self, ingredient: &str) -> Result<PartitionedGroups> {
        if !self.show_progress { return Ok(self.source.groups(self.catalog, ingredient)?); }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") { spinner.set_style(style); }
        spinner.set_message(format!("joining recipes and ratings for {ingredient}"));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let groups = self.source.groups(self.catalog, ingredient);
        spinner.finish_and_clear();
        Ok(groups?)
    }

    /// `None` on end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 { return Ok(None); }
        Ok(Some(line))
    }
}
