//! Event study pipeline
//!
//! Runs the whole comparison in order:
//! 1. load the news and non-news datasets
//! 2. derive per-ticker returns and rolling volatility
//! 3. Welch t-tests on both measures
//! 4. write the summary and processed tables
//! 5. render the four histograms

mod charts;

pub use charts::{clip_range, comparison_chart, news_chart, range_or_default, Measure};

use crate::analysis::{derive_returns, derive_volatility, present, welch_t_test};
use crate::data::{PriceTable, ProcessedTable};
use crate::error::Result;
use crate::report::{SummaryStats, TestReport};
use crate::utils::Config;
use std::path::PathBuf;
use tracing::{debug, info};

/// Attach `return` and `volatility` columns to a table
pub fn process(table: PriceTable, window: usize) -> Result<ProcessedTable> {
    let returns = derive_returns(&table);
    let volatility = derive_volatility(&table, &returns, window);
    ProcessedTable::new(table, returns, volatility)
}

/// Compare news against non-news days on both measures
pub fn compare(news: &ProcessedTable, no_news: &ProcessedTable) -> TestReport {
    TestReport {
        returns: welch_t_test(&present(news.returns()), &present(no_news.returns())),
        volatility: welch_t_test(&present(news.volatility()), &present(no_news.volatility())),
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct StudyOutcome {
    pub news: ProcessedTable,
    pub no_news: ProcessedTable,
    pub summary: SummaryStats,
    pub tests: TestReport,
    /// Files written, in order
    pub written: Vec<PathBuf>,
}

/// Configured event study
pub struct EventStudy {
    config: Config,
}

impl EventStudy {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run every step and write all outputs
    pub fn run(&self) -> Result<StudyOutcome> {
        let config = &self.config;
        config.validate()?;

        let news_path = config.data.news_path();
        let no_news_path = config.data.no_news_path();
        let news = PriceTable::from_csv(&news_path)?;
        let no_news = PriceTable::from_csv(&no_news_path)?;
        info!(
            "Loaded {} news rows from {} and {} non-news rows from {}",
            news.len(),
            news_path.display(),
            no_news.len(),
            no_news_path.display()
        );

        let news = process(news, config.analysis.window)?;
        let no_news = process(no_news, config.analysis.window)?;
        debug!("Derived returns and {}-row volatility", config.analysis.window);

        let tests = compare(&news, &no_news);
        info!("Returns: {}", tests.returns);
        info!("Volatility: {}", tests.volatility);

        let summary = SummaryStats::from_groups(&news, &no_news);

        let output = &config.output;
        std::fs::create_dir_all(&output.dir)?;
        let mut written = Vec::new();

        let path = output.path(&output.summary_file);
        summary.to_csv(&path)?;
        written.push(path);

        let path = output.path(&output.processed_news_file);
        news.to_csv(&path)?;
        written.push(path);

        let path = output.path(&output.processed_no_news_file);
        no_news.to_csv(&path)?;
        written.push(path);

        written.extend(self.render_charts(&news, &no_news, &tests)?);

        info!("Wrote {} files to {}", written.len(), output.dir.display());
        Ok(StudyOutcome {
            news,
            no_news,
            summary,
            tests,
            written,
        })
    }

    fn render_charts(
        &self,
        news: &ProcessedTable,
        no_news: &ProcessedTable,
        tests: &TestReport,
    ) -> Result<Vec<PathBuf>> {
        let config = &self.config;
        let (analysis, plot, output) = (&config.analysis, &config.plot, &config.output);
        let (lower, upper) = (analysis.lower_percentile, analysis.upper_percentile);

        let news_returns = present(news.returns());
        let no_news_returns = present(no_news.returns());
        let news_volatility = present(news.volatility());
        let no_news_volatility = present(no_news.volatility());

        let return_range = range_or_default(
            clip_range(&news_returns, &no_news_returns, lower, upper),
            Measure::Returns,
        );
        let volatility_range = range_or_default(
            clip_range(&news_volatility, &no_news_volatility, lower, upper),
            Measure::Volatility,
        );
        debug!(
            "Histogram ranges: returns {:?}, volatility {:?}",
            return_range, volatility_range
        );

        let charts = [
            (
                &output.returns_plot,
                comparison_chart(
                    Measure::Returns,
                    &news_returns,
                    &no_news_returns,
                    &tests.returns,
                    return_range,
                    analysis,
                    plot,
                ),
            ),
            (
                &output.volatility_plot,
                comparison_chart(
                    Measure::Volatility,
                    &news_volatility,
                    &no_news_volatility,
                    &tests.volatility,
                    volatility_range,
                    analysis,
                    plot,
                ),
            ),
            (
                &output.news_returns_plot,
                news_chart(Measure::Returns, &news_returns, return_range, analysis, plot),
            ),
            (
                &output.news_volatility_plot,
                news_chart(
                    Measure::Volatility,
                    &news_volatility,
                    volatility_range,
                    analysis,
                    plot,
                ),
            ),
        ];

        let mut written = Vec::with_capacity(charts.len());
        for (file, chart) in charts {
            let path = output.path(file);
            chart.save(&path)?;
            written.push(path);
        }
        Ok(written)
    }
}
