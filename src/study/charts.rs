//! The four distribution charts

use crate::analysis::{percentiles, TTestResult};
use crate::plot::{colors, HistogramChart, Series};
use crate::report::{format_fixed, format_sci};
use crate::utils::{AnalysisConfig, PlotConfig};
use tracing::warn;

/// Which derived column a chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Returns,
    Volatility,
}

impl Measure {
    fn axis_label(self) -> &'static str {
        match self {
            Measure::Returns => "Daily Return",
            Measure::Volatility => "Volatility",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Measure::Returns => "Daily Returns",
            Measure::Volatility => "Volatility",
        }
    }
}

/// Histogram range clipped to percentiles of both groups pooled together
pub fn clip_range(news: &[f64], no_news: &[f64], lower: f64, upper: f64) -> Option<(f64, f64)> {
    let pooled: Vec<f64> = news.iter().chain(no_news).copied().collect();
    let bounds = percentiles(&pooled, &[lower, upper])?;
    Some((bounds[0], bounds[1]))
}

/// Range to draw with, falling back to the unit interval when nothing is present
pub fn range_or_default(range: Option<(f64, f64)>, measure: Measure) -> (f64, f64) {
    range.unwrap_or_else(|| {
        warn!("No {} values to plot, using an empty range", measure.axis_label());
        (0.0, 1.0)
    })
}

/// News and non-news distributions overlaid, annotated with the test result
pub fn comparison_chart(
    measure: Measure,
    news: &[f64],
    no_news: &[f64],
    test: &TTestResult,
    range: (f64, f64),
    analysis: &AnalysisConfig,
    plot: &PlotConfig,
) -> HistogramChart {
    HistogramChart::new(range, analysis.bins)
        .size(plot.width, plot.height)
        .title(format!(
            "Distribution of {} on News vs. Non-News Days",
            measure.noun()
        ))
        .title(format!(
            "T-stat: {}, P-value: {}",
            format_fixed(test.statistic, 2),
            format_sci(test.p_value, 2)
        ))
        .x_label(measure.axis_label())
        .y_label("Frequency")
        .series(Series::new(no_news.to_vec(), colors::RED, plot.overlay_alpha).label("No News Days"))
        .series(Series::new(news.to_vec(), colors::BLUE, plot.overlay_alpha).label("News Days"))
}

/// News-day distribution on its own
pub fn news_chart(
    measure: Measure,
    news: &[f64],
    range: (f64, f64),
    analysis: &AnalysisConfig,
    plot: &PlotConfig,
) -> HistogramChart {
    HistogramChart::new(range, analysis.bins)
        .size(plot.width, plot.height)
        .title(format!("Distribution of {} on News Days", measure.noun()))
        .x_label(measure.axis_label())
        .y_label("Frequency")
        .series(Series::new(news.to_vec(), colors::BLUE, plot.single_alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::welch_t_test;
    use approx::assert_relative_eq;

    #[test]
    fn test_clip_range_pools_groups() {
        let news: Vec<f64> = (1..=50).map(f64::from).collect();
        let no_news: Vec<f64> = (51..=100).map(f64::from).collect();
        let (lo, hi) = clip_range(&news, &no_news, 1.0, 99.0).unwrap();
        assert_relative_eq!(lo, 1.99, epsilon = 1e-12);
        assert_relative_eq!(hi, 99.01, epsilon = 1e-12);
    }

    #[test]
    fn test_clip_range_empty() {
        assert!(clip_range(&[], &[], 1.0, 99.0).is_none());
        assert_eq!(range_or_default(None, Measure::Returns), (0.0, 1.0));
    }

    #[test]
    fn test_comparison_chart_series_order() {
        let news = [0.01, 0.02, -0.01];
        let no_news = [0.0, 0.005, -0.002, 0.001];
        let test = welch_t_test(&news, &no_news);
        let chart = comparison_chart(
            Measure::Returns,
            &news,
            &no_news,
            &test,
            (-0.02, 0.02),
            &AnalysisConfig::default(),
            &PlotConfig::default(),
        );

        let hists = chart.histograms();
        assert_eq!(hists.len(), 2);
        assert_eq!(hists[0].total(), 4);
        assert_eq!(hists[1].total(), 3);
        assert_eq!(hists[0].bins(), 50);
    }

    #[test]
    fn test_comparison_chart_text() {
        let news = [1.0, 2.0, 3.0, 4.0, 5.0];
        let no_news = [2.0, 4.0, 6.0, 8.0, 10.0];
        let test = welch_t_test(&news, &no_news);
        let chart = comparison_chart(
            Measure::Returns,
            &news,
            &no_news,
            &test,
            (1.0, 10.0),
            &AnalysisConfig::default(),
            &PlotConfig::default(),
        );

        assert_eq!(
            chart.titles(),
            &[
                "Distribution of Daily Returns on News vs. Non-News Days".to_string(),
                "T-stat: -1.90, P-value: 1.08e-01".to_string(),
            ]
        );
        assert_eq!(chart.axis_labels(), ("Daily Return", "Frequency"));
        assert_eq!(chart.legend_labels(), vec!["No News Days", "News Days"]);

        let series = chart.series_list();
        assert_eq!(series[0].color, colors::RED);
        assert_eq!(series[1].color, colors::BLUE);
        assert_relative_eq!(series[0].alpha, 0.5);
    }

    #[test]
    fn test_volatility_comparison_title() {
        let test = welch_t_test(&[0.02, 0.03, 0.025], &[0.01, 0.012, 0.011]);
        let chart = comparison_chart(
            Measure::Volatility,
            &[0.02, 0.03, 0.025],
            &[0.01, 0.012, 0.011],
            &test,
            (0.0, 0.03),
            &AnalysisConfig::default(),
            &PlotConfig::default(),
        );
        assert_eq!(
            chart.titles()[0],
            "Distribution of Volatility on News vs. Non-News Days"
        );
        assert!(chart.titles()[1].starts_with("T-stat: "));
        assert_eq!(chart.axis_labels(), ("Volatility", "Frequency"));
    }

    #[test]
    fn test_news_charts_have_single_title_and_no_legend() {
        let analysis = AnalysisConfig::default();
        let plot = PlotConfig::default();

        let returns = news_chart(Measure::Returns, &[0.01, -0.01], (-0.02, 0.02), &analysis, &plot);
        assert_eq!(
            returns.titles(),
            &["Distribution of Daily Returns on News Days".to_string()]
        );
        assert_eq!(returns.axis_labels(), ("Daily Return", "Frequency"));
        assert!(returns.legend_labels().is_empty());
        assert_relative_eq!(returns.series_list()[0].alpha, 0.7);
        assert_eq!(returns.series_list()[0].color, colors::BLUE);

        let volatility = news_chart(Measure::Volatility, &[0.01], (0.0, 0.02), &analysis, &plot);
        assert_eq!(
            volatility.titles(),
            &["Distribution of Volatility on News Days".to_string()]
        );
        assert_eq!(volatility.axis_labels(), ("Volatility", "Frequency"));
        assert!(volatility.legend_labels().is_empty());
    }

    #[test]
    fn test_news_chart_renders_at_configured_size() {
        let plot = PlotConfig {
            width: 300,
            height: 200,
            ..PlotConfig::default()
        };
        let chart = news_chart(
            Measure::Volatility,
            &[0.01, 0.02],
            (0.0, 0.03),
            &AnalysisConfig::default(),
            &plot,
        );
        assert_eq!(chart.render().dimensions(), (300, 200));
    }
}
