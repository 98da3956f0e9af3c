//! Optional diagnostics rendered after an experiment.
//!
//! A [`DiagnosticsReporter`] receives both ratio sequences and the KS result
//! once the comparison is finished. It cannot change the result, and a
//! failing reporter only produces a warning in the log.
//!
//! [`TerminalReporter`] prints, for each regime, a boxplot summary, a
//! histogram and a normal probability plot summary, followed by the p-value.
//!
//! ```rust
//! use ratio_core::diagnostics::{DiagnosticsReporter, TerminalReporter};
//! use ratio_core::comparison::{ks_2samp, Alternative, Method};
//! use ratio_core::sampler::RatioSamples;
//!
//! let samples = RatioSamples {
//!     uncorrelated: vec![-3.0, 0.5, 1.0, 4.0],
//!     correlated: vec![0.9, 1.0, 1.1, 1.2],
//! };
//! let test = ks_2samp(&samples.uncorrelated, &samples.correlated,
//!     Alternative::TwoSided, Method::Asymptotic);
//!
//! let mut reporter = TerminalReporter::new(Vec::new());
//! reporter.report(&samples, &test).unwrap();
//! let text = String::from_utf8(reporter.into_inner()).unwrap();
//! assert!(text.contains("KS Test p-value:"));
//! ```

mod summary;

pub use summary::{BoxplotSummary, Histogram, ProbabilityPlot};

use std::io::{self, Write};

use crate::comparison::KsTest;
use crate::sampler::RatioSamples;

/// Display window of the boxplot, matching a y-axis limit of [-10, 10].
pub const BOXPLOT_WINDOW: (f64, f64) = (-10.0, 10.0);

/// Number of histogram bins.
pub const HISTOGRAM_BINS: usize = 50;

const BAR_WIDTH: usize = 40;

/// Consumer of experiment results for display purposes.
pub trait DiagnosticsReporter {
    /// Renders diagnostics for one finished experiment.
    ///
    /// # Errors
    ///
    /// Any I/O error from the underlying sink.
    fn report(&mut self, samples: &RatioSamples, test: &KsTest) -> io::Result<()>;
}

/// Reporter that renders nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl DiagnosticsReporter for NullReporter {
    fn report(&mut self, _samples: &RatioSamples, _test: &KsTest) -> io::Result<()> {
        Ok(())
    }
}

/// Plain-text reporter writing to any [`Write`] sink.
#[derive(Debug)]
pub struct TerminalReporter<W: Write> {
    out: W,
    window: (f64, f64),
    bins: usize,
}

impl TerminalReporter<io::Stdout> {
    /// Reporter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalReporter<W> {
    /// Reporter with the default window and bin count.
    pub fn new(out: W) -> Self {
        Self {
            out,
            window: BOXPLOT_WINDOW,
            bins: HISTOGRAM_BINS,
        }
    }

    /// Overrides the number of histogram bins.
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_regime(&mut self, label: &str, values: &[f64]) -> io::Result<()> {
        let non_finite = values.iter().filter(|v| !v.is_finite()).count();
        writeln!(
            self.out,
            "── {} Ratios ({} values, {} non-finite)",
            label,
            values.len(),
            non_finite
        )?;

        match BoxplotSummary::from_values(values) {
            Some(b) => {
                let (lo, hi) = self.window;
                let hidden = values
                    .iter()
                    .filter(|v| v.is_finite() && (**v < lo || **v > hi))
                    .count();
                writeln!(
                    self.out,
                    "  Boxplot: whiskers [{:.4}, {:.4}]  Q1 {:.4}  median {:.4}  Q3 {:.4}",
                    b.lower_whisker, b.upper_whisker, b.q1, b.median, b.q3
                )?;
                writeln!(
                    self.out,
                    "           range [{:.4}, {:.4}]  outliers {}  outside [{}, {}]: {}",
                    b.min, b.max, b.outliers, lo, hi, hidden
                )?;
            }
            None => writeln!(self.out, "  Boxplot: no finite values")?,
        }

        if let Some(hist) = Histogram::new(values, self.bins) {
            let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1);
            writeln!(self.out, "  Histogram ({} bins):", hist.bins())?;
            for (k, &count) in hist.counts.iter().enumerate() {
                let bar = "#".repeat(count * BAR_WIDTH / peak);
                writeln!(
                    self.out,
                    "    [{:>10.4}, {:>10.4}) {:>6} {}",
                    hist.edges[k],
                    hist.edges[k + 1],
                    count,
                    bar
                )?;
            }
        }

        match ProbabilityPlot::normal(values) {
            Some(plot) => writeln!(
                self.out,
                "  QQ plot vs normal: slope {:.4}  intercept {:.4}  r {:.4}",
                plot.slope, plot.intercept, plot.r
            )?,
            None => writeln!(self.out, "  QQ plot vs normal: not enough finite values")?,
        }

        Ok(())
    }
}

impl<W: Write> DiagnosticsReporter for TerminalReporter<W> {
    fn report(&mut self, samples: &RatioSamples, test: &KsTest) -> io::Result<()> {
        writeln!(self.out, "Ratio of Means")?;
        self.write_regime("Correlated", &samples.correlated)?;
        self.write_regime("Uncorrelated", &samples.uncorrelated)?;
        writeln!(self.out)?;
        writeln!(self.out, "KS statistic: {}", test.statistic)?;
        writeln!(self.out, "KS Test p-value: {}", test.p_value)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::{ks_2samp, Alternative, Method};

    fn fixture() -> (RatioSamples, KsTest) {
        let samples = RatioSamples {
            uncorrelated: vec![-25.0, -2.0, -0.5, 0.3, 1.0, 1.7, 3.0, f64::INFINITY],
            correlated: vec![0.8, 0.9, 0.95, 1.0, 1.05, 1.1, 1.2, 1.3],
        };
        let test = ks_2samp(
            &samples.uncorrelated,
            &samples.correlated,
            Alternative::TwoSided,
            Method::Asymptotic,
        );
        (samples, test)
    }

    #[test]
    fn test_terminal_report_sections() {
        let (samples, test) = fixture();
        let mut reporter = TerminalReporter::new(Vec::new()).with_bins(5);
        reporter.report(&samples, &test).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(text.contains("Correlated Ratios (8 values, 0 non-finite)"));
        assert!(text.contains("Uncorrelated Ratios (8 values, 1 non-finite)"));
        assert!(text.contains("Histogram (5 bins)"));
        assert!(text.contains("QQ plot vs normal"));
        assert!(text.contains("outside [-10, 10]: 1"));
        assert!(text.contains(&format!("KS Test p-value: {}", test.p_value)));
        // Correlated is rendered before uncorrelated.
        let cor = text.find("── Correlated").unwrap();
        let unc = text.find("── Uncorrelated").unwrap();
        assert!(cor < unc);
    }

    #[test]
    fn test_terminal_report_all_non_finite() {
        let samples = RatioSamples {
            uncorrelated: vec![f64::NAN],
            correlated: vec![f64::INFINITY],
        };
        let test = ks_2samp(
            &samples.uncorrelated,
            &samples.correlated,
            Alternative::TwoSided,
            Method::Asymptotic,
        );
        let mut reporter = TerminalReporter::new(Vec::new());
        reporter.report(&samples, &test).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(text.contains("no finite values"));
        assert!(text.contains("not enough finite values"));
    }

    #[test]
    fn test_null_reporter() {
        let (samples, test) = fixture();
        assert!(NullReporter.report(&samples, &test).is_ok());
    }
}
