//! Terminal and Markdown rendering of breadth reports.

use hobart_breadth::BreadthReport;
use std::fmt;

/// Width of the rendered table rules.
const RULE_WIDTH: usize = 80;

/// A renderable view over a breadth report.
///
/// Undefined fractions and signals render as `--`, keeping "no defined
/// signals" visually distinct from "fully below".
#[derive(Debug, Clone, Copy)]
pub struct BreadthDashboard<'a> {
    report: &'a BreadthReport,
}

fn pct(fraction: Option<f64>) -> String {
    fraction.map_or_else(|| "--".to_string(), |f| format!("{:.2}%", f * 100.0))
}

fn price(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{v:.2}"))
}

fn flag(above: Option<bool>) -> &'static str {
    match above {
        Some(true) => "yes",
        Some(false) => "no",
        None => "--",
    }
}

impl<'a> BreadthDashboard<'a> {
    /// Create a dashboard view over a report.
    pub const fn new(report: &'a BreadthReport) -> Self {
        Self { report }
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let report = self.report;
        let mut output = String::new();

        output.push_str("\nMarket Breadth");
        if let Some(as_of) = report.as_of {
            output.push_str(&format!(" (as of {as_of})"));
        }
        output.push('\n');
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');

        // Overall breadth
        output.push_str("\nOverall Breadth:\n");
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        for (idx, &window) in report.windows.iter().enumerate() {
            output.push_str(&format!(
                "  Above {window:>3}-day SMA:   {:>8}\n",
                pct(report.overall[idx])
            ));
        }
        output.push_str(&format!("  Symbols analyzed:    {:>8}\n", report.symbol_count()));
        if report.diagnostics.excluded_count() > 0 {
            output.push_str(&format!(
                "  Excluded (history):  {:>8}\n",
                report.diagnostics.excluded_count()
            ));
        }

        // Sector table
        output.push_str("\nSector Breadth:\n");
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        output.push_str(&format!("{:<28} {:>8}", "Sector", "Symbols"));
        for &window in &report.windows {
            output.push_str(&format!(" {:>11}", format!("Above {window}")));
        }
        output.push('\n');
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        for row in &report.sectors {
            output.push_str(&format!("{:<28} {:>8}", row.sector, row.symbols));
            for fraction in &row.fractions {
                output.push_str(&format!(" {:>11}", pct(*fraction)));
            }
            output.push('\n');
        }

        // Detail table
        output.push_str("\nDetail:\n");
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        output.push_str(&format!("{:<8} {:<28} {:>10}", "Symbol", "Sector", "Price"));
        for &window in &report.windows {
            output.push_str(&format!(" {:>10}", format!("MA{window}")));
        }
        for &window in &report.windows {
            output.push_str(&format!(" {:>6}", format!(">{window}")));
        }
        output.push('\n');
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        for row in &report.detail {
            output.push_str(&format!(
                "{:<8} {:<28} {:>10.2}",
                row.symbol, row.sector, row.latest_price
            ));
            for signal in &row.signals {
                output.push_str(&format!(" {:>10}", price(signal.ma)));
            }
            for signal in &row.signals {
                output.push_str(&format!(" {:>6}", flag(signal.above)));
            }
            output.push('\n');
        }

        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let report = self.report;
        let mut output = String::new();

        output.push_str("# Market Breadth\n\n");
        if let Some(as_of) = report.as_of {
            output.push_str(&format!("**As of:** {as_of}\n\n"));
        }

        output.push_str("## Overall Breadth\n\n");
        for (idx, &window) in report.windows.iter().enumerate() {
            output.push_str(&format!(
                "- **Above {window}-day SMA:** {}\n",
                pct(report.overall[idx])
            ));
        }
        output.push_str(&format!(
            "- **Symbols analyzed:** {} ({} excluded for insufficient history)\n\n",
            report.symbol_count(),
            report.diagnostics.excluded_count()
        ));

        output.push_str("## Sector Breadth\n\n");
        output.push_str("| Sector | Symbols |");
        for &window in &report.windows {
            output.push_str(&format!(" Above {window} |"));
        }
        output.push('\n');
        output.push_str("|--------|---------|");
        for _ in &report.windows {
            output.push_str("---------|");
        }
        output.push('\n');
        for row in &report.sectors {
            output.push_str(&format!("| {} | {} |", row.sector, row.symbols));
            for fraction in &row.fractions {
                output.push_str(&format!(" {} |", pct(*fraction)));
            }
            output.push('\n');
        }
        output.push('\n');

        output.push_str("## Detail\n\n");
        output.push_str("| Symbol | Sector | Price |");
        for &window in &report.windows {
            output.push_str(&format!(" MA{window} |"));
        }
        for &window in &report.windows {
            output.push_str(&format!(" Above {window} |"));
        }
        output.push('\n');
        output.push_str("|--------|--------|-------|");
        for _ in 0..report.windows.len() * 2 {
            output.push_str("------|");
        }
        output.push('\n');
        for row in &report.detail {
            output.push_str(&format!(
                "| {} | {} | {:.2} |",
                row.symbol, row.sector, row.latest_price
            ));
            for signal in &row.signals {
                output.push_str(&format!(" {} |", price(signal.ma)));
            }
            for signal in &row.signals {
                output.push_str(&format!(" {} |", flag(signal.above)));
            }
            output.push('\n');
        }

        output
    }
}

impl fmt::Display for BreadthDashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(f, "Market Breadth ({} symbols)", report.symbol_count())?;
        for (idx, &window) in report.windows.iter().enumerate() {
            writeln!(f, "  Above {window}-day SMA: {}", pct(report.overall[idx]))?;
        }
        Ok(())
    }
}
