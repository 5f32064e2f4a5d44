use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;

/// Which harness produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    Logic,
    Browser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub kind: RunKind,
    /// Browser label for browser runs.
    pub target: Option<String>,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    pub average_ms: f64,
}

impl ScenarioResult {
    pub fn from_runs(
        scenario_name: &str,
        kind: RunKind,
        target: Option<String>,
        runs: &[(Duration, Result<()>)],
    ) -> Self {
        let failures: Vec<String> = runs
            .iter()
            .filter_map(|(_, res)| res.as_ref().err().map(|e| format!("{e:#}")))
            .collect();
        let total: Duration = runs.iter().map(|(d, _)| *d).sum();
        #[allow(clippy::cast_precision_loss)]
        let average_ms = if runs.is_empty() {
            0.0
        } else {
            total.as_secs_f64() * 1_000.0 / runs.len() as f64
        };
        Self {
            scenario_name: scenario_name.to_string(),
            kind,
            target,
            passed: failures.is_empty() && !runs.is_empty(),
            iterations_run: runs.len(),
            successful_iterations: runs.len() - failures.len(),
            failures,
            average_ms,
        }
    }

    fn label(&self) -> String {
        match &self.target {
            Some(target) => format!("{} [{target}]", self.scenario_name),
            None => self.scenario_name.clone(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (passed as f64 / total as f64) * 100.0
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Points Modal Test Results".bright_cyan().bold())?;
    writeln!(out, "{}", "============================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(passed, total))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{status} {}", result.label().bold())?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:.2} ms", result.average_ms)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Points Modal Test Results\n")?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(passed, total))?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {status} {}\n", result.label())?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Average time**: {:.2} ms", result.average_ms)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn sample() -> Vec<ScenarioResult> {
        let runs = vec![
            (Duration::from_millis(2), Ok(())),
            (Duration::from_millis(4), Err(anyhow!("modal still visible"))),
        ];
        vec![
            ScenarioResult::from_runs("forbidden", RunKind::Logic, None, &runs),
            ScenarioResult::from_runs(
                "open-close",
                RunKind::Browser,
                Some("chrome".into()),
                &[(Duration::from_millis(8), Ok(()))],
            ),
        ]
    }

    #[test]
    fn from_runs_counts_failures() {
        let results = sample();
        assert!(!results[0].passed);
        assert_eq!(results[0].successful_iterations, 1);
        assert_eq!(results[0].failures, vec!["modal still visible".to_string()]);
        assert!((results[0].average_ms - 3.0).abs() < 0.01);
        assert!(results[1].passed);
    }

    #[test]
    fn json_report_round_trips_names() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &sample()).unwrap();
        let parsed: Vec<ScenarioResult> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[1].target.as_deref(), Some("chrome"));
        assert_eq!(parsed[0].kind, RunKind::Logic);
    }

    #[test]
    fn markdown_report_lists_failures() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("### ❌ forbidden"));
        assert!(text.contains("  - modal still visible"));
        assert!(text.contains("### ✅ open-close [chrome]"));
    }
}
