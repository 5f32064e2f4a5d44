pub mod harness;
pub mod scenarios;

use colored::Colorize;
use std::time::Instant;

use crate::common::reports::{RunKind, ScenarioResult};
pub use scenarios::{LOGIC_SCENARIOS, LogicScenario, find_logic_scenario};

/// Runs logic scenarios in-process against the core crate.
pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(&self, scenario: &LogicScenario, iterations: usize) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Testing scenario: {}", scenario.key.bright_white());
        }
        let runs: Vec<_> = (0..iterations.max(1))
            .map(|_| {
                let start = Instant::now();
                let res = (scenario.run)();
                (start.elapsed(), res)
            })
            .collect();
        let result = ScenarioResult::from_runs(scenario.key, RunKind::Logic, None, &runs);
        if self.verbose {
            let status = if result.passed {
                "passed".green()
            } else {
                "failed".red()
            };
            println!("   {} {status}", scenario.key);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterations_are_clamped_to_one() {
        let scenario = find_logic_scenario("forbidden").expect("known scenario");
        let result = LogicTester::new(false).run_scenario(scenario, 0);
        assert_eq!(result.iterations_run, 1);
        assert!(result.passed);
    }
}
