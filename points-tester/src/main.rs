mod browser;
mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use browser::{
    BROWSER_SCENARIOS, BrowserConfig, BrowserKind, BrowserScenario, ModalPage, ScenarioCtx,
    find_browser_scenario, new_session,
};
use common::reports::{self, RunKind, ScenarioResult};
use common::util::{artifacts_dir, capture_artifacts, split_csv};
use logic::{LOGIC_SCENARIOS, LogicScenario, LogicTester, find_logic_scenario};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Scripted modal logic against the core crate (fast, no browser)
    Logic,
    /// Drive a host page through WebDriver
    Browser,
    /// Run both logic and browser tests
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Parser)]
#[command(name = "points-tester", version = "0.1.0")]
#[command(about = "Automated QA for the points modal - scripted logic and browser automation")]
struct Args {
    /// Test mode: logic (fast), browser (visual), or both
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per logic scenario
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// URL of a page hosting the modal markup and the wasm module
    #[arg(long, default_value = "http://localhost:8080/")]
    base_url: String,

    /// Game id passed to openPointsModal in browser runs
    #[arg(long, default_value = "demo")]
    game_id: String,

    /// Player id passed to openPointsModal in browser runs
    #[arg(long, default_value_t = 1)]
    player_id: i64,

    /// Artifacts directory for screenshots and logs
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Connect to a Selenium Grid/Appium hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let names = split_csv(&args.scenarios);
    let run_all = names.iter().any(|n| n == "all");

    let mut all_results = run_logic_scenarios(&args, &names, run_all);
    all_results.extend(run_browser_scenarios(&args, &names, run_all).await);

    write_reports(&args, &all_results, start_time)?;

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    writeln!(output_target.writer(), "  logic:")?;
    for scenario in LOGIC_SCENARIOS {
        writeln!(
            output_target.writer(),
            "    {:25} - {}",
            scenario.key,
            scenario.description
        )?;
    }
    writeln!(output_target.writer(), "  browser:")?;
    for scenario in BROWSER_SCENARIOS {
        writeln!(
            output_target.writer(),
            "    {:25} - {}",
            scenario.key(),
            scenario.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎯 Points Modal Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn selected_logic(names: &[String], run_all: bool) -> Vec<&'static LogicScenario> {
    if run_all {
        return LOGIC_SCENARIOS.iter().collect();
    }
    names
        .iter()
        .filter_map(|name| find_logic_scenario(name))
        .collect()
}

fn selected_browser(names: &[String], run_all: bool) -> Vec<&'static dyn BrowserScenario> {
    if run_all {
        return BROWSER_SCENARIOS.to_vec();
    }
    names
        .iter()
        .filter_map(|name| find_browser_scenario(name))
        .collect()
}

fn warn_unknown(names: &[String]) {
    for name in names {
        if name != "all"
            && find_logic_scenario(name).is_none()
            && find_browser_scenario(name).is_none()
        {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
        }
    }
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

fn run_logic_scenarios(args: &Args, names: &[String], run_all: bool) -> Vec<ScenarioResult> {
    if !matches!(args.mode, TestMode::Logic | TestMode::Both) {
        return Vec::new();
    }

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());
    warn_unknown(names);

    let tester = LogicTester::new(args.verbose);
    selected_logic(names, run_all)
        .into_iter()
        .map(|scenario| tester.run_scenario(scenario, args.iterations))
        .collect()
}

async fn run_browser_scenarios(
    args: &Args,
    names: &[String],
    run_all: bool,
) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    if !matches!(args.mode, TestMode::Browser | TestMode::Both) {
        return results;
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());
    if matches!(args.mode, TestMode::Browser) {
        warn_unknown(names);
    }

    let scenarios = selected_browser(names, run_all);
    for browser_name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let driver = match new_session(kind, &build_browser_config(args)).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {}: {e}", kind.label());
                continue;
            }
        };

        for scenario in &scenarios {
            results.push(run_one_browser_scenario(args, kind, &driver, *scenario).await);
        }
        if let Err(e) = driver.quit().await {
            log::warn!("closing {} session failed: {e}", kind.label());
        }
    }

    results
}

async fn run_one_browser_scenario(
    args: &Args,
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
    scenario: &dyn BrowserScenario,
) -> ScenarioResult {
    let ctx = ScenarioCtx {
        base_url: args.base_url.clone(),
        game_id: args.game_id.clone(),
        player_id: args.player_id,
        page: ModalPage::new(driver),
        verbose: args.verbose,
    };
    let label = kind.label();

    let start = Instant::now();
    let outcome = scenario.run_browser(driver, &ctx).await;
    let elapsed = start.elapsed();
    match &outcome {
        Ok(()) => println!("✅ [{}] {} - {elapsed:?}", label.green(), scenario.key()),
        Err(e) => {
            eprintln!(
                "❌ [{}] {} - {elapsed:?}: {e:#}",
                label.red(),
                scenario.key()
            );
            let dir = artifacts_dir(&args.artifacts_dir, label, scenario.key());
            if let Err(capture) = capture_artifacts(driver, &dir, e).await {
                log::warn!("could not save artifacts to {dir}: {capture:#}");
            }
        }
    }

    ScenarioResult::from_runs(
        scenario.key(),
        RunKind::Browser,
        Some(label.to_string()),
        &[(elapsed, outcome)],
    )
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Points Modal Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    if args.report != "json" {
        let duration = start_time.elapsed();
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            mode: TestMode::Logic,
            scenarios: "all".to_string(),
            list_scenarios: false,
            iterations: 1,
            report: "json".to_string(),
            verbose: false,
            output: None,
            browsers: "chrome".to_string(),
            base_url: "http://localhost:8080/".to_string(),
            game_id: "demo".to_string(),
            player_id: 1,
            artifacts_dir: "target/test-artifacts".to_string(),
            hub: None,
            headless: HeadlessMode::Headless,
        }
    }

    #[test]
    fn args_parse_from_command_line() {
        let args = Args::try_parse_from([
            "points-tester",
            "--mode",
            "both",
            "--scenarios",
            "forbidden,open-close",
            "--headless",
            "windowed",
        ])
        .expect("valid args");
        assert!(matches!(args.mode, TestMode::Both));
        assert!(!args.headless.is_headless());
        assert_eq!(split_csv(&args.scenarios).len(), 2);
    }

    #[test]
    fn selection_splits_logic_and_browser_keys() {
        let names = split_csv("forbidden,open-close,bogus");
        let logic: Vec<_> = selected_logic(&names, false)
            .iter()
            .map(|s| s.key)
            .collect();
        let browser: Vec<_> = selected_browser(&names, false)
            .iter()
            .map(|s| s.key())
            .collect();
        assert_eq!(logic, vec!["forbidden"]);
        assert_eq!(browser, vec!["open-close"]);
        assert_eq!(selected_logic(&names, true).len(), LOGIC_SCENARIOS.len());
    }

    #[test]
    fn logic_run_collects_a_result_per_scenario() {
        let args = base_args();
        let names = split_csv(&args.scenarios);
        let results = run_logic_scenarios(&args, &names, true);
        assert_eq!(results.len(), LOGIC_SCENARIOS.len());
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn browser_mode_skips_logic() {
        let mut args = base_args();
        args.mode = TestMode::Browser;
        assert!(run_logic_scenarios(&args, &[], true).is_empty());
    }

    #[test]
    fn json_report_writes_to_file() {
        let path = std::env::temp_dir().join(format!(
            "points-report-{}.json",
            std::process::id()
        ));
        let mut args = base_args();
        args.output = Some(path.clone());
        let results = run_logic_scenarios(&args, &[], true);
        write_reports(&args, &results, Instant::now()).expect("report");
        let text = std::fs::read_to_string(&path).expect("read report");
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(
            parsed.as_array().map(Vec::len),
            Some(LOGIC_SCENARIOS.len())
        );
    }
}
