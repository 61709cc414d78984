//! Development automation tasks for yaml-folder.
//!
//! # Usage
//!
//! ```bash
//! cargo xtask coverage          # Run test coverage with cargo-tarpaulin
//! cargo xtask fixtures          # Regenerate tests/fixtures/*/expected.json
//! cargo xtask fixtures --check  # Fail if any expected.json is stale
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

const FIXTURES_DIR: &str = "tests/fixtures";

/// Variables that would change how fixtures resolve
const INVENTORY_ENV_VARS: [&str; 5] = [
    "YAML_FOLDER_INVENTORY",
    "YAML_FOLDER_EXCLUDE_LAST_GROUP_IN_NAME",
    "YAML_FOLDER_ENABLE_ALL_HOST_NAMES",
    "YAML_FOLDER_ENABLE_LEVEL_GROUPS",
    "YAML_FOLDER_TREE_GROUP_SEARCH",
];

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development automation tasks for yaml-folder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run test coverage with cargo-tarpaulin
    Coverage {
        /// Report format
        #[arg(long, short, value_enum, default_value_t = ReportFormat::Html)]
        format: ReportFormat,
        /// Minimum coverage threshold (0-100)
        #[arg(long)]
        fail_under: Option<u8>,
    },
    /// Regenerate the expected output of every fixture inventory
    Fixtures {
        /// Compare instead of writing; fail when a fixture is stale
        #[arg(long)]
        check: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Html,
    Json,
    Xml,
    Lcov,
}

impl ReportFormat {
    /// tarpaulin `--out` value and the report it writes
    fn tarpaulin(self) -> (&'static str, &'static str) {
        match self {
            ReportFormat::Html => ("Html", "target/tarpaulin/tarpaulin-report.html"),
            ReportFormat::Json => ("Json", "target/tarpaulin/tarpaulin-report.json"),
            ReportFormat::Xml => ("Xml", "target/tarpaulin/cobertura.xml"),
            ReportFormat::Lcov => ("Lcov", "target/tarpaulin/lcov.info"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let workspace_root = workspace_root()?;
    env::set_current_dir(&workspace_root).with_context(|| {
        format!(
            "Failed to change to workspace root: {}",
            workspace_root.display()
        )
    })?;

    match cli.command {
        Commands::Coverage { format, fail_under } => run_coverage(format, fail_under),
        Commands::Fixtures { check } => run_fixtures(check),
    }
}

/// Find the workspace root directory.
fn workspace_root() -> Result<PathBuf> {
    let output = Command::new("cargo")
        .args(["locate-project", "--workspace", "--message-format=plain"])
        .output()
        .context("Failed to run 'cargo locate-project'")?;

    if !output.status.success() {
        bail!("Failed to locate workspace root");
    }

    let path = String::from_utf8(output.stdout).context("Invalid UTF-8 in cargo output")?;
    PathBuf::from(path.trim())
        .parent()
        .map(Path::to_path_buf)
        .context("Failed to get parent directory of Cargo.toml")
}

/// Run test coverage with cargo-tarpaulin.
fn run_coverage(format: ReportFormat, fail_under: Option<u8>) -> Result<()> {
    if !is_command_available("cargo-tarpaulin") {
        println!("cargo-tarpaulin is not installed.");
        println!("Install with: cargo install cargo-tarpaulin");
        bail!("cargo-tarpaulin not found");
    }

    let (out, report) = format.tarpaulin();
    let mut args = vec!["tarpaulin".to_string(), "--out".to_string(), out.to_string()];
    if let Some(threshold) = fail_under {
        args.push("--fail-under".to_string());
        args.push(threshold.to_string());
    }

    println!("Running coverage...");
    let status = run_cargo(&args)?;
    if !status.success() {
        if fail_under.is_some() {
            bail!("Coverage is below the required threshold");
        }
        bail!("Coverage failed");
    }

    println!();
    println!("Coverage report: {}", report);
    Ok(())
}

/// Regenerate or check `expected.json` for every fixture case.
fn run_fixtures(check: bool) -> Result<()> {
    let status = run_cargo(&["build".to_string(), "--quiet".to_string()])?;
    if !status.success() {
        bail!("cargo build failed");
    }
    let binary = Path::new("target/debug").join(format!("yaml-folder{}", env::consts::EXE_SUFFIX));

    let mut cases: Vec<PathBuf> = fs::read_dir(FIXTURES_DIR)
        .with_context(|| format!("Failed to read {}", FIXTURES_DIR))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.join("inventory").is_dir())
        .collect();
    cases.sort();

    let mut stale = Vec::new();
    for case in &cases {
        let actual = resolve_fixture(&binary, case)?;
        let expected_path = case.join("expected.json");

        if check {
            let expected: serde_json::Value = fs::read_to_string(&expected_path)
                .ok()
                .and_then(|text| serde_json::from_str(&text).ok())
                .unwrap_or(serde_json::Value::Null);
            if expected != actual {
                stale.push(case.display().to_string());
            }
        } else {
            let text = serde_json::to_string_pretty(&actual)?;
            fs::write(&expected_path, text + "\n")
                .with_context(|| format!("Failed to write {}", expected_path.display()))?;
            println!("Wrote {}", expected_path.display());
        }
    }

    if !stale.is_empty() {
        bail!(
            "Stale fixtures (run 'cargo xtask fixtures'):\n  {}",
            stale.join("\n  ")
        );
    }
    println!("{} fixture(s) {}", cases.len(), if check { "up to date" } else { "regenerated" });
    Ok(())
}

/// Resolve one fixture's inventory with the built binary.
fn resolve_fixture(binary: &Path, case: &Path) -> Result<serde_json::Value> {
    let mut cmd = Command::new(binary);
    for var in INVENTORY_ENV_VARS {
        cmd.env_remove(var);
    }
    let output = cmd
        .arg("--inventory")
        .arg(case.join("inventory"))
        .args(["list", "--format", "canonical"])
        .output()
        .with_context(|| format!("Failed to run {}", binary.display()))?;

    if !output.status.success() {
        bail!(
            "{} failed to resolve:\n{}",
            case.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    serde_json::from_slice(&output.stdout)
        .with_context(|| format!("{} produced invalid JSON", case.display()))
}

/// Check if a command is available in PATH.
fn is_command_available(cmd: &str) -> bool {
    Command::new(cmd)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run a cargo command.
fn run_cargo(args: &[String]) -> Result<ExitStatus> {
    Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))
}
