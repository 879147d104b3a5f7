//! polish - run selected sniffs over a git versioned source tree
//!
//! `polish` (or `polish dev`) runs the fast critical/major sniffs,
//! `polish ci` runs every exposed sniff. Exit status is 1 when any sniff
//! failed.

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use polish_cli::output::Status;
use polish_core::config::Config;
use polish_core::error::exit_codes;
use polish_core::Error;
use polish_sniff::{Environment, Registry, RegistryTasks, TaskDiscovery};
use polish_telemetry::TelemetryConfig;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "polish")]
#[command(about = "Polish git versioned source code")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Echo every command and enable debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (default: .polish.toml, polish.toml or .config/polish.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory the sniffs run in (default: the configuration file's directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Environment to polish for: dev or ci
    env: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sniffs selected for an environment
    Polish {
        /// dev: fast critical and major sniffs; ci: every sniff
        env: Option<String>,
    },

    /// Run sniffs by name regardless of severity and timing
    Run {
        #[arg(required = true)]
        tasks: Vec<String>,
    },

    /// List the runnable sniffs
    List,
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            e.downcast_ref::<Error>()
                .map_or(exit_codes::FAILURE, Error::exit_code)
        }
    };

    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;

    polish_telemetry::init_with_config(TelemetryConfig {
        log_level: config.schema.general.log_level.clone(),
        verbose: cli.verbose,
        ..TelemetryConfig::default()
    })?;
    polish_core::scope::set_always_echo(cli.verbose);

    let root = cli.root.clone().unwrap_or_else(|| config.checks_root());
    let registry = load_registry(&config, &root)?;
    let exposed = config.schema.exposed_tasks();
    let tasks = RegistryTasks::new(&registry, &exposed);

    match cli.command {
        Some(Commands::Polish { env }) => run_polish(&registry, &tasks, env, &config),
        Some(Commands::Run { tasks: names }) => run_named(&registry, &tasks, &names),
        Some(Commands::List) => run_list(&registry, &tasks),
        None => run_polish(&registry, &tasks, cli.env, &config),
    }
}

fn load_registry(config: &Config, root: &Path) -> Result<Registry> {
    // Sniffs change directory; a relative root would move with them.
    let root = root
        .canonicalize()
        .map_err(|e| Error::directory_not_found(root).with_source(e))?;

    let mut registry = Registry::new(root);
    polish_contrib::register_all(&mut registry);
    registry.apply_config(&config.schema)?;

    tracing::debug!(
        config = ?config.path,
        root = %registry.checks_root().display(),
        sniffs = registry.len(),
        "registry loaded"
    );
    Ok(registry)
}

fn run_polish(
    registry: &Registry,
    tasks: &dyn TaskDiscovery,
    env: Option<String>,
    config: &Config,
) -> Result<i32> {
    let env = env.unwrap_or_else(|| config.schema.general.default_env.clone());

    let report = polish_sniff::polish(registry, tasks, &env)?;
    report.print_summary();
    Ok(report.exit_code())
}

fn run_named(registry: &Registry, tasks: &dyn TaskDiscovery, names: &[String]) -> Result<i32> {
    let outcomes = polish_sniff::run_tasks(registry, tasks, names)?;

    if outcomes.iter().any(|o| o.failed) {
        Ok(exit_codes::FAILURE)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn run_list(registry: &Registry, tasks: &dyn TaskDiscovery) -> Result<i32> {
    let exposed = tasks.discoverable_tasks()?;

    Status::header("Available sniffs");
    for sniff in registry.all().iter().filter(|s| exposed.contains(s.name())) {
        let dev = if Environment::Dev.selects(sniff.severity(), sniff.timing()) {
            "dev".green().to_string()
        } else {
            "ci".dimmed().to_string()
        };
        println!(
            "  {:<32} {:<8} {:<4} {:<3}  {}",
            sniff.name().bold(),
            sniff.severity(),
            sniff.timing(),
            dev,
            sniff.handle().description().unwrap_or_default().dimmed()
        );
    }

    Ok(exit_codes::SUCCESS)
}
