use anyhow::{bail, Context, Result};
use clap::Parser;
use envscope::config::Config;
use envscope::environment::Environment;
use envscope::logging::init_logging;
use envscope::route::{History, RouteAddress};
use envscope::source::{EnvironmentSource, FileSource, SourceError, StaticSource};
use envscope::ui::App;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "envscope",
    about = "Browse a project's environments with an address-synced detail drawer",
    version
)]
struct Args {
    /// Project to open (defaults to the last project used)
    project: Option<String>,

    /// Start at a full address, e.g. /project/shop/environment/prod
    #[arg(short, long, conflicts_with = "project")]
    address: Option<String>,

    /// JSON file with environments per project
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Use built-in demo data instead of a data file
    #[arg(long, conflicts_with = "data")]
    demo: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the project's environments and exit (no TUI)
    #[arg(short, long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load();

    init_logging(args.log_file.as_deref().or(config.log_file.as_deref()))?;

    let address = resolve_address(&args, &config)?;
    let source = resolve_source(&args, &config)?;

    if args.check {
        return print_check(&address, source.as_ref());
    }

    let app = App::new(config, History::new(address.to_string()), &source.describe())
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    envscope::app::run_tui(app, source).await
}

fn resolve_address(args: &Args, config: &Config) -> Result<RouteAddress> {
    if let Some(raw) = &args.address {
        return RouteAddress::parse(raw).with_context(|| format!("invalid address {:?}", raw));
    }

    let Some(project) = args.project.as_deref().or(config.last_project.as_deref()) else {
        bail!(
            "No project given. Pass a project name or --address (last project is remembered in {})",
            Config::config_location()
        );
    };
    RouteAddress::for_project(project).with_context(|| format!("invalid project {:?}", project))
}

fn resolve_source(args: &Args, config: &Config) -> Result<Arc<dyn EnvironmentSource>> {
    if args.demo {
        return Ok(Arc::new(StaticSource::demo()));
    }
    match args.data.as_ref().or(config.data_file.as_ref()) {
        Some(path) => Ok(Arc::new(FileSource::new(path))),
        None => bail!(
            "No data file. Pass --data <file>, set data_file in {}, or try --demo",
            Config::config_location()
        ),
    }
}

fn print_check(address: &RouteAddress, source: &dyn EnvironmentSource) -> Result<()> {
    let environments = match source.fetch(address.project()) {
        Ok(environments) => environments,
        Err(err @ SourceError::UnknownProject(_)) => {
            if let Ok(projects) = source.projects() {
                if !projects.is_empty() {
                    eprintln!("Known projects: {}", projects.join(", "));
                }
            }
            bail!(err.user_message());
        }
        Err(err) => bail!(err.user_message()),
    };

    println!();
    println!("  {}  ({})", address.project(), source.describe());
    println!();
    if environments.is_empty() {
        println!("  No environments in this project");
    }
    for environment in &environments {
        println!("  {}", check_row(environment));
    }

    if let Some(name) = address.environment() {
        println!();
        match environments.iter().find(|e| e.name() == Some(name)) {
            Some(_) => println!("  Open: {}", name),
            None => println!("  No environment named {} in project {}", name, address.project()),
        }
    }
    Ok(())
}

fn check_row(environment: &Environment) -> String {
    let name = environment.name().unwrap_or("(unnamed)");
    match environment.health() {
        Some(health) => format!("{:<24} {}", name, health.label()),
        None => name.to_string(),
    }
}
