use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use git_chronicle::cli::{run_update_workflow, UpdateWorkflowArgs};
use git_chronicle::config;
use git_chronicle::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-chronicle",
    version,
    about = "Regenerate per-component changelogs from git history and version tags"
)]
struct Args {
    #[arg(help = "Component ids to update")]
    components: Vec<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Repository root (discovered from the current directory by default)")]
    root: Option<PathBuf>,

    #[arg(long, help = "Update every configured component")]
    all: bool,

    #[arg(long, help = "Preview the changelogs without writing them")]
    dry_run: bool,

    #[arg(long, help = "Show configured components and exit")]
    list: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if args.list {
        list_components(&config);
        return Ok(());
    }

    let workflow_args = UpdateWorkflowArgs {
        root: args.root,
        components: args.components,
        all: args.all,
        dry_run: args.dry_run,
    };

    if let Err(e) = run_update_workflow(&workflow_args, &config, ui::display_outcome) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn list_components(config: &config::Config) {
    let components: Vec<(String, String, String)> = config
        .components
        .iter()
        .map(|(id, entry)| (id.clone(), entry.version.clone(), entry.path.clone()))
        .collect();

    if components.is_empty() {
        ui::display_error("No components configured in chronicle.toml");
        std::process::exit(1);
    }

    ui::display_components(&components);
}
