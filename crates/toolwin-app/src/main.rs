mod cli;

use std::path::PathBuf;

use toolwin_common::{Rect, ToolwinError};
use toolwin_config::ToolwinConfig;
use toolwin_docking::{DockCommand, Services, ToolWindowManager};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse();

    let config = load_config(&args);
    init_logging(&args, &config);

    tracing::info!("toolwin starting");

    if let Err(e) = run(&args, &config) {
        tracing::error!(error = %e, "toolwin failed");
        eprintln!("toolwin: {e}");
        std::process::exit(1);
    }
}

fn load_config(args: &cli::Args) -> ToolwinConfig {
    let loaded = match &args.config {
        Some(path) => toolwin_config::toml_loader::load_from_path(path),
        None => toolwin_config::load_config(),
    };
    // Logging is not up yet, so failures go to stderr.
    loaded.unwrap_or_else(|e| {
        eprintln!("toolwin: failed to load config, using defaults: {e}");
        ToolwinConfig::default()
    })
}

fn init_logging(args: &cli::Args, config: &ToolwinConfig) {
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    let directive = format!("toolwin={level}");
    let filter = match directive.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into()),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn state_path(args: &cli::Args) -> Result<PathBuf, ToolwinError> {
    match &args.state {
        Some(path) => Ok(path.clone()),
        None => Ok(toolwin_config::toml_loader::default_state_path()?),
    }
}

fn run(args: &cli::Args, config: &ToolwinConfig) -> Result<(), ToolwinError> {
    let frame = Rect::new(0.0, 0.0, args.width, args.height);
    let mut manager = ToolWindowManager::new(config, Services::headless(frame));
    manager.on_frame_bounds_changed(Some(frame));

    let path = state_path(args)?;
    if !manager.load_state_from(&path)? {
        tracing::info!(path = %path.display(), "starting with an empty layout");
    }

    for spec in &args.register {
        manager.register_tool_window(spec.task())?;
    }

    for raw in &args.commands {
        let cmd: DockCommand = raw.parse().map_err(ToolwinError::Other)?;
        let changed = manager.execute(cmd)?;
        tracing::debug!(command = %raw, changed, "command applied");
        manager.dispatch_decorator_events();
    }

    let state = manager.state();
    let json = serde_json::to_string_pretty(&state)
        .map_err(|e| ToolwinError::Other(format!("failed to serialize state: {e}")))?;
    println!("{json}");

    if !args.dry_run {
        manager.save_state_to(&path)?;
    }
    Ok(())
}
