use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use toolwin_common::Anchor;
use toolwin_docking::RegisterToolWindowTask;

/// toolwin: drive a headless tool-window layout from the command line.
#[derive(Parser, Debug)]
#[command(name = "toolwin", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Workspace state file. Defaults to workspace.toml next to the config.
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Tool windows to register, as NAME[:ANCHOR[:side]].
    #[arg(short = 'r', long = "register", value_name = "NAME[:ANCHOR[:side]]")]
    pub register: Vec<WindowSpec>,

    /// Commands to apply in order, e.g. show:Project or move:Run:left:0.
    #[arg(short = 'c', long = "command", value_name = "VERB:ID[:ARGS]")]
    pub commands: Vec<String>,

    /// Frame width used by the headless window services.
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Frame height used by the headless window services.
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// Print the resulting state without writing it back.
    #[arg(long)]
    pub dry_run: bool,
}

/// One `--register` argument.
#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub name: String,
    pub anchor: Anchor,
    pub side_tool: bool,
}

impl WindowSpec {
    pub fn task(&self) -> RegisterToolWindowTask {
        RegisterToolWindowTask::new(self.name.clone())
            .anchor(self.anchor)
            .side_tool(self.side_tool)
    }
}

impl FromStr for WindowSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let (name, anchor, side_tool) = match parts.as_slice() {
            [name] => (*name, Anchor::Left, false),
            [name, anchor] => (*name, anchor.parse()?, false),
            [name, anchor, "side"] => (*name, anchor.parse()?, true),
            [_, _, other] => return Err(format!("expected \"side\", got \"{other}\"")),
            _ => return Err(format!("expected NAME[:ANCHOR[:side]], got \"{s}\"")),
        };
        if name.is_empty() {
            return Err("tool window name is empty".into());
        }
        Ok(Self {
            name: name.to_string(),
            anchor,
            side_tool,
        })
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_spec_defaults_to_left() {
        let spec: WindowSpec = "Project".parse().unwrap();
        assert_eq!(spec.name, "Project");
        assert_eq!(spec.anchor, Anchor::Left);
        assert!(!spec.side_tool);
    }

    #[test]
    fn window_spec_with_anchor_and_side() {
        let spec: WindowSpec = "Structure:left:side".parse().unwrap();
        assert_eq!(spec.anchor, Anchor::Left);
        assert!(spec.side_tool);

        let task = "Run:bottom".parse::<WindowSpec>().unwrap().task();
        assert_eq!(task.anchor, Anchor::Bottom);
        assert!(!task.side_tool);
    }

    #[test]
    fn window_spec_rejects_garbage() {
        assert!("".parse::<WindowSpec>().is_err());
        assert!("Run:middle".parse::<WindowSpec>().is_err());
        assert!("Run:left:main".parse::<WindowSpec>().is_err());
        assert!("Run:left:side:x".parse::<WindowSpec>().is_err());
    }

    #[test]
    fn args_collect_repeated_flags() {
        let args = Args::try_parse_from([
            "toolwin",
            "-r",
            "Project",
            "-r",
            "Run:bottom",
            "-c",
            "show:Run",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.register.len(), 2);
        assert_eq!(args.commands, vec!["show:Run".to_string()]);
        assert!(args.dry_run);
        assert!((args.width - 1280.0).abs() < f64::EPSILON);
    }
}
