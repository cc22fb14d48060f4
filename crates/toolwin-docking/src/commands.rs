use std::str::FromStr;

use toolwin_common::{Anchor, ToolWindowId, ToolWindowType};

/// A user-level docking action.
///
/// The text form is `verb:id[:args]`, e.g. `move:Project:bottom:2`,
/// `type:Git:floating`, `stretch-width:Project:-40` or
/// `side-weight:Commit:0.3`.
#[derive(Debug, Clone, PartialEq)]
pub enum DockCommand {
    Show(ToolWindowId),
    Hide { id: ToolWindowId, hide_side: bool },
    Activate(ToolWindowId),
    Move {
        id: ToolWindowId,
        anchor: Anchor,
        order: i32,
        split: Option<bool>,
    },
    SetType(ToolWindowId, ToolWindowType),
    ToggleMaximized(ToolWindowId),
    StretchWidth(ToolWindowId, f64),
    StretchHeight(ToolWindowId, f64),
    SetSideWeight(ToolWindowId, f64),
}

impl DockCommand {
    pub fn id(&self) -> &ToolWindowId {
        match self {
            DockCommand::Show(id)
            | DockCommand::Hide { id, .. }
            | DockCommand::Activate(id)
            | DockCommand::Move { id, .. }
            | DockCommand::SetType(id, _)
            | DockCommand::ToggleMaximized(id)
            | DockCommand::StretchWidth(id, _)
            | DockCommand::StretchHeight(id, _)
            | DockCommand::SetSideWeight(id, _) => id,
        }
    }
}

impl FromStr for DockCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let (verb, id, args) = match parts.as_slice() {
            [verb, id, args @ ..] if !id.is_empty() => (*verb, ToolWindowId::new(*id), args),
            _ => return Err(format!("expected verb:id[:args], got \"{s}\"")),
        };

        let pixels = |args: &[&str]| -> Result<f64, String> {
            match args {
                [px] => px.parse().map_err(|_| format!("invalid pixel delta: {px}")),
                _ => Err(format!("{verb} takes one pixel delta")),
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "show" => Ok(DockCommand::Show(id)),
            "hide" => Ok(DockCommand::Hide { id, hide_side: false }),
            "hide-side" => Ok(DockCommand::Hide { id, hide_side: true }),
            "activate" => Ok(DockCommand::Activate(id)),
            "maximize" => Ok(DockCommand::ToggleMaximized(id)),
            "type" => match args {
                [kind] => Ok(DockCommand::SetType(id, kind.parse()?)),
                _ => Err("type takes one tool window type".into()),
            },
            "move" => {
                let (anchor, order, split) = match args {
                    [anchor] => (anchor, -1, None),
                    [anchor, order] => (anchor, parse_order(order)?, None),
                    [anchor, order, split] => (anchor, parse_order(order)?, Some(parse_split(split)?)),
                    _ => return Err("move takes anchor[:order[:split]]".into()),
                };
                Ok(DockCommand::Move {
                    id,
                    anchor: anchor.parse()?,
                    order,
                    split,
                })
            }
            "stretch-width" => Ok(DockCommand::StretchWidth(id, pixels(args)?)),
            "stretch-height" => Ok(DockCommand::StretchHeight(id, pixels(args)?)),
            "side-weight" => match args {
                [w] => w
                    .parse()
                    .map(|w| DockCommand::SetSideWeight(id, w))
                    .map_err(|_| format!("invalid side weight: {w}")),
                _ => Err("side-weight takes one fraction".into()),
            },
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn parse_order(s: &str) -> Result<i32, String> {
    match s {
        "" | "end" => Ok(-1),
        _ => s.parse().map_err(|_| format!("invalid order: {s}")),
    }
}

fn parse_split(s: &str) -> Result<bool, String> {
    match s {
        "split" | "true" => Ok(true),
        "main" | "false" => Ok(false),
        _ => Err(format!("invalid split flag: {s}")),
    }
}
