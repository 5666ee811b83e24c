use std::str::FromStr;

use softmobile_application::PageVisibility;
use softmobile_core::{AppError, AppResult};
use softmobile_domain::SyncOutboxPriority;

pub const HELP: &str = "commands: refresh | status | store <id|none> | search <term> | \
retry <reason> | priority <id> <high|normal|low> <reason> | resolve | \
ack <entity_type> <entity_id> <reason> [| note] | snooze | hide | show | \
sidebar <on|off> | module <name> | dismiss <toast_id> | help | quit";

/// One operator command read from standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentCommand {
    Refresh,
    Status,
    SelectStore(Option<i64>),
    Search(String),
    Retry {
        reason: String,
    },
    Reprioritize {
        entry_id: i64,
        priority: SyncOutboxPriority,
        reason: String,
    },
    ResolveConflicts,
    Acknowledge {
        entity_type: String,
        entity_id: String,
        reason: String,
        note: Option<String>,
    },
    Snooze,
    Visibility(PageVisibility),
    Sidebar(bool),
    Module(String),
    DismissToast(u64),
    Help,
    Quit,
}

impl FromStr for AgentCommand {
    type Err = AppError;

    fn from_str(line: &str) -> AppResult<Self> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match name.to_ascii_lowercase().as_str() {
            "refresh" => Ok(Self::Refresh),
            "status" => Ok(Self::Status),
            "store" => match rest {
                "" | "none" => Ok(Self::SelectStore(None)),
                value => parse_i64(value, "store id").map(|id| Self::SelectStore(Some(id))),
            },
            "search" => Ok(Self::Search(rest.to_owned())),
            "retry" => Ok(Self::Retry {
                reason: rest.to_owned(),
            }),
            "priority" => {
                let mut parts = rest.splitn(3, char::is_whitespace);
                let entry_id = parse_i64(parts.next().unwrap_or_default(), "outbox entry id")?;
                let priority = parts
                    .next()
                    .unwrap_or_default()
                    .parse::<SyncOutboxPriority>()?;
                Ok(Self::Reprioritize {
                    entry_id,
                    priority,
                    reason: parts.next().unwrap_or_default().trim().to_owned(),
                })
            }
            "resolve" => Ok(Self::ResolveConflicts),
            "ack" => {
                let (arguments, note) = match rest.split_once('|') {
                    Some((arguments, note)) => (arguments, Some(note.trim().to_owned())),
                    None => (rest, None),
                };
                let mut parts = arguments.trim().splitn(3, char::is_whitespace);
                let entity_type = parts.next().unwrap_or_default().to_owned();
                let entity_id = parts.next().unwrap_or_default().to_owned();
                if entity_type.is_empty() || entity_id.is_empty() {
                    return Err(AppError::Validation(
                        "usage: ack <entity_type> <entity_id> <reason> [| note]".to_owned(),
                    ));
                }
                Ok(Self::Acknowledge {
                    entity_type,
                    entity_id,
                    reason: parts.next().unwrap_or_default().trim().to_owned(),
                    note: note.filter(|note| !note.is_empty()),
                })
            }
            "snooze" => Ok(Self::Snooze),
            "hide" => Ok(Self::Visibility(PageVisibility::Hidden)),
            "show" => Ok(Self::Visibility(PageVisibility::Visible)),
            "sidebar" => match rest.to_ascii_lowercase().as_str() {
                "on" | "collapsed" => Ok(Self::Sidebar(true)),
                "off" | "expanded" => Ok(Self::Sidebar(false)),
                other => Err(AppError::Validation(format!(
                    "sidebar expects 'on' or 'off', got '{other}'"
                ))),
            },
            "module" => Ok(Self::Module(rest.to_owned())),
            "dismiss" => rest
                .parse::<u64>()
                .map(Self::DismissToast)
                .map_err(|error| AppError::Validation(format!("invalid toast id '{rest}': {error}"))),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(AppError::Validation(format!("unknown command '{other}'"))),
        }
    }
}

fn parse_i64(value: &str, label: &str) -> AppResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|error| AppError::Validation(format!("invalid {label} '{value}': {error}")))
}
