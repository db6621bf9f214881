use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::command::{CommandKind, Universe};

/// Top-level error type for the crosscog runtime.
///
/// Declaration errors surface from `Cog::build`, tree errors from the bot's
/// attach/detach primitives, resolution conflicts from the manager's
/// resolution pass, and `Unresolved` from the explicit report call.
#[derive(Debug, Error)]
pub enum SubcommandError {
    #[error("group name for subcommand {command:?} must not be empty")]
    EmptyGroupName { command: String },

    #[error("command {command:?} is already nested under group {group:?} and cannot be marked as a subcommand")]
    AnnotatedChild { command: String, group: String },

    #[error("leaf command {command:?} cannot have child commands")]
    LeafWithChildren { command: String },

    #[error("duplicate command name {name:?} under {scope}")]
    DuplicateCommand { name: String, scope: String },

    #[error("cog {0:?} is already loaded")]
    DuplicateCog(String),

    #[error("a cog interceptor is already installed")]
    InterceptorInstalled,

    #[error("command {0:?} is no longer registered")]
    MissingCommand(String),

    #[error("{target:?} for command {command:?} is not a group")]
    NotAGroup { target: String, command: String },

    #[error("cannot attach {command_universe} {command_kind} {command:?} to {group_universe} group {group:?}")]
    UniverseMismatch {
        command: String,
        command_universe: Universe,
        command_kind: CommandKind,
        group: String,
        group_universe: Universe,
    },

    #[error("command {command:?} is already a subcommand of group {group:?}")]
    AlreadyAttached { command: String, group: String },

    #[error("{} subcommand declaration(s) hit a resolution conflict:\n{}", .0.len(), render_conflicts(.0))]
    ResolutionConflicts(Vec<SubcommandError>),

    #[error("{} subcommand declaration(s) could not be attached:\n{}", .0.len(), render_unresolved(.0))]
    Unresolved(Vec<UnresolvedEntry>),
}

/// One still-unresolved declaration at report time.
#[derive(Debug, Clone, Serialize)]
pub struct UnresolvedEntry {
    /// Cog that declared the subcommand.
    pub cog: String,
    /// Qualified name of the declared command.
    pub command: String,
    pub kind: CommandKind,
    pub universe: Universe,
    /// The group qualified name that was never found.
    pub target: String,
    /// Closest existing group qualified name, if any candidate exists.
    pub suggestion: Option<String>,
}

impl fmt::Display for UnresolvedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "group {:?} for {} {} {:?} in cog {:?} was not found.",
            self.target, self.universe, self.kind, self.command, self.cog
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " Did you mean {suggestion:?}?")?;
        }
        Ok(())
    }
}

fn render_unresolved(entries: &[UnresolvedEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_conflicts(conflicts: &[SubcommandError]) -> String {
    conflicts
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
