//! Command model: universes, kinds, declaration specs, and callback seams.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Universe
// ---------------------------------------------------------------------------

/// Which of the three parallel command universes a command lives in.
///
/// Hybrid commands are prefix-compatible: they register on the prefix side
/// and may attach under plain prefix groups. Slash commands are their own
/// world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Universe {
    Prefix,
    Hybrid,
    Slash,
}

/// The two walkable trees the host keeps: prefix-side (prefix + hybrid)
/// and slash-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Prefix,
    Slash,
}

impl Universe {
    /// The tree side commands of this universe are registered on.
    pub fn side(self) -> Side {
        match self {
            Universe::Slash => Side::Slash,
            Universe::Prefix | Universe::Hybrid => Side::Prefix,
        }
    }

    /// Whether a group of this universe accepts a child of universe `child`.
    pub fn accepts(self, child: Universe) -> bool {
        match self {
            Universe::Prefix => matches!(child, Universe::Prefix | Universe::Hybrid),
            Universe::Hybrid => child == Universe::Hybrid,
            Universe::Slash => child == Universe::Slash,
        }
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Universe::Prefix => write!(f, "prefix"),
            Universe::Hybrid => write!(f, "hybrid"),
            Universe::Slash => write!(f, "slash"),
        }
    }
}

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// Leaf commands are invocable; groups hold children and may themselves be
/// nested under other groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Leaf,
    Group,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Leaf => write!(f, "command"),
            CommandKind::Group => write!(f, "group"),
        }
    }
}

// ---------------------------------------------------------------------------
// Callback seams
// ---------------------------------------------------------------------------

/// Context handed to a command callback when the host dispatches it.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub channel: String,
    pub sender: String,
    pub args: Vec<String>,
}

/// The invocable body of a leaf command (or the fallback body of a group).
/// Dispatch is the host's job, not this crate's; the slot exists so cogs
/// declare real handlers and so group error handlers can be copied around.
#[async_trait]
pub trait CommandCallback: Send + Sync {
    async fn invoke(&self, inv: &Invocation) -> anyhow::Result<String>;
}

/// Called by the host when a command's callback fails. Returns the text to
/// send back to the channel.
#[async_trait]
pub trait ErrorCallback: Send + Sync {
    async fn on_error(&self, inv: &Invocation, error: &anyhow::Error) -> String;
}

// ---------------------------------------------------------------------------
// Declaration spec
// ---------------------------------------------------------------------------

/// Declaration-time description of a command, before it is instantiated
/// into a bot's live tree.
///
/// `subcommand_of` is the registration-indirection marker: it records the
/// qualified name of a group declared elsewhere (possibly in a different
/// cog) that this command should be attached under once both are loaded.
#[derive(Clone)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub kind: CommandKind,
    pub universe: Universe,
    pub callback: Option<Arc<dyn CommandCallback>>,
    pub error_handler: Option<Arc<dyn ErrorCallback>>,
    pub children: Vec<CommandSpec>,
    pub requested_group: Option<String>,
}

impl CommandSpec {
    fn new(name: impl Into<String>, kind: CommandKind, universe: Universe) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            universe,
            callback: None,
            error_handler: None,
            children: Vec::new(),
            requested_group: None,
        }
    }

    pub fn leaf(name: impl Into<String>, universe: Universe) -> Self {
        Self::new(name, CommandKind::Leaf, universe)
    }

    pub fn group(name: impl Into<String>, universe: Universe) -> Self {
        Self::new(name, CommandKind::Group, universe)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn callback(mut self, callback: Arc<dyn CommandCallback>) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn on_error(mut self, handler: Arc<dyn ErrorCallback>) -> Self {
        self.error_handler = Some(handler);
        self
    }

    /// Nest a child command directly under this group at declaration time.
    pub fn child(mut self, child: CommandSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Mark this command as a subcommand of a group declared elsewhere.
    /// `group` is the target group's qualified name, space-separated for
    /// nested groups (e.g. `"user utils"`).
    pub fn subcommand_of(mut self, group: impl Into<String>) -> Self {
        self.requested_group = Some(group.into());
        self
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("universe", &self.universe)
            .field("children", &self.children)
            .field("requested_group", &self.requested_group)
            .finish_non_exhaustive()
    }
}
