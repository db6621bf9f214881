//! The bot object: loaded cogs, the live command tree, and the reversible
//! cog-lifecycle interception seam.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::command::{CommandKind, CommandSpec};
use crate::error::SubcommandError;
use crate::tree::{CommandId, CommandTree};

// ---------------------------------------------------------------------------
// Cog
// ---------------------------------------------------------------------------

/// A named bundle of command declarations, loaded and unloaded as a unit.
pub struct Cog {
    name: String,
    commands: Vec<CommandSpec>,
}

impl std::fmt::Debug for Cog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cog")
            .field("name", &self.name)
            .field("commands", &self.commands.len())
            .finish()
    }
}

impl Cog {
    pub fn builder(name: impl Into<String>) -> CogBuilder {
        CogBuilder {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }
}

pub struct CogBuilder {
    name: String,
    commands: Vec<CommandSpec>,
}

impl CogBuilder {
    pub fn command(mut self, spec: CommandSpec) -> Self {
        self.commands.push(spec);
        self
    }

    /// Validate every declaration and produce the cog.
    ///
    /// This is the declaration-time checkpoint: group annotations must be
    /// non-empty and only appear on directly-declared commands, leaves
    /// cannot carry children, inline children must be universe-compatible
    /// with their group, and names must be unique per level.
    pub fn build(self) -> Result<Cog, SubcommandError> {
        let mut seen = HashSet::new();
        for spec in &self.commands {
            if !seen.insert((spec.universe.side(), spec.name.clone())) {
                return Err(SubcommandError::DuplicateCommand {
                    name: spec.name.clone(),
                    scope: format!("cog {:?}", self.name),
                });
            }
            validate_spec(spec, None)?;
        }
        Ok(Cog {
            name: self.name,
            commands: self.commands,
        })
    }
}

fn validate_spec(spec: &CommandSpec, enclosing: Option<&str>) -> Result<(), SubcommandError> {
    if let Some(target) = &spec.requested_group {
        if let Some(group) = enclosing {
            return Err(SubcommandError::AnnotatedChild {
                command: spec.name.clone(),
                group: group.to_string(),
            });
        }
        if target.trim().is_empty() {
            return Err(SubcommandError::EmptyGroupName {
                command: spec.name.clone(),
            });
        }
    }
    if spec.kind == CommandKind::Leaf && !spec.children.is_empty() {
        return Err(SubcommandError::LeafWithChildren {
            command: spec.name.clone(),
        });
    }
    let mut seen = HashSet::new();
    for child in &spec.children {
        if !spec.universe.accepts(child.universe) {
            return Err(SubcommandError::UniverseMismatch {
                command: child.name.clone(),
                command_universe: child.universe,
                command_kind: child.kind,
                group: spec.name.clone(),
                group_universe: spec.universe,
            });
        }
        if !seen.insert(child.name.clone()) {
            return Err(SubcommandError::DuplicateCommand {
                name: child.name.clone(),
                scope: format!("group {:?}", spec.name),
            });
        }
        validate_spec(child, Some(&spec.name))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Interception seam
// ---------------------------------------------------------------------------

/// Observer wrapped around the bot's cog add/remove entry points.
///
/// The bot always runs its own logic first and hands control over after,
/// mirroring a delegate-then-augment wrap of the original entry points.
/// Installation is exclusive and reversible via `Bot::take_interceptor`.
#[async_trait]
pub trait CogInterceptor: Send + Sync {
    async fn after_cog_add(&self, bot: &mut Bot, cog: &str) -> Result<(), SubcommandError>;
    async fn after_cog_remove(&self, bot: &mut Bot, cog: &str) -> Result<(), SubcommandError>;
}

// ---------------------------------------------------------------------------
// Bot
// ---------------------------------------------------------------------------

/// Bookkeeping for one loaded cog.
pub struct LoadedCog {
    name: String,
    roots: Vec<CommandId>,
}

impl LoadedCog {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the commands this cog declared directly (top-level at load
    /// time; some may have been re-parented since).
    pub fn roots(&self) -> &[CommandId] {
        &self.roots
    }
}

#[derive(Default)]
pub struct Bot {
    tree: CommandTree,
    cogs: HashMap<String, LoadedCog>,
    interceptor: Option<Arc<dyn CogInterceptor>>,
}

impl Bot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut CommandTree {
        &mut self.tree
    }

    pub fn cog(&self, name: &str) -> Option<&LoadedCog> {
        self.cogs.get(name)
    }

    pub fn cogs(&self) -> impl Iterator<Item = &LoadedCog> {
        self.cogs.values()
    }

    /// Wrap the cog add/remove entry points. Fails if something is already
    /// installed; uninstall first.
    pub fn install_interceptor(
        &mut self,
        interceptor: Arc<dyn CogInterceptor>,
    ) -> Result<(), SubcommandError> {
        if self.interceptor.is_some() {
            return Err(SubcommandError::InterceptorInstalled);
        }
        self.interceptor = Some(interceptor);
        Ok(())
    }

    /// Restore the plain entry points, returning the wrapped interceptor.
    pub fn take_interceptor(&mut self) -> Option<Arc<dyn CogInterceptor>> {
        self.interceptor.take()
    }

    /// Load a cog: instantiate its declarations as top-level commands, then
    /// hand control to the installed interceptor, if any.
    pub async fn add_cog(&mut self, cog: Cog) -> Result<(), SubcommandError> {
        if self.cogs.contains_key(cog.name()) {
            return Err(SubcommandError::DuplicateCog(cog.name().to_string()));
        }
        for spec in cog.commands() {
            if self.tree.find_root(spec.universe.side(), &spec.name).is_some() {
                return Err(SubcommandError::DuplicateCommand {
                    name: spec.name.clone(),
                    scope: "the top level".to_string(),
                });
            }
        }

        let Cog { name, commands } = cog;
        let mut roots = Vec::with_capacity(commands.len());
        for spec in commands {
            roots.push(self.tree.instantiate(spec, &name));
        }
        debug!(cog = %name, commands = roots.len(), "cog loaded");
        self.cogs.insert(
            name.clone(),
            LoadedCog {
                name: name.clone(),
                roots,
            },
        );

        if let Some(interceptor) = self.interceptor.clone() {
            interceptor.after_cog_add(self, &name).await?;
        }
        Ok(())
    }

    /// Unload a cog. Its commands that are still top-level die with it;
    /// commands that were re-parented under another cog's group are left
    /// for the interceptor to detach. Returns whether the cog existed.
    pub async fn remove_cog(&mut self, name: &str) -> Result<bool, SubcommandError> {
        let Some(cog) = self.cogs.remove(name) else {
            return Ok(false);
        };
        for id in cog.roots() {
            let parentless = self
                .tree
                .node(*id)
                .map(|n| n.parent().is_none())
                .unwrap_or(false);
            if parentless {
                self.tree.remove_subtree(*id);
            }
        }
        debug!(cog = %name, "cog unloaded");

        if let Some(interceptor) = self.interceptor.clone() {
            interceptor.after_cog_remove(self, name).await?;
        }
        Ok(true)
    }
}
