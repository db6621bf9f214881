//! Pending-subcommand bookkeeping. Process-lifetime state, rebuilt from
//! scratch every startup; nothing here persists.

use std::collections::{BTreeMap, BTreeSet};

use crosscog_core::{CommandId, CommandKind, Universe};

/// One declared-but-possibly-unattached subcommand.
#[derive(Debug, Clone)]
pub(crate) struct PendingSubcommand {
    /// Qualified name of the group this command wants to join.
    pub target: String,
    pub command: CommandId,
    pub kind: CommandKind,
    pub universe: Universe,
    /// The group this command sits under once resolved.
    pub attached: Option<CommandId>,
}

/// Per-cog buckets of declarations.
///
/// `unresolved` holds keys into `all`, so every unresolved entry is a known
/// entry by construction. An entry leaves `unresolved` exactly when its
/// attach succeeds and stays in `all` until its cog unloads.
#[derive(Debug, Default)]
pub(crate) struct PendingRegistry {
    all: BTreeMap<String, BTreeMap<String, PendingSubcommand>>,
    unresolved: BTreeMap<String, BTreeSet<String>>,
}

impl PendingRegistry {
    pub fn insert(&mut self, cog: &str, command: &str, entry: PendingSubcommand) {
        self.all
            .entry(cog.to_string())
            .or_default()
            .insert(command.to_string(), entry);
        self.unresolved
            .entry(cog.to_string())
            .or_default()
            .insert(command.to_string());
    }

    pub fn get(&self, cog: &str, command: &str) -> Option<&PendingSubcommand> {
        self.all.get(cog).and_then(|m| m.get(command))
    }

    pub fn mark_resolved(&mut self, cog: &str, command: &str, group: CommandId) {
        if let Some(entry) = self.all.get_mut(cog).and_then(|m| m.get_mut(command)) {
            entry.attached = Some(group);
        }
        if let Some(set) = self.unresolved.get_mut(cog) {
            set.remove(command);
            if set.is_empty() {
                self.unresolved.remove(cog);
            }
        }
    }

    /// (cog, command) keys of everything still waiting for a group, in
    /// stable sorted order.
    pub fn unresolved_keys(&self) -> Vec<(String, String)> {
        self.unresolved
            .iter()
            .flat_map(|(cog, commands)| {
                commands.iter().map(|c| (cog.clone(), c.clone()))
            })
            .collect()
    }

    pub fn unresolved_len(&self) -> usize {
        self.unresolved.values().map(|s| s.len()).sum()
    }

    /// Drop one cog's bucket from both collections, returning its entries.
    pub fn remove_cog(&mut self, cog: &str) -> Vec<PendingSubcommand> {
        self.unresolved.remove(cog);
        self.all
            .remove(cog)
            .map(|m| m.into_values().collect())
            .unwrap_or_default()
    }

    /// Empty both collections, returning every known entry.
    pub fn drain_all(&mut self) -> Vec<PendingSubcommand> {
        self.unresolved.clear();
        std::mem::take(&mut self.all)
            .into_values()
            .flat_map(|m| m.into_values())
            .collect()
    }
}
