//! Arena-backed command tree: the host's live registry of commands.
//!
//! Nodes are addressed by opaque `CommandId` handles. Each side of the tree
//! (prefix + hybrid, slash) keeps its own top-level root list; group
//! membership is parent pointers plus child lists on the nodes themselves.
//! A node is either top-level (rooted) or a child of exactly one group.

use std::collections::HashMap;
use std::sync::Arc;

use crate::command::{CommandCallback, CommandKind, CommandSpec, ErrorCallback, Side, Universe};
use crate::error::SubcommandError;

/// Opaque handle to a live command node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommandId(u64);

/// A live command in the tree.
pub struct CommandNode {
    pub name: String,
    pub description: String,
    pub kind: CommandKind,
    pub universe: Universe,
    /// Name of the cog that declared this command.
    pub cog: String,
    pub callback: Option<Arc<dyn CommandCallback>>,
    pub error_handler: Option<Arc<dyn ErrorCallback>>,
    /// The group annotation carried over from the declaration, if any.
    pub requested_group: Option<String>,
    parent: Option<CommandId>,
    children: Vec<CommandId>,
}

impl CommandNode {
    pub fn parent(&self) -> Option<CommandId> {
        self.parent
    }

    pub fn children(&self) -> &[CommandId] {
        &self.children
    }

    pub fn has_error_handler(&self) -> bool {
        self.error_handler.is_some()
    }
}

#[derive(Default)]
pub struct CommandTree {
    nodes: HashMap<CommandId, CommandNode>,
    prefix_roots: Vec<CommandId>,
    slash_roots: Vec<CommandId>,
    next_id: u64,
}

impl CommandTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: CommandId) -> Option<&CommandNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: CommandId) -> Option<&mut CommandNode> {
        self.nodes.get_mut(&id)
    }

    pub fn roots(&self, side: Side) -> &[CommandId] {
        match side {
            Side::Prefix => &self.prefix_roots,
            Side::Slash => &self.slash_roots,
        }
    }

    fn roots_mut(&mut self, side: Side) -> &mut Vec<CommandId> {
        match side {
            Side::Prefix => &mut self.prefix_roots,
            Side::Slash => &mut self.slash_roots,
        }
    }

    /// Instantiate a declaration spec (and its nested children) as a new
    /// top-level subtree. Returns the root's id.
    pub fn instantiate(&mut self, spec: CommandSpec, cog: &str) -> CommandId {
        let side = spec.universe.side();
        let id = self.instantiate_inner(spec, cog, None);
        self.roots_mut(side).push(id);
        id
    }

    fn instantiate_inner(
        &mut self,
        spec: CommandSpec,
        cog: &str,
        parent: Option<CommandId>,
    ) -> CommandId {
        let id = CommandId(self.next_id);
        self.next_id += 1;
        let children = spec.children;
        self.nodes.insert(
            id,
            CommandNode {
                name: spec.name,
                description: spec.description,
                kind: spec.kind,
                universe: spec.universe,
                cog: cog.to_string(),
                callback: spec.callback,
                error_handler: spec.error_handler,
                requested_group: spec.requested_group,
                parent,
                children: Vec::new(),
            },
        );
        for child in children {
            let child_id = self.instantiate_inner(child, cog, Some(id));
            if let Some(node) = self.nodes.get_mut(&id) {
                node.children.push(child_id);
            }
        }
        id
    }

    /// Remove a node and all of its descendants. Unlinks from the parent
    /// group or the root list as appropriate.
    pub fn remove_subtree(&mut self, id: CommandId) {
        let Some(node) = self.nodes.get(&id) else { return };
        if let Some(parent) = node.parent {
            if let Some(p) = self.nodes.get_mut(&parent) {
                p.children.retain(|c| *c != id);
            }
        }
        self.unroot(id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
            }
        }
    }

    /// Space-joined path from the top-level ancestor down to this node.
    pub fn qualified_name(&self, id: CommandId) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.nodes.get(&c)?;
            segments.push(node.name.clone());
            current = node.parent;
        }
        segments.reverse();
        Some(segments.join(" "))
    }

    /// Depth-first preorder walk over one side of the tree.
    pub fn walk(&self, side: Side) -> Vec<CommandId> {
        let mut out = Vec::new();
        let mut stack: Vec<CommandId> = self.roots(side).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                out.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// All group nodes currently registered on one side.
    pub fn groups(&self, side: Side) -> Vec<CommandId> {
        self.walk(side)
            .into_iter()
            .filter(|id| {
                self.nodes
                    .get(id)
                    .map(|n| n.kind == CommandKind::Group)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Find a node on one side by exact qualified name.
    pub fn find_qualified(&self, side: Side, qualified: &str) -> Option<CommandId> {
        self.walk(side)
            .into_iter()
            .find(|id| self.qualified_name(*id).as_deref() == Some(qualified))
    }

    /// Find a top-level node by simple name.
    pub fn find_root(&self, side: Side, name: &str) -> Option<CommandId> {
        self.roots(side)
            .iter()
            .copied()
            .find(|id| self.nodes.get(id).map(|n| n.name.as_str()) == Some(name))
    }

    /// Drop a node from its side's top-level list. Returns whether it was
    /// actually rooted. The node itself stays in the arena.
    pub fn unroot(&mut self, id: CommandId) -> bool {
        let Some(side) = self.nodes.get(&id).map(|n| n.universe.side()) else {
            return false;
        };
        let roots = self.roots_mut(side);
        let before = roots.len();
        roots.retain(|r| *r != id);
        roots.len() != before
    }

    /// Put a parentless node back on its side's top-level list.
    pub fn root(&mut self, id: CommandId) {
        let Some(side) = self.nodes.get(&id).map(|n| n.universe.side()) else {
            return;
        };
        let roots = self.roots_mut(side);
        if !roots.contains(&id) {
            roots.push(id);
        }
    }

    /// Attach `child` under `group`. The child is pulled off the top-level
    /// list if it is currently rooted. Fails if the target is not a group,
    /// the universes are incompatible, the child already has a parent, or
    /// the group already has a child with the same name.
    pub fn attach(&mut self, group: CommandId, child: CommandId) -> Result<(), SubcommandError> {
        let child_qual = self.qualified_name(child).unwrap_or_default();
        let group_qual = self.qualified_name(group).unwrap_or_default();

        let Some(group_node) = self.nodes.get(&group) else {
            return Err(SubcommandError::MissingCommand(group_qual));
        };
        if group_node.kind != CommandKind::Group {
            return Err(SubcommandError::NotAGroup {
                target: group_qual,
                command: child_qual,
            });
        }
        let group_universe = group_node.universe;
        let sibling_names: Vec<String> = group_node
            .children
            .iter()
            .filter_map(|c| self.nodes.get(c).map(|n| n.name.clone()))
            .collect();

        let Some(child_node) = self.nodes.get(&child) else {
            return Err(SubcommandError::MissingCommand(child_qual));
        };
        if let Some(parent) = child_node.parent {
            return Err(SubcommandError::AlreadyAttached {
                command: child_qual,
                group: self.qualified_name(parent).unwrap_or_default(),
            });
        }
        if !group_universe.accepts(child_node.universe) {
            return Err(SubcommandError::UniverseMismatch {
                command: child_qual,
                command_universe: child_node.universe,
                command_kind: child_node.kind,
                group: group_qual,
                group_universe,
            });
        }
        if sibling_names.iter().any(|n| *n == child_node.name) {
            return Err(SubcommandError::DuplicateCommand {
                name: child_node.name.clone(),
                scope: format!("group {group_qual:?}"),
            });
        }

        self.unroot(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(group);
        }
        if let Some(node) = self.nodes.get_mut(&group) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Unlink `child` from its parent group. Returns whether it had one.
    /// The node is left parentless and unrooted; the caller decides whether
    /// to drop it or restore it to the top level.
    pub fn detach(&mut self, child: CommandId) -> bool {
        let Some(parent) = self.nodes.get(&child).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_group() -> (CommandTree, CommandId, CommandId) {
        let mut tree = CommandTree::new();
        let group = tree.instantiate(
            CommandSpec::group("user", Universe::Prefix)
                .child(CommandSpec::leaf("help", Universe::Prefix)),
            "groups",
        );
        let leaf = tree.instantiate(CommandSpec::leaf("info", Universe::Prefix), "userinfo");
        (tree, group, leaf)
    }

    #[test]
    fn qualified_names_follow_nesting() {
        let (tree, group, _) = tree_with_group();
        let help = tree.node(group).unwrap().children()[0];
        assert_eq!(tree.qualified_name(group).as_deref(), Some("user"));
        assert_eq!(tree.qualified_name(help).as_deref(), Some("user help"));
    }

    #[test]
    fn attach_moves_a_root_under_the_group() {
        let (mut tree, group, leaf) = tree_with_group();
        assert_eq!(tree.roots(Side::Prefix).len(), 2);
        tree.attach(group, leaf).unwrap();
        assert_eq!(tree.roots(Side::Prefix), &[group]);
        assert_eq!(tree.node(leaf).unwrap().parent(), Some(group));
        assert_eq!(tree.qualified_name(leaf).as_deref(), Some("user info"));
    }

    #[test]
    fn detach_is_the_inverse_of_attach() {
        let (mut tree, group, leaf) = tree_with_group();
        tree.attach(group, leaf).unwrap();
        assert!(tree.detach(leaf));
        assert_eq!(tree.node(leaf).unwrap().parent(), None);
        assert!(!tree.node(group).unwrap().children().contains(&leaf));
        // Detaching a parentless node is inert.
        assert!(!tree.detach(leaf));
    }

    #[test]
    fn attach_rejects_a_leaf_target() {
        let (mut tree, group, leaf) = tree_with_group();
        let help = tree.node(group).unwrap().children()[0];
        let err = tree.attach(help, leaf).unwrap_err();
        assert!(matches!(err, SubcommandError::NotAGroup { .. }));
    }

    #[test]
    fn attach_rejects_universe_mismatch() {
        let (mut tree, group, _) = tree_with_group();
        let slash = tree.instantiate(CommandSpec::leaf("banner", Universe::Slash), "server");
        let err = tree.attach(group, slash).unwrap_err();
        assert!(matches!(err, SubcommandError::UniverseMismatch { .. }));
    }

    #[test]
    fn attach_rejects_double_attach() {
        let (mut tree, group, leaf) = tree_with_group();
        let other = tree.instantiate(CommandSpec::group("admin", Universe::Prefix), "groups2");
        tree.attach(group, leaf).unwrap();
        let err = tree.attach(other, leaf).unwrap_err();
        assert!(matches!(err, SubcommandError::AlreadyAttached { .. }));
    }

    #[test]
    fn attach_rejects_sibling_name_collision() {
        let (mut tree, group, _) = tree_with_group();
        let dup = tree.instantiate(CommandSpec::leaf("help", Universe::Prefix), "other");
        let err = tree.attach(group, dup).unwrap_err();
        assert!(matches!(err, SubcommandError::DuplicateCommand { .. }));
    }

    #[test]
    fn remove_subtree_drops_descendants() {
        let (mut tree, group, leaf) = tree_with_group();
        tree.attach(group, leaf).unwrap();
        let before = tree.len();
        tree.remove_subtree(group);
        assert_eq!(tree.len(), before - 3);
        assert!(tree.roots(Side::Prefix).is_empty());
    }

    #[test]
    fn sides_are_separate_namespaces() {
        let mut tree = CommandTree::new();
        tree.instantiate(CommandSpec::group("user", Universe::Prefix), "a");
        tree.instantiate(CommandSpec::group("user", Universe::Slash), "b");
        assert!(tree.find_qualified(Side::Prefix, "user").is_some());
        assert!(tree.find_qualified(Side::Slash, "user").is_some());
        assert_eq!(tree.groups(Side::Prefix).len(), 1);
    }
}
