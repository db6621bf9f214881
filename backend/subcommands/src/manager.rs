//! The subcommand registry manager.
//!
//! Wraps a bot's cog add/remove entry points. On every cog load it collects
//! that cog's group-annotated declarations and then runs a resolution pass
//! over *all* pending declarations, so a group loaded late still satisfies
//! subcommands that arrived before it. On unload it detaches whatever the
//! cog had attached. An explicit report call turns whatever never resolved
//! into one aggregate startup error.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crosscog_core::{
    Bot, CogInterceptor, CommandId, CommandKind, CommandTree, Side, SubcommandError, Universe,
    UnresolvedEntry,
};

use crate::pending::{PendingRegistry, PendingSubcommand};
use crate::suggest;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct ManagerOptions {
    /// Copy the group's error handler onto attached prefix/hybrid
    /// subcommands. Slash commands inherit handlers down the group tree at
    /// dispatch time and need no copy.
    pub copy_group_error_handler: bool,
    /// Search every group in both universes instead of only the compatible
    /// side. A cross-universe name match then fails loudly as a universe
    /// mismatch instead of staying pending forever.
    pub check_group_universe: bool,
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Cloneable handle to the shared registry state. One clone is installed on
/// the bot as its cog interceptor; the application keeps another to call
/// [`report_unresolved`](Self::report_unresolved) and
/// [`uninstall`](Self::uninstall).
#[derive(Clone)]
pub struct SubcommandManager {
    state: Arc<Mutex<PendingRegistry>>,
    options: ManagerOptions,
}

impl SubcommandManager {
    /// Construct the manager and wrap the bot's cog entry points with it.
    /// Fails if the bot already has an interceptor installed.
    pub fn install(bot: &mut Bot, options: ManagerOptions) -> Result<Self, SubcommandError> {
        let manager = Self {
            state: Arc::new(Mutex::new(PendingRegistry::default())),
            options,
        };
        bot.install_interceptor(Arc::new(manager.clone()))?;
        info!(
            "[Subcommands] manager installed (copy_group_error_handler={}, check_group_universe={})",
            options.copy_group_error_handler, options.check_group_universe
        );
        Ok(manager)
    }

    pub fn options(&self) -> ManagerOptions {
        self.options
    }

    /// Number of declarations still waiting for their group.
    pub async fn unresolved_count(&self) -> usize {
        self.state.lock().await.unresolved_len()
    }

    /// Raise one aggregate error naming every declaration whose group was
    /// never found, with a closest-match suggestion per entry. Call once at
    /// startup after all cogs are loaded; an empty registry is `Ok`.
    pub async fn report_unresolved(&self, bot: &Bot) -> Result<(), SubcommandError> {
        let state = self.state.lock().await;
        let mut entries = Vec::new();
        for (cog, name) in state.unresolved_keys() {
            let Some(pending) = state.get(&cog, &name) else { continue };
            let command = bot
                .tree()
                .qualified_name(pending.command)
                .unwrap_or_else(|| name.clone());
            let mut candidates = Vec::new();
            for side in candidate_sides(pending.universe, self.options.check_group_universe) {
                for group in bot.tree().groups(*side) {
                    if let Some(qualified) = bot.tree().qualified_name(group) {
                        candidates.push(qualified);
                    }
                }
            }
            entries.push(UnresolvedEntry {
                cog,
                command,
                kind: pending.kind,
                universe: pending.universe,
                target: pending.target.clone(),
                suggestion: suggest::closest(&pending.target, &candidates),
            });
        }
        if entries.is_empty() {
            Ok(())
        } else {
            Err(SubcommandError::Unresolved(entries))
        }
    }

    /// Detach every attached declaration, restore it to the top level,
    /// clear the registry, and unwrap the bot's entry points. The bot is
    /// left exactly as if the manager had never been installed.
    pub async fn uninstall(&self, bot: &mut Bot) {
        let mut state = self.state.lock().await;
        for entry in state.drain_all() {
            if entry.attached.is_some() && bot.tree().node(entry.command).is_some() {
                bot.tree_mut().detach(entry.command);
                bot.tree_mut().root(entry.command);
            }
        }
        bot.take_interceptor();
        info!("[Subcommands] manager uninstalled");
    }
}

#[async_trait]
impl CogInterceptor for SubcommandManager {
    async fn after_cog_add(&self, bot: &mut Bot, cog: &str) -> Result<(), SubcommandError> {
        let mut state = self.state.lock().await;

        let roots: Vec<CommandId> = bot
            .cog(cog)
            .map(|c| c.roots().to_vec())
            .unwrap_or_default();
        for id in roots {
            let Some(node) = bot.tree().node(id) else { continue };
            let Some(target) = node.requested_group.clone() else { continue };
            let (name, kind, universe) = (node.name.clone(), node.kind, node.universe);
            debug!(cog = %cog, command = %name, target = %target, "collected subcommand declaration");
            state.insert(
                cog,
                &name,
                PendingSubcommand {
                    target,
                    command: id,
                    kind,
                    universe,
                    attached: None,
                },
            );
        }

        resolve_all(&mut state, bot, self.options)
    }

    async fn after_cog_remove(&self, bot: &mut Bot, cog: &str) -> Result<(), SubcommandError> {
        let mut state = self.state.lock().await;
        for entry in state.remove_cog(cog) {
            // The cog's commands die with it. remove_subtree unlinks from
            // the parent group first, so this is detach plus disposal; a
            // node already gone (its group's cog unloaded earlier) is a
            // no-op, as is a never-attached entry.
            if entry.attached.is_some() && bot.tree().node(entry.command).is_some() {
                let name = bot.tree().qualified_name(entry.command).unwrap_or_default();
                bot.tree_mut().remove_subtree(entry.command);
                debug!(cog = %cog, command = %name, "detached subcommand on unload");
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Resolution pass
// ---------------------------------------------------------------------------

/// Attempt to attach every still-unresolved declaration, across all cogs.
///
/// Sweeps to a fixpoint: attaching a pending subgroup can make another
/// pending entry's target findable (its qualified name now includes the
/// parent), so sweeping repeats while progress is made. Idempotent and
/// re-entrant: a pass over an unchanged registry touches nothing.
/// Per-declaration conflicts are isolated (one bad declaration does not
/// block its siblings) and returned together at the end.
fn resolve_all(
    state: &mut PendingRegistry,
    bot: &mut Bot,
    options: ManagerOptions,
) -> Result<(), SubcommandError> {
    let mut conflicts = Vec::new();
    let mut conflicted: HashSet<(String, String)> = HashSet::new();
    loop {
        let mut progressed = false;
        for (cog, name) in state.unresolved_keys() {
            if conflicted.contains(&(cog.clone(), name.clone())) {
                continue;
            }
            let Some(entry) = state.get(&cog, &name).cloned() else { continue };
            let command_qual = bot
                .tree()
                .qualified_name(entry.command)
                .unwrap_or_else(|| name.clone());
            match find_group(bot.tree(), &entry, &command_qual, options.check_group_universe) {
                Ok(None) => {}
                Ok(Some(group)) => match attach_entry(bot, &entry, group, options) {
                    Ok(()) => {
                        state.mark_resolved(&cog, &name, group);
                        progressed = true;
                        info!(
                            "[Subcommands] attached {:?} under {:?}",
                            bot.tree().qualified_name(entry.command).unwrap_or_default(),
                            entry.target
                        );
                    }
                    Err(e) => {
                        conflicts.push(e);
                        conflicted.insert((cog, name));
                    }
                },
                Err(e) => {
                    conflicts.push(e);
                    conflicted.insert((cog, name));
                }
            }
        }
        if !progressed {
            break;
        }
    }
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(SubcommandError::ResolutionConflicts(conflicts))
    }
}

/// Locate the declaration's target group, or `None` if it has not been
/// registered yet. A name match that is not actually a compatible group is
/// a conflict, not a miss.
fn find_group(
    tree: &CommandTree,
    entry: &PendingSubcommand,
    command_qual: &str,
    widen: bool,
) -> Result<Option<CommandId>, SubcommandError> {
    for side in candidate_sides(entry.universe, widen) {
        let Some(found) = tree.find_qualified(*side, &entry.target) else {
            continue;
        };
        let Some(node) = tree.node(found) else { continue };
        if node.kind != CommandKind::Group {
            return Err(SubcommandError::NotAGroup {
                target: entry.target.clone(),
                command: command_qual.to_string(),
            });
        }
        if !node.universe.accepts(entry.universe) {
            return Err(SubcommandError::UniverseMismatch {
                command: command_qual.to_string(),
                command_universe: entry.universe,
                command_kind: entry.kind,
                group: entry.target.clone(),
                group_universe: node.universe,
            });
        }
        return Ok(Some(found));
    }
    Ok(None)
}

/// Sides to search for the target group. The command's own side always
/// comes first, so a compatible match wins over a cross-side collision.
fn candidate_sides(universe: Universe, widen: bool) -> &'static [Side] {
    match (universe.side(), widen) {
        (Side::Prefix, false) => &[Side::Prefix],
        (Side::Slash, false) => &[Side::Slash],
        (Side::Prefix, true) => &[Side::Prefix, Side::Slash],
        (Side::Slash, true) => &[Side::Slash, Side::Prefix],
    }
}

/// Pull the command off the top level and link it under the group,
/// copying the group's error handler when configured.
fn attach_entry(
    bot: &mut Bot,
    entry: &PendingSubcommand,
    group: CommandId,
    options: ManagerOptions,
) -> Result<(), SubcommandError> {
    let tree = bot.tree_mut();
    tree.attach(group, entry.command)?;
    if options.copy_group_error_handler && entry.universe != Universe::Slash {
        let handler = tree.node(group).and_then(|g| g.error_handler.clone());
        if let Some(handler) = handler {
            if let Some(command) = tree.node_mut(entry.command) {
                command.error_handler = Some(handler);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosscog_core::{Cog, CommandSpec, ErrorCallback, Invocation};

    struct GroupErrors;

    #[async_trait]
    impl ErrorCallback for GroupErrors {
        async fn on_error(&self, _inv: &Invocation, error: &anyhow::Error) -> String {
            format!("An error occurred: {error}")
        }
    }

    fn groups_cog() -> Cog {
        Cog::builder("groups")
            .command(
                CommandSpec::group("user", Universe::Prefix)
                    .description("User command group.")
                    .on_error(Arc::new(GroupErrors))
                    .child(CommandSpec::leaf("help", Universe::Prefix)),
            )
            .build()
            .unwrap()
    }

    fn userinfo_cog() -> Cog {
        Cog::builder("userinfo")
            .command(CommandSpec::leaf("info", Universe::Prefix).subcommand_of("user"))
            .command(CommandSpec::leaf("avatar", Universe::Prefix).subcommand_of("user"))
            .command(CommandSpec::group("utils", Universe::Prefix).subcommand_of("user"))
            .build()
            .unwrap()
    }

    fn utilities_cog() -> Cog {
        Cog::builder("utilities")
            .command(CommandSpec::leaf("whenjoin", Universe::Prefix).subcommand_of("user utils"))
            .build()
            .unwrap()
    }

    fn prefix_qualified(bot: &Bot) -> Vec<String> {
        let mut names: Vec<String> = bot
            .tree()
            .walk(Side::Prefix)
            .into_iter()
            .filter_map(|id| bot.tree().qualified_name(id))
            .collect();
        names.sort();
        names
    }

    async fn install(options: ManagerOptions) -> (Bot, SubcommandManager) {
        let mut bot = Bot::new();
        let manager = SubcommandManager::install(&mut bot, options).unwrap();
        (bot, manager)
    }

    #[tokio::test]
    async fn attaches_declarations_once_their_groups_arrive() {
        let (mut bot, manager) = install(ManagerOptions::default()).await;
        bot.add_cog(groups_cog()).await.unwrap();
        bot.add_cog(userinfo_cog()).await.unwrap();
        bot.add_cog(utilities_cog()).await.unwrap();

        assert!(bot.tree().find_qualified(Side::Prefix, "user info").is_some());
        assert!(bot.tree().find_qualified(Side::Prefix, "user avatar").is_some());
        assert!(bot
            .tree()
            .find_qualified(Side::Prefix, "user utils whenjoin")
            .is_some());
        assert_eq!(manager.unresolved_count().await, 0);
        manager.report_unresolved(&bot).await.unwrap();
    }

    #[tokio::test]
    async fn load_order_does_not_matter() {
        let (mut forward, fw_manager) = install(ManagerOptions::default()).await;
        forward.add_cog(groups_cog()).await.unwrap();
        forward.add_cog(userinfo_cog()).await.unwrap();
        forward.add_cog(utilities_cog()).await.unwrap();

        let (mut reverse, rv_manager) = install(ManagerOptions::default()).await;
        reverse.add_cog(utilities_cog()).await.unwrap();
        reverse.add_cog(userinfo_cog()).await.unwrap();
        reverse.add_cog(groups_cog()).await.unwrap();

        assert_eq!(prefix_qualified(&forward), prefix_qualified(&reverse));
        fw_manager.report_unresolved(&forward).await.unwrap();
        rv_manager.report_unresolved(&reverse).await.unwrap();
    }

    #[tokio::test]
    async fn a_second_pass_with_no_new_state_changes_nothing() {
        let (mut bot, _manager) = install(ManagerOptions::default()).await;
        bot.add_cog(groups_cog()).await.unwrap();
        bot.add_cog(userinfo_cog()).await.unwrap();
        let before = prefix_qualified(&bot);

        // An unrelated load re-runs the pass over everything.
        bot.add_cog(Cog::builder("empty").build().unwrap()).await.unwrap();
        assert_eq!(prefix_qualified(&bot), before);
    }

    #[tokio::test]
    async fn report_names_the_missing_group() {
        let (mut bot, manager) = install(ManagerOptions::default()).await;
        bot.add_cog(
            Cog::builder("p")
                .command(CommandSpec::leaf("info", Universe::Prefix).subcommand_of("user"))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

        let err = manager.report_unresolved(&bot).await.unwrap_err();
        let SubcommandError::Unresolved(entries) = err else {
            panic!("expected Unresolved");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].cog, "p");
        assert_eq!(entries[0].command, "info");
        assert_eq!(entries[0].target, "user");
        // No groups exist at all, so no suggestion either.
        assert_eq!(entries[0].suggestion, None);
    }

    #[tokio::test]
    async fn report_suggests_the_closest_group() {
        let (mut bot, manager) = install(ManagerOptions::default()).await;
        bot.add_cog(groups_cog()).await.unwrap();
        bot.add_cog(utilities_cog()).await.unwrap(); // wants "user utils"

        let err = manager.report_unresolved(&bot).await.unwrap_err();
        let SubcommandError::Unresolved(entries) = err else {
            panic!("expected Unresolved");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, "user utils");
        assert_eq!(entries[0].suggestion.as_deref(), Some("user"));
    }

    #[tokio::test]
    async fn unload_detaches_and_forgets_the_cog() {
        let (mut bot, manager) = install(ManagerOptions::default()).await;
        bot.add_cog(groups_cog()).await.unwrap();
        bot.add_cog(userinfo_cog()).await.unwrap();
        bot.add_cog(utilities_cog()).await.unwrap();

        bot.remove_cog("userinfo").await.unwrap();
        assert!(bot.tree().find_qualified(Side::Prefix, "user info").is_none());
        assert!(bot.tree().find_qualified(Side::Prefix, "user utils").is_none());
        // The group itself is untouched.
        let user = bot.tree().find_qualified(Side::Prefix, "user").unwrap();
        let children: Vec<_> = bot.tree().node(user).unwrap().children().to_vec();
        assert_eq!(children.len(), 1); // just "help"

        // utilities' entry lost its group's subtree along the way; its
        // bucket still reports cleanly once the cog is gone too.
        bot.remove_cog("utilities").await.unwrap();
        assert_eq!(manager.unresolved_count().await, 0);
        manager.report_unresolved(&bot).await.unwrap();
    }

    #[tokio::test]
    async fn unloading_the_group_cog_first_is_safe() {
        let (mut bot, _manager) = install(ManagerOptions::default()).await;
        bot.add_cog(groups_cog()).await.unwrap();
        bot.add_cog(userinfo_cog()).await.unwrap();

        // The group's subtree goes away wholesale, taking the attached
        // subcommands from the other cog with it.
        bot.remove_cog("groups").await.unwrap();
        assert!(bot.tree().find_qualified(Side::Prefix, "user").is_none());
        // Unloading the subcommand cog afterwards must not trip on the
        // already-removed nodes.
        bot.remove_cog("userinfo").await.unwrap();
        assert!(bot.tree().is_empty());
    }

    #[tokio::test]
    async fn uninstall_restores_the_bot_to_its_unmanaged_shape() {
        let (mut bot, manager) = install(ManagerOptions::default()).await;
        bot.add_cog(groups_cog()).await.unwrap();
        bot.add_cog(userinfo_cog()).await.unwrap();

        manager.uninstall(&mut bot).await;
        // Attached commands are back at the top level.
        assert!(bot.tree().find_qualified(Side::Prefix, "info").is_some());
        assert!(bot.tree().find_qualified(Side::Prefix, "user info").is_none());

        // Later loads are not collected: declarations stay at top level.
        bot.add_cog(utilities_cog()).await.unwrap();
        assert!(bot.tree().find_qualified(Side::Prefix, "whenjoin").is_some());
        assert_eq!(manager.unresolved_count().await, 0);
        manager.report_unresolved(&bot).await.unwrap();
    }

    #[tokio::test]
    async fn a_leaf_with_the_target_name_is_a_conflict_not_a_miss() {
        let (mut bot, manager) = install(ManagerOptions::default()).await;
        bot.add_cog(
            Cog::builder("plain")
                .command(CommandSpec::leaf("user", Universe::Prefix))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

        let err = bot
            .add_cog(
                Cog::builder("p")
                    .command(CommandSpec::leaf("info", Universe::Prefix).subcommand_of("user"))
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap_err();
        let SubcommandError::ResolutionConflicts(conflicts) = err else {
            panic!("expected ResolutionConflicts");
        };
        assert_eq!(conflicts.len(), 1);
        assert!(matches!(conflicts[0], SubcommandError::NotAGroup { .. }));
        // The declaration stays pending and keeps being reported.
        assert_eq!(manager.unresolved_count().await, 1);
    }

    #[tokio::test]
    async fn a_conflicting_declaration_does_not_block_its_siblings() {
        let (mut bot, manager) = install(ManagerOptions::default()).await;
        bot.add_cog(
            Cog::builder("plain")
                .command(CommandSpec::leaf("admin", Universe::Prefix))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
        bot.add_cog(
            Cog::builder("mixed")
                // "bad" targets a leaf; "info" targets a real group that
                // arrives below.
                .command(CommandSpec::leaf("bad", Universe::Prefix).subcommand_of("admin"))
                .command(CommandSpec::leaf("info", Universe::Prefix).subcommand_of("user"))
                .build()
                .unwrap(),
        )
        .await
        .unwrap_err();

        let err = bot.add_cog(groups_cog()).await.unwrap_err();
        let SubcommandError::ResolutionConflicts(conflicts) = err else {
            panic!("expected ResolutionConflicts");
        };
        assert_eq!(conflicts.len(), 1);
        // The sibling attached despite the conflict.
        assert!(bot.tree().find_qualified(Side::Prefix, "user info").is_some());
        assert_eq!(manager.unresolved_count().await, 1);
    }

    #[tokio::test]
    async fn strict_universe_turns_a_cross_side_match_into_a_loud_mismatch() {
        // Permissive: a prefix declaration targeting a slash-only group
        // name simply stays pending.
        let (mut bot, manager) = install(ManagerOptions::default()).await;
        bot.add_cog(
            Cog::builder("server")
                .command(CommandSpec::group("server", Universe::Slash))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
        bot.add_cog(
            Cog::builder("p")
                .command(CommandSpec::leaf("info", Universe::Prefix).subcommand_of("server"))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(manager.unresolved_count().await, 1);

        // Strict: the same shape is a universe mismatch at pass time.
        let (mut strict, _manager) = install(ManagerOptions {
            check_group_universe: true,
            ..Default::default()
        })
        .await;
        strict
            .add_cog(
                Cog::builder("server")
                    .command(CommandSpec::group("server", Universe::Slash))
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
        let err = strict
            .add_cog(
                Cog::builder("p")
                    .command(CommandSpec::leaf("info", Universe::Prefix).subcommand_of("server"))
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap_err();
        let SubcommandError::ResolutionConflicts(conflicts) = err else {
            panic!("expected ResolutionConflicts");
        };
        assert!(matches!(
            conflicts[0],
            SubcommandError::UniverseMismatch { .. }
        ));
    }

    #[tokio::test]
    async fn strict_universe_still_prefers_the_compatible_side() {
        let (mut bot, manager) = install(ManagerOptions {
            check_group_universe: true,
            ..Default::default()
        })
        .await;
        // Same qualified name on both sides.
        bot.add_cog(
            Cog::builder("both")
                .command(CommandSpec::group("user", Universe::Prefix))
                .command(CommandSpec::group("user", Universe::Slash))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
        bot.add_cog(
            Cog::builder("p")
                .command(CommandSpec::leaf("info", Universe::Prefix).subcommand_of("user"))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
        assert!(bot.tree().find_qualified(Side::Prefix, "user info").is_some());
        assert_eq!(manager.unresolved_count().await, 0);
    }

    #[tokio::test]
    async fn error_handler_copy_follows_the_option() {
        let (mut bot, _manager) = install(ManagerOptions {
            copy_group_error_handler: true,
            ..Default::default()
        })
        .await;
        bot.add_cog(groups_cog()).await.unwrap();
        bot.add_cog(userinfo_cog()).await.unwrap();

        let user = bot.tree().find_qualified(Side::Prefix, "user").unwrap();
        let info = bot.tree().find_qualified(Side::Prefix, "user info").unwrap();
        let group_handler = bot.tree().node(user).unwrap().error_handler.clone().unwrap();
        let copied = bot.tree().node(info).unwrap().error_handler.clone().unwrap();
        assert!(Arc::ptr_eq(&group_handler, &copied));

        // Without the option the attached command keeps no handler.
        let (mut plain, _manager) = install(ManagerOptions::default()).await;
        plain.add_cog(groups_cog()).await.unwrap();
        plain.add_cog(userinfo_cog()).await.unwrap();
        let info = plain.tree().find_qualified(Side::Prefix, "user info").unwrap();
        assert!(!plain.tree().node(info).unwrap().has_error_handler());
    }

    #[tokio::test]
    async fn slash_subcommands_attach_without_handler_copy() {
        let (mut bot, manager) = install(ManagerOptions {
            copy_group_error_handler: true,
            ..Default::default()
        })
        .await;
        bot.add_cog(
            Cog::builder("slash-groups")
                .command(
                    CommandSpec::group("server", Universe::Slash)
                        .on_error(Arc::new(GroupErrors)),
                )
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
        bot.add_cog(
            Cog::builder("server-commands")
                .command(CommandSpec::leaf("banner", Universe::Slash).subcommand_of("server"))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

        let banner = bot.tree().find_qualified(Side::Slash, "server banner").unwrap();
        assert!(!bot.tree().node(banner).unwrap().has_error_handler());
        assert_eq!(manager.unresolved_count().await, 0);
    }

    #[tokio::test]
    async fn nested_group_targets_resolve_through_multiple_passes() {
        // "whenjoin" wants "user utils"; "utils" itself wants "user".
        // Loading the base group last means "user utils" only becomes
        // findable partway through the pass, once "utils" has attached.
        let (mut bot, manager) = install(ManagerOptions::default()).await;
        bot.add_cog(utilities_cog()).await.unwrap();
        bot.add_cog(userinfo_cog()).await.unwrap();
        assert_eq!(manager.unresolved_count().await, 4);

        bot.add_cog(groups_cog()).await.unwrap();
        assert!(bot
            .tree()
            .find_qualified(Side::Prefix, "user utils whenjoin")
            .is_some());
        assert_eq!(manager.unresolved_count().await, 0);
    }
}
