//! Prefix-command demo: the "user" group lives in one cog, its subcommands
//! in two others, including a nested "user utils" subgroup.

use std::sync::Arc;

use crosscog_core::{Cog, CommandSpec, SubcommandError, Universe};

use super::{FriendlyErrors, StaticReply};

/// Declares the `user` group itself, with one inline subcommand.
pub fn groups() -> Result<Cog, SubcommandError> {
    Cog::builder("groups")
        .command(
            CommandSpec::group("user", Universe::Prefix)
                .description("User related commands.")
                .callback(Arc::new(StaticReply(
                    "User command group. See `user help` for more information.",
                )))
                .on_error(Arc::new(FriendlyErrors))
                .child(
                    CommandSpec::leaf("help", Universe::Prefix)
                        .description("List user commands.")
                        .callback(Arc::new(StaticReply("User help command."))),
                ),
        )
        .build()
}

/// Subcommands of `user`, declared in a different cog, plus the `utils`
/// subgroup that further subcommands hang off.
pub fn user_info() -> Result<Cog, SubcommandError> {
    Cog::builder("userinfo")
        .command(
            CommandSpec::leaf("info", Universe::Prefix)
                .description("Show a user's profile.")
                .callback(Arc::new(StaticReply("## User Info:")))
                .subcommand_of("user"),
        )
        .command(
            CommandSpec::leaf("avatar", Universe::Prefix)
                .description("Show a user's avatar.")
                .callback(Arc::new(StaticReply("## User Avatar:")))
                .subcommand_of("user"),
        )
        .command(
            CommandSpec::group("utils", Universe::Prefix)
                .description("User utility commands.")
                .callback(Arc::new(StaticReply("## User Utility Commands:")))
                .subcommand_of("user"),
        )
        .build()
}

/// A subcommand targeting the nested `user utils` subgroup.
pub fn utilities() -> Result<Cog, SubcommandError> {
    Cog::builder("utilities")
        .command(
            CommandSpec::leaf("whenjoin", Universe::Prefix)
                .description("Show when a user joined.")
                .callback(Arc::new(StaticReply("## User Join Date:")))
                .subcommand_of("user utils"),
        )
        .build()
}
