//! Hybrid-command demo: the "channel" group family, split across three
//! cogs the same way as the prefix family.

use std::sync::Arc;

use crosscog_core::{Cog, CommandSpec, SubcommandError, Universe};

use super::{FriendlyErrors, StaticReply};

pub fn groups() -> Result<Cog, SubcommandError> {
    Cog::builder("hybrid-groups")
        .command(
            CommandSpec::group("channel", Universe::Hybrid)
                .description("Channel related commands.")
                .callback(Arc::new(StaticReply(
                    "Channel command group. Use `channel help` for more information.",
                )))
                .on_error(Arc::new(FriendlyErrors))
                .child(
                    CommandSpec::leaf("help", Universe::Hybrid)
                        .description("Show channel help commands.")
                        .callback(Arc::new(StaticReply("Channel help command."))),
                ),
        )
        .build()
}

pub fn channel_commands() -> Result<Cog, SubcommandError> {
    Cog::builder("channel-commands")
        .command(
            CommandSpec::leaf("info", Universe::Hybrid)
                .description("Show channel information.")
                .callback(Arc::new(StaticReply("## Channel Info:")))
                .subcommand_of("channel"),
        )
        .command(
            CommandSpec::leaf("topic", Universe::Hybrid)
                .description("Get a channel's topic.")
                .callback(Arc::new(StaticReply("## Channel Topic:")))
                .subcommand_of("channel"),
        )
        .build()
}

pub fn channel_utils() -> Result<Cog, SubcommandError> {
    Cog::builder("channel-utils")
        .command(
            CommandSpec::group("utils", Universe::Hybrid)
                .description("Channel utility commands.")
                .callback(Arc::new(StaticReply("## Channel Utility Commands:")))
                .subcommand_of("channel"),
        )
        .command(
            CommandSpec::leaf("membercount", Universe::Hybrid)
                .description("Count members who can see a channel.")
                .callback(Arc::new(StaticReply("## Channel Member Count:")))
                .subcommand_of("channel utils"),
        )
        .command(
            CommandSpec::leaf("permissions", Universe::Hybrid)
                .description("Check your permissions for a channel.")
                .callback(Arc::new(StaticReply("## Channel Permissions:")))
                .subcommand_of("channel utils"),
        )
        .build()
}
