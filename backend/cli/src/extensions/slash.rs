//! Slash-command demo: the "server" group with an inline "settings"
//! subgroup, and subcommands for both declared in separate cogs.

use std::sync::Arc;

use crosscog_core::{Cog, CommandSpec, SubcommandError, Universe};

use super::StaticReply;

pub fn groups() -> Result<Cog, SubcommandError> {
    Cog::builder("slash-groups")
        .command(
            CommandSpec::group("server", Universe::Slash)
                .description("Server related commands.")
                .child(
                    CommandSpec::leaf("info", Universe::Slash)
                        .description("Show this server's name.")
                        .callback(Arc::new(StaticReply("This server's name is ..."))),
                )
                .child(
                    CommandSpec::group("settings", Universe::Slash)
                        .description("Server settings commands."),
                ),
        )
        .build()
}

pub fn server_commands() -> Result<Cog, SubcommandError> {
    Cog::builder("server-commands")
        .command(
            CommandSpec::leaf("banner", Universe::Slash)
                .description("Show the server banner.")
                .callback(Arc::new(StaticReply("This server's banner is ...")))
                .subcommand_of("server"),
        )
        .command(
            CommandSpec::leaf("icon", Universe::Slash)
                .description("Show the server icon.")
                .callback(Arc::new(StaticReply("This server's icon is ...")))
                .subcommand_of("server"),
        )
        .build()
}

pub fn settings_commands() -> Result<Cog, SubcommandError> {
    Cog::builder("server-settings")
        .command(
            CommandSpec::leaf("edit-name", Universe::Slash)
                .description("Edit the server's name.")
                .callback(Arc::new(StaticReply("This server's name has been changed.")))
                .subcommand_of("server settings"),
        )
        .command(
            CommandSpec::leaf("edit-description", Universe::Slash)
                .description("Edit the server's description.")
                .callback(Arc::new(StaticReply(
                    "This server's description has been changed.",
                )))
                .subcommand_of("server settings"),
        )
        .build()
}
