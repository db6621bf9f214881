//! Demo cog families. Each family splits one command group and its
//! subcommands across several cogs to exercise cross-cog registration.

pub mod hybrid;
pub mod prefix;
pub mod slash;

use async_trait::async_trait;
use crosscog_core::{CommandCallback, ErrorCallback, Invocation};

/// Canned reply body for demo commands.
pub struct StaticReply(pub &'static str);

#[async_trait]
impl CommandCallback for StaticReply {
    async fn invoke(&self, _inv: &Invocation) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

/// Group-level error handler the manager copies onto attached subcommands.
pub struct FriendlyErrors;

#[async_trait]
impl ErrorCallback for FriendlyErrors {
    async fn on_error(&self, _inv: &Invocation, error: &anyhow::Error) -> String {
        format!("An error occurred: {error}")
    }
}
