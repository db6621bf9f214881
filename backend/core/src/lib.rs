pub mod bot;
pub mod command;
pub mod error;
pub mod tree;

pub use bot::{Bot, Cog, CogBuilder, CogInterceptor, LoadedCog};
pub use command::{
    CommandCallback, CommandKind, CommandSpec, ErrorCallback, Invocation, Side, Universe,
};
pub use error::{SubcommandError, UnresolvedEntry};
pub use tree::{CommandId, CommandNode, CommandTree};
