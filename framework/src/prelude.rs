pub use crate::arguments::*;
pub use crate::command::{Command, CommandResult};
pub use crate::configuration::{Configuration, MESSAGE_LIMIT};
pub use crate::context::{BotContext, CommandContext, Invocation};
pub use crate::directory::Directory;
pub use crate::error::*;
pub use crate::respond::chunk_message;
pub use crate::utils::*;

pub use tower::{Service, ServiceExt};
