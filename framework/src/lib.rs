#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::non_ascii_literal
)]

pub mod arguments;
pub mod command;
pub mod configuration;
pub mod context;
pub mod directory;
pub mod error;
pub mod handler;
mod parser;
pub mod prelude;
pub mod respond;
pub mod utils;

use addrole_models::discord::gateway::event::Event;
use futures_util::future::{ready, Either, Ready};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::Service;

use arguments::Arguments;
use command::{Command, ServiceRequest};
use context::{BotContext, CommandContext, Invocation};
use error::RoError;

pub use command::CommandResult;

type FrameworkFuture = Either<
    Ready<Result<(), RoError>>,
    Pin<Box<dyn Future<Output = Result<(), RoError>> + Send>>,
>;

pub struct Framework {
    bot: BotContext,
    cmds: Vec<Command>,
}

impl Framework {
    pub fn new(bot: BotContext) -> Self {
        Self {
            bot,
            cmds: Vec::new(),
        }
    }

    #[must_use]
    pub fn configure<F>(mut self, func: F) -> Self
    where
        F: FnOnce(&mut Vec<Command>),
    {
        func(&mut self.cmds);
        self
    }

    /// Routes one invocation to the command its text names, if any.
    pub fn dispatch(&mut self, invocation: Invocation) -> FrameworkFuture {
        let Some((name, rest)) =
            parser::parse_command(&invocation.content, &self.bot.config.default_prefix)
        else {
            return Either::Left(ready(Ok(())));
        };

        let Some(command) = self.cmds.iter_mut().find(|c| c.matches(name)) else {
            return Either::Left(ready(Ok(())));
        };

        tracing::info!(
            guild = ?invocation.guild_id,
            author = ?invocation.author_id,
            "[COMMAND] Received: {} from {}",
            invocation.content,
            invocation.author_tag
        );

        let args = Arguments::new(rest);
        let ctx = CommandContext::new(self.bot.clone(), &invocation);
        Either::Right(command.call((ctx, ServiceRequest::Message(args))))
    }
}

impl Service<&Event> for Framework {
    type Response = ();
    type Error = RoError;
    type Future = FrameworkFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: &Event) -> Self::Future {
        if let Event::MessageCreate(msg) = req {
            if let Some(invocation) = Invocation::from_message(msg) {
                return self.dispatch(invocation);
            }
        }
        Either::Left(ready(Ok(())))
    }
}
