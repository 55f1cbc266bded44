use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::Service;

use crate::{
    arguments::{ArgumentError, Arguments, FromArgs},
    context::CommandContext,
    error::{CommandError, ErrorKind, Principal, RoError},
    handler::{CommandHandler, Handler},
};

type BoxedService = Box<
    dyn Service<
            (CommandContext, ServiceRequest),
            Response = (),
            Error = RoError,
            Future = Pin<Box<dyn Future<Output = Result<(), RoError>> + Send>>,
        > + Send,
>;

pub type CommandResult = Result<(), RoError>;

pub enum ServiceRequest {
    Message(Arguments),
}

pub struct Command {
    pub names: &'static [&'static str],
    pub(crate) service: BoxedService,
}

impl Command {
    pub fn builder() -> CommandBuilder {
        CommandBuilder::default()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

impl Service<(CommandContext, ServiceRequest)> for Command {
    type Response = ();
    type Error = RoError;
    type Future = Pin<Box<dyn Future<Output = Result<(), RoError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, req: (CommandContext, ServiceRequest)) -> Self::Future {
        let name = self.names.first().copied().unwrap_or_default();
        let ctx = req.0.clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(()) => Ok(()),
                Err(err) => {
                    handle_error(&err, &ctx, name).await;
                    Err(err)
                }
            }
        })
    }
}

impl Debug for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Command")
            .field("name", &self.names)
            .finish()
    }
}

/// The single reply a failed invocation gets
pub fn error_message(err: &RoError, ctx: &CommandContext, name: &str) -> String {
    let config = &ctx.bot.config;
    match (err.kind(), err.command_error()) {
        (ErrorKind::Command, Some(err)) => match err {
            CommandError::Argument(ArgumentError::MissingArgument { .. }) => format!(
                "Usage: {}{} <roleId> <comma-separated {}>",
                config.default_prefix,
                name,
                config.strategy.noun()
            ),
            CommandError::NoTargets(strategy) => {
                format!("❌ No valid {} provided.", strategy.noun())
            }
            CommandError::UnknownRole(role) => format!("❌ Role with ID {} not found.", role),
            CommandError::Hierarchy {
                principal: Principal::Actor,
                role,
            } => format!(
                "❌ You cannot assign the role {} because it is higher or equal to your highest role.",
                role
            ),
            CommandError::Hierarchy {
                principal: Principal::Bot,
                role,
            } => format!(
                "❌ I cannot assign the role {} because it is higher or equal to my highest role.",
                role
            ),
            CommandError::RosterFetch => {
                "❌ Failed to fetch the server members. Please try again.".into()
            }
            CommandError::Timeout => "❌ The request to Discord timed out. Please try again.".into(),
        },
        _ => "There was an issue in executing. Please try again.".into(),
    }
}

async fn handle_error(err: &RoError, ctx: &CommandContext, name: &str) {
    match err.command_error() {
        Some(CommandError::Argument(_)) => {
            tracing::info!(guild = ?ctx.guild_id, "[ERROR] Invalid command format.");
        }
        Some(cmd_err) => {
            tracing::info!(guild = ?ctx.guild_id, "[ERROR] {}", cmd_err);
        }
        None => {
            tracing::error!(guild = ?ctx.guild_id, command = name, err = ?err, "[ERROR] Command failed");
        }
    }

    let content = error_message(err, ctx, name);
    match ctx.respond().content(&content) {
        Ok(r) => {
            if let Err(err) = r.exec().await {
                tracing::error!(err = ?err, "[ERROR] Failed to deliver the error reply");
            }
        }
        Err(err) => tracing::error!("handle_error: {}", err),
    }
}

#[derive(Default)]
pub struct CommandBuilder {
    names: &'static [&'static str],
}

impl CommandBuilder {
    #[must_use]
    pub fn names(mut self, names: &'static [&'static str]) -> Self {
        self.names = names;
        self
    }

    pub fn service(self, service: BoxedService) -> Command {
        Command {
            names: self.names,
            service,
        }
    }

    pub fn handler<F, R, K>(self, handler: F) -> Command
    where
        F: Handler<K, R> + Send + 'static,
        R: Future<Output = CommandResult> + Send + 'static,
        K: FromArgs + Send + 'static,
    {
        self.service(Box::new(CommandHandler::new(handler)))
    }
}
