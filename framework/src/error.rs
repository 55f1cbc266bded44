use addrole_models::target::TargetStrategy;
use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};
use twilight_http::{response::DeserializeBodyError, Error as DiscordHttpError};
use twilight_validate::{message::MessageValidationError, request::ValidationError};

use crate::arguments::ArgumentError;

#[derive(Debug)]
pub struct RoError {
    pub(super) source: Option<Box<dyn StdError + Send + Sync>>,
    pub(super) kind: ErrorKind,
}

impl RoError {
    /// A platform fault that did not come out of the http client, e.g. from a stand-in directory
    pub fn discord(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: Some(source.into()),
            kind: ErrorKind::Discord,
        }
    }

    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The user-facing failure behind this error, if there is one
    pub fn command_error(&self) -> Option<&CommandError> {
        self.source
            .as_ref()
            .and_then(|source| source.downcast_ref::<CommandError>())
    }
}

impl Display for RoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (&self.kind, &self.source) {
            (ErrorKind::Discord, Some(source)) => write!(f, "Discord Http Error - {}", source),
            (ErrorKind::Discord, None) => f.write_str("Discord Http Error"),
            (ErrorKind::Command, Some(source)) => write!(f, "Command Error - {}", source),
            (ErrorKind::Command, None) => f.write_str("Command Error"),
        }
    }
}

impl StdError for RoError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn StdError + 'static))
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    Discord,
    Command,
}

/// Which side of the role hierarchy check failed
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Principal {
    Actor,
    Bot,
}

#[derive(Debug)]
pub enum CommandError {
    Argument(ArgumentError),
    NoTargets(TargetStrategy),
    UnknownRole(String),
    Hierarchy { principal: Principal, role: String },
    RosterFetch,
    Timeout,
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CommandError::Argument(err) => write!(f, "{}", err),
            CommandError::NoTargets(strategy) => write!(f, "No valid {} provided", strategy.noun()),
            CommandError::UnknownRole(role) => write!(f, "Role with ID {} not found", role),
            CommandError::Hierarchy {
                principal: Principal::Actor,
                role,
            } => write!(f, "The invoking member does not outrank {}", role),
            CommandError::Hierarchy {
                principal: Principal::Bot,
                role,
            } => write!(f, "The bot does not outrank {}", role),
            CommandError::RosterFetch => f.write_str("Failed to fetch the server members"),
            CommandError::Timeout => f.write_str("Request to Discord timed out"),
        }
    }
}

impl StdError for CommandError {}

impl From<DiscordHttpError> for RoError {
    fn from(err: DiscordHttpError) -> Self {
        Self {
            source: Some(Box::new(err)),
            kind: ErrorKind::Discord,
        }
    }
}

impl From<DeserializeBodyError> for RoError {
    fn from(err: DeserializeBodyError) -> Self {
        Self {
            source: Some(Box::new(err)),
            kind: ErrorKind::Discord,
        }
    }
}

impl From<MessageValidationError> for RoError {
    fn from(err: MessageValidationError) -> Self {
        Self {
            source: Some(Box::new(err)),
            kind: ErrorKind::Discord,
        }
    }
}

impl From<ValidationError> for RoError {
    fn from(err: ValidationError) -> Self {
        Self {
            source: Some(Box::new(err)),
            kind: ErrorKind::Discord,
        }
    }
}

impl From<ArgumentError> for RoError {
    fn from(err: ArgumentError) -> Self {
        Self {
            source: Some(Box::new(CommandError::Argument(err))),
            kind: ErrorKind::Command,
        }
    }
}

impl From<CommandError> for RoError {
    fn from(err: CommandError) -> Self {
        Self {
            source: Some(Box::new(err)),
            kind: ErrorKind::Command,
        }
    }
}
