use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// How the comma separated target list of a command is turned into members.
/// Picked once per deployment.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum TargetStrategy {
    /// Each target is a user id (or mention), fetched one by one.
    #[default]
    ByIdentifier,
    /// Each target is a user tag, matched case-insensitively against the full roster.
    ByDisplayName,
}

impl TargetStrategy {
    /// Splits the raw target list on commas, trimming each entry and dropping empty ones.
    /// Order and duplicates are kept. Names are lower-cased.
    pub fn normalize(self, raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| match self {
                TargetStrategy::ByIdentifier => t.to_owned(),
                TargetStrategy::ByDisplayName => t.to_lowercase(),
            })
            .collect()
    }

    pub fn noun(self) -> &'static str {
        match self {
            TargetStrategy::ByIdentifier => "user IDs",
            TargetStrategy::ByDisplayName => "usernames",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParseStrategyError(pub String);

impl Display for ParseStrategyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "unknown target strategy `{}`, expected one of `id` `name`",
            self.0
        )
    }
}

impl StdError for ParseStrategyError {}

impl FromStr for TargetStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "ids" => Ok(TargetStrategy::ByIdentifier),
            "name" | "names" => Ok(TargetStrategy::ByDisplayName),
            _ => Err(ParseStrategyError(s.to_owned())),
        }
    }
}
