use crate::id::RoleId;

/// A role as seen by a single invocation. Never mutated by the bot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RoleRef {
    pub id: RoleId,
    pub name: String,
    /// Position in the guild's role hierarchy. Higher means more authority.
    pub position: i64,
}

impl RoleRef {
    pub fn new(id: RoleId, name: impl Into<String>, position: i64) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }

    /// Whether a principal whose highest role sits at `position` may manage this role.
    /// Equal positions are not enough.
    pub fn is_below(&self, position: i64) -> bool {
        position - self.position > 0
    }
}
