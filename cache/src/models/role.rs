use addrole_models::{
    id::{GuildId, RoleId},
    role::RoleRef,
};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CachedRole {
    pub id: RoleId,
    pub guild_id: GuildId,
    pub name: String,
    pub position: i64,
}

impl CachedRole {
    pub fn to_ref(&self) -> RoleRef {
        RoleRef::new(self.id, self.name.clone(), self.position)
    }
}
