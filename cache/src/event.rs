use addrole_models::discord::gateway::{
    event::Event,
    payload::incoming::{
        GuildCreate, GuildDelete, RoleCreate, RoleDelete, RoleUpdate, UnavailableGuild,
    },
};
use tracing::{debug, info};

use super::{Cache, CacheError};

pub trait UpdateCache {
    fn update(&self, cache: &Cache) -> Result<(), CacheError>;
}

impl UpdateCache for Event {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        match self {
            Event::GuildCreate(v) => c.update::<GuildCreate>(v),
            Event::GuildDelete(v) => c.update::<GuildDelete>(v),
            Event::RoleCreate(v) => c.update::<RoleCreate>(v),
            Event::RoleDelete(v) => c.update::<RoleDelete>(v),
            Event::RoleUpdate(v) => c.update::<RoleUpdate>(v),
            Event::UnavailableGuild(v) => c.update::<UnavailableGuild>(v),
            _ => Ok(()),
        }
    }
}

impl UpdateCache for GuildCreate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        info!(id = ?self.id, roles = self.roles.len(), "Received event for Guild Create for");
        c.cache_guild_roles(self.id, self.roles.clone());
        Ok(())
    }
}

impl UpdateCache for GuildDelete {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        debug!(id = ?self.id, unavailable = self.unavailable, "Received event for Guild Delete for");
        c.delete_guild(self.id);
        Ok(())
    }
}

impl UpdateCache for RoleCreate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        c.cache_role(self.guild_id, self.role.clone());
        Ok(())
    }
}

impl UpdateCache for RoleDelete {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        debug!(guild = ?self.guild_id, role = ?self.role_id, "Received event for Role Delete for");
        c.delete_role(self.role_id);
        Ok(())
    }
}

impl UpdateCache for RoleUpdate {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        debug!(guild = ?self.guild_id, role = ?self.role.id, "Received event for Role Update for");
        c.cache_role(self.guild_id, self.role.clone());
        Ok(())
    }
}

impl UpdateCache for UnavailableGuild {
    fn update(&self, c: &Cache) -> Result<(), CacheError> {
        debug!(id = ?self.id, "Received event for Unavailable Guild for");
        c.delete_guild(self.id);
        Ok(())
    }
}
