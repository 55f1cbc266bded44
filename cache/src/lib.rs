#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::implicit_hasher,
    clippy::missing_panics_doc
)]

mod event;
mod models;

use addrole_models::{
    discord::guild::Role,
    id::{GuildId, RoleId},
};
use dashmap::{mapref::entry::Entry, DashMap};
use std::{collections::HashSet, hash::Hash, sync::Arc};

pub use event::UpdateCache;
pub use models::role::CachedRole;

/// Add an element to the structure that maps the server ids to the set of the resource they hold
fn upsert_guild_item<K: Eq + Hash, V: Eq + Hash>(map: &DashMap<K, HashSet<V>>, k: K, v: V) {
    match map.entry(k) {
        Entry::Occupied(e) if e.get().contains(&v) => {}
        Entry::Occupied(mut e) => {
            e.get_mut().insert(v);
        }
        Entry::Vacant(e) => {
            let mut set = HashSet::new();
            set.insert(v);
            e.insert(set);
        }
    }
}

/// Add or modify an element that maps the resource ids to their respective structures
fn upsert_item<K: Eq + Hash, V: PartialEq>(map: &DashMap<K, Arc<V>>, k: K, v: V) -> Arc<V> {
    match map.entry(k) {
        Entry::Occupied(e) if **e.get() == v => Arc::clone(e.get()),
        Entry::Occupied(mut e) => {
            let v = Arc::new(v);
            e.insert(Arc::clone(&v));
            v
        }
        Entry::Vacant(e) => {
            let v = Arc::new(v);
            e.insert(Arc::clone(&v));
            v
        }
    }
}

#[derive(Default)]
pub struct CacheRef {
    roles: DashMap<RoleId, Arc<CachedRole>>,
    guild_roles: DashMap<GuildId, HashSet<RoleId>>,
}

/// An wrapper around the actual structure that hold all the cache fields allowing this to be sent across multiple threads
#[derive(Clone, Default)]
pub struct Cache(Arc<CacheRef>);

#[derive(Debug, Clone)]
pub struct CacheError;

impl Cache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an immutable reference of a certain role
    pub fn role(&self, role_id: RoleId) -> Option<Arc<CachedRole>> {
        self.0.roles.get(&role_id).map(|r| Arc::clone(r.value()))
    }

    /// Get a role only if it belongs to the given guild
    pub fn guild_role(&self, guild_id: GuildId, role_id: RoleId) -> Option<Arc<CachedRole>> {
        self.role(role_id).filter(|r| r.guild_id == guild_id)
    }

    /// Position of the highest of `held` roles in the guild. Members without any cached role
    /// sit at the `@everyone` position, which is 0 unless the cache says otherwise.
    pub fn highest_position(&self, guild_id: GuildId, held: &[RoleId]) -> i64 {
        let everyone = self
            .guild_role(guild_id, guild_id.cast())
            .map_or(0, |r| r.position);
        held.iter()
            .filter_map(|id| self.guild_role(guild_id, *id))
            .map(|r| r.position)
            .fold(everyone, i64::max)
    }

    /// Update a resource inside a cache
    pub fn update<T: UpdateCache>(&self, value: &T) -> Result<(), CacheError> {
        value.update(self)
    }

    fn cache_roles(&self, guild: GuildId, roles: impl IntoIterator<Item = Role>) -> HashSet<RoleId> {
        let mut r = HashSet::new();
        for role in roles {
            let id = role.id;
            self.cache_role(guild, role);
            r.insert(id);
        }
        r
    }

    fn cache_role(&self, guild: GuildId, role: Role) -> Arc<CachedRole> {
        self.insert_role(CachedRole {
            id: role.id,
            guild_id: guild,
            name: role.name,
            position: role.position,
        })
    }

    /// Insert a role that did not come from a gateway payload
    pub fn insert_role(&self, role: CachedRole) -> Arc<CachedRole> {
        upsert_guild_item(&self.0.guild_roles, role.guild_id, role.id);
        upsert_item(&self.0.roles, role.id, role)
    }

    fn cache_guild_roles(&self, guild_id: GuildId, roles: impl IntoIterator<Item = Role>) {
        self.delete_guild(guild_id);
        let ids = self.cache_roles(guild_id, roles);
        self.0.guild_roles.insert(guild_id, ids);
    }

    fn delete_guild(&self, guild_id: GuildId) {
        if let Some((_, ids)) = self.0.guild_roles.remove(&guild_id) {
            for id in ids {
                self.0.roles.remove(&id);
            }
        }
    }

    fn delete_role(&self, role_id: RoleId) -> Option<Arc<CachedRole>> {
        let role = self.0.roles.remove(&role_id).map(|(_, r)| r)?;
        if let Some(mut roles) = self.0.guild_roles.get_mut(&role.guild_id) {
            roles.remove(&role_id);
        }
        Some(role)
    }
}
