use addrole_framework::prelude::*;
use addrole_models::{id::GuildId, role::RoleRef};

use super::{report::Outcomes, resolve::Resolution};

/// One add-role attempt per resolved member. A failed attempt is recorded and the batch moves on.
pub async fn grant_all(
    directory: &dyn Directory,
    guild_id: GuildId,
    role: &RoleRef,
    resolutions: Vec<Resolution>,
) -> Outcomes {
    let mut outcomes = Outcomes::default();
    for resolution in resolutions {
        let member = match resolution {
            Resolution::Resolved(member) => member,
            Resolution::Unresolved(key) => {
                outcomes.failed.push(key);
                continue;
            }
        };

        match directory.add_role(guild_id, member.id, role.id).await {
            Ok(()) => {
                tracing::info!(guild = ?guild_id, "[SUCCESS] Added {} to {}", role.name, member.tag);
                outcomes.success.push(member.tag);
            }
            Err(err) => {
                tracing::error!(guild = ?guild_id, err = ?err, "[ERROR] Failed to add {} to {}", role.name, member.tag);
                outcomes.failed.push(member.tag);
            }
        }
    }
    outcomes
}
