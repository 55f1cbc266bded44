use addrole_framework::prelude::*;
use addrole_models::{id::GuildId, member::MemberCandidate, target::TargetStrategy};

/// What a single target key turned into.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Resolution {
    Resolved(MemberCandidate),
    /// The key as it was written (lower-cased for usernames)
    Unresolved(String),
}

/// Resolves every key in order. Only a failed roster fetch fails the whole batch, any other
/// problem leaves that single key unresolved.
pub async fn resolve(
    strategy: TargetStrategy,
    directory: &dyn Directory,
    guild_id: GuildId,
    targets: &[String],
) -> Result<Vec<Resolution>, RoError> {
    match strategy {
        TargetStrategy::ByIdentifier => Ok(by_identifier(directory, guild_id, targets).await),
        TargetStrategy::ByDisplayName => by_display_name(directory, guild_id, targets).await,
    }
}

async fn by_identifier(
    directory: &dyn Directory,
    guild_id: GuildId,
    targets: &[String],
) -> Vec<Resolution> {
    let mut resolutions = Vec::with_capacity(targets.len());
    for target in targets {
        let Some(user_id) = parse_username(target) else {
            tracing::info!(guild = ?guild_id, "[ERROR] {} is not a user ID", target);
            resolutions.push(Resolution::Unresolved(target.clone()));
            continue;
        };

        match directory.member(guild_id, user_id).await {
            Ok(member) => resolutions.push(Resolution::Resolved(member)),
            Err(err) => {
                tracing::error!(guild = ?guild_id, err = ?err, "[ERROR] Failed to fetch member {}", target);
                resolutions.push(Resolution::Unresolved(target.clone()));
            }
        }
    }
    resolutions
}

async fn by_display_name(
    directory: &dyn Directory,
    guild_id: GuildId,
    targets: &[String],
) -> Result<Vec<Resolution>, RoError> {
    let roster = match directory.roster(guild_id).await {
        Ok(roster) => roster,
        Err(err) => {
            tracing::error!(guild = ?guild_id, err = ?err, "[ERROR] Failed to fetch members");
            return Err(CommandError::RosterFetch.into());
        }
    };
    tracing::info!(guild = ?guild_id, "[FETCH] Fetched {} members", roster.len());

    let tags = roster
        .iter()
        .map(|m| m.tag.to_lowercase())
        .collect::<Vec<_>>();

    let resolutions = targets
        .iter()
        .map(|target| {
            match roster.iter().zip(&tags).find(|(_, tag)| *tag == target) {
                Some((member, _)) => {
                    tracing::info!(guild = ?guild_id, "[FOUND] {} matched {}", target, member.tag);
                    Resolution::Resolved(member.clone())
                }
                None => {
                    tracing::info!(guild = ?guild_id, "[ERROR] No member named {}", target);
                    Resolution::Unresolved(target.clone())
                }
            }
        })
        .collect();
    Ok(resolutions)
}
