use addrole_cache::Cache;
use addrole_models::{
    discord::guild::Member,
    id::{ChannelId, GuildId, MessageId, RoleId, UserId},
    member::MemberCandidate,
    role::RoleRef,
};
use async_trait::async_trait;
use std::{future::Future, sync::Arc, time::Duration};
use tokio::time::timeout;
use twilight_http::Client as Http;

use crate::error::{CommandError, RoError};

/// Largest page the member listing endpoint hands out
const ROSTER_PAGE: u16 = 1000;

/// Everything a command may ask of the chat platform.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Looks a role up in the guild's role cache
    async fn role(&self, guild_id: GuildId, role_id: RoleId) -> Result<Option<RoleRef>, RoError>;

    async fn member(&self, guild_id: GuildId, user_id: UserId)
        -> Result<MemberCandidate, RoError>;

    /// Every member of the guild, fetched fresh
    async fn roster(&self, guild_id: GuildId) -> Result<Vec<MemberCandidate>, RoError>;

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), RoError>;

    /// Sends `content` to the channel as a reply to `reply_to`
    async fn reply(
        &self,
        channel_id: ChannelId,
        reply_to: MessageId,
        content: &str,
    ) -> Result<MessageId, RoError>;
}

pub struct TwilightDirectory {
    http: Arc<Http>,
    cache: Cache,
    call_timeout: Duration,
}

impl TwilightDirectory {
    pub fn new(http: Arc<Http>, cache: Cache, call_timeout: Duration) -> Self {
        Self {
            http,
            cache,
            call_timeout,
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, RoError>
    where
        F: Future<Output = Result<T, RoError>>,
    {
        match timeout(self.call_timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(CommandError::Timeout.into()),
        }
    }

    fn candidate(&self, guild_id: GuildId, member: &Member) -> MemberCandidate {
        let highest = self.cache.highest_position(guild_id, &member.roles);
        MemberCandidate::from_member(member, highest)
    }
}

#[async_trait]
impl Directory for TwilightDirectory {
    async fn role(&self, guild_id: GuildId, role_id: RoleId) -> Result<Option<RoleRef>, RoError> {
        Ok(self.cache.guild_role(guild_id, role_id).map(|r| r.to_ref()))
    }

    async fn member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<MemberCandidate, RoError> {
        self.bounded(async {
            let member = self
                .http
                .guild_member(guild_id, user_id)
                .await?
                .model()
                .await?;
            Ok(self.candidate(guild_id, &member))
        })
        .await
    }

    async fn roster(&self, guild_id: GuildId) -> Result<Vec<MemberCandidate>, RoError> {
        self.bounded(async {
            let mut roster = Vec::new();
            let mut after = None;
            loop {
                let mut req = self.http.guild_members(guild_id).limit(ROSTER_PAGE)?;
                if let Some(after) = after {
                    req = req.after(after);
                }
                let page = req.await?.models().await?;
                let page_len = page.len();
                after = page.last().map(|m| m.user.id);
                roster.extend(page.iter().map(|m| self.candidate(guild_id, m)));

                tracing::trace!(guild = ?guild_id, page = page_len, total = roster.len(), "Fetched roster page");
                if page_len < usize::from(ROSTER_PAGE) {
                    break;
                }
            }
            Ok(roster)
        })
        .await
    }

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), RoError> {
        self.bounded(async {
            self.http
                .add_guild_member_role(guild_id, user_id, role_id)
                .await?;
            Ok(())
        })
        .await
    }

    async fn reply(
        &self,
        channel_id: ChannelId,
        reply_to: MessageId,
        content: &str,
    ) -> Result<MessageId, RoError> {
        self.bounded(async {
            let message = self
                .http
                .create_message(channel_id)
                .reply(reply_to)
                .content(content)?
                .await?
                .model()
                .await?;
            Ok(message.id)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    fn directory() -> TwilightDirectory {
        TwilightDirectory::new(
            Arc::new(Http::new(String::new())),
            Cache::new(),
            Duration::from_secs(30),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_call_times_out() {
        let err = directory()
            .bounded(pending::<Result<(), RoError>>())
            .await
            .unwrap_err();
        assert!(matches!(err.command_error(), Some(CommandError::Timeout)));
    }

    #[tokio::test(start_paused = true)]
    async fn call_within_the_bound_passes_through() {
        let directory = directory();
        let res = directory
            .bounded(async {
                tokio::time::sleep(Duration::from_secs(29)).await;
                Ok(7)
            })
            .await;
        assert_eq!(res.unwrap(), 7);

        let err = directory
            .bounded(async { Err::<(), _>(RoError::discord("Unknown Member")) })
            .await
            .unwrap_err();
        assert!(err.command_error().is_none());
    }
}
