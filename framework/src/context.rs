use addrole_cache::Cache;
use addrole_models::{
    discord::channel::Message,
    id::{ChannelId, GuildId, MessageId, RoleId, UserId},
    member::user_tag,
};
use std::{ops::Deref, sync::Arc};

use crate::{
    configuration::Configuration, directory::Directory, error::RoError, respond::Responder,
};

pub struct BotContextRef {
    /// The bot's own user id, used to check its own place in the role hierarchy
    pub bot_id: UserId,
    pub config: Configuration,
    pub cache: Cache,
    pub directory: Arc<dyn Directory>,
}

#[derive(Clone)]
pub struct BotContext(Arc<BotContextRef>);

impl BotContext {
    pub fn new(
        bot_id: UserId,
        config: Configuration,
        cache: Cache,
        directory: Arc<dyn Directory>,
    ) -> Self {
        Self(Arc::new(BotContextRef {
            bot_id,
            config,
            cache,
            directory,
        }))
    }
}

impl Deref for BotContext {
    type Target = BotContextRef;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One command-shaped message, stripped down to what a command needs.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub author_id: UserId,
    pub author_tag: String,
    /// Roles of the author as carried by the message. `None` if the payload left them out.
    pub author_roles: Option<Vec<RoleId>>,
    pub content: String,
}

impl Invocation {
    /// Messages from bots and messages outside of a guild never invoke anything.
    pub fn from_message(msg: &Message) -> Option<Self> {
        if msg.author.bot {
            return None;
        }

        Some(Self {
            guild_id: msg.guild_id?,
            channel_id: msg.channel_id,
            message_id: msg.id,
            author_id: msg.author.id,
            author_tag: user_tag(&msg.author),
            author_roles: msg.member.as_ref().map(|m| m.roles.clone()),
            content: msg.content.clone(),
        })
    }
}

#[derive(Clone)]
pub struct CommandContext {
    pub bot: BotContext,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub author_id: UserId,
    pub author_tag: String,
    pub author_roles: Option<Arc<[RoleId]>>,
}

impl CommandContext {
    pub fn new(bot: BotContext, invocation: &Invocation) -> Self {
        Self {
            bot,
            guild_id: invocation.guild_id,
            channel_id: invocation.channel_id,
            message_id: invocation.message_id,
            author_id: invocation.author_id,
            author_tag: invocation.author_tag.clone(),
            author_roles: invocation.author_roles.as_deref().map(Arc::from),
        }
    }

    pub fn respond(&self) -> Responder<'_> {
        Responder::new(self)
    }

    /// Hierarchy position of the author's highest role. Uses the roles carried by the message
    /// when present and fetches the member otherwise.
    pub async fn author_position(&self) -> Result<i64, RoError> {
        match &self.author_roles {
            Some(roles) => Ok(self.bot.cache.highest_position(self.guild_id, roles)),
            None => {
                let member = self
                    .bot
                    .directory
                    .member(self.guild_id, self.author_id)
                    .await?;
                Ok(member.highest_position)
            }
        }
    }
}
