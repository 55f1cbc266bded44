use addrole_models::id::MessageId;
use twilight_validate::message::{content as _content, MessageValidationError};

use crate::{context::CommandContext, error::RoError};

pub struct Responder<'a> {
    ctx: &'a CommandContext,
    content: Option<&'a str>,
    reply_to: MessageId,
}

impl<'a> Responder<'a> {
    pub fn new(ctx: &'a CommandContext) -> Self {
        Self {
            ctx,
            content: None,
            reply_to: ctx.message_id,
        }
    }

    pub fn content(mut self, content: &'a str) -> Result<Self, MessageValidationError> {
        _content(content)?;

        self.content = Some(content);
        Ok(self)
    }

    /// Anchor the message to something other than the invoking command
    #[must_use]
    pub fn reply_to(mut self, message_id: MessageId) -> Self {
        self.reply_to = message_id;
        self
    }

    pub async fn exec(self) -> Result<MessageId, RoError> {
        self.ctx
            .bot
            .directory
            .reply(
                self.ctx.channel_id,
                self.reply_to,
                self.content.unwrap_or_default(),
            )
            .await
    }
}

/// Lazily splits `content` into contiguous pieces of at most `limit` characters.
pub fn chunk_message(content: &str, limit: usize) -> Chunks<'_> {
    Chunks {
        rest: content,
        limit: limit.max(1),
    }
}

#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    limit: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let end = self
            .rest
            .char_indices()
            .nth(self.limit)
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
