use addrole_cache::{Cache, CachedRole};
use addrole_framework::{prelude::*, Framework};
use addrole_models::{
    id::{ChannelId, GuildId, MessageId, RoleId, UserId},
    member::MemberCandidate,
    role::RoleRef,
    target::TargetStrategy,
};
use async_trait::async_trait;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tokio::sync::Mutex;

use crate::commands::addrole_config;

const GUILD: u64 = 1;
const CHANNEL: u64 = 2;
const MESSAGE: u64 = 3;
const AUTHOR: u64 = 10;
const BOT: u64 = 99;
const ROLE: u64 = 555;
const FIRST_REPLY: u64 = 1000;

#[derive(Default)]
struct Calls {
    role_lookups: usize,
    member_fetches: Vec<UserId>,
    roster_fetches: usize,
    grants: Vec<(UserId, RoleId)>,
    replies: Vec<(MessageId, String)>,
}

#[derive(Default)]
struct FakeDirectory {
    roles: HashMap<RoleId, RoleRef>,
    members: HashMap<UserId, MemberCandidate>,
    roster: Vec<MemberCandidate>,
    roster_fails: bool,
    roster_stalls: bool,
    stalled: HashSet<UserId>,
    rejects: HashSet<UserId>,
    calls: Mutex<Calls>,
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn role(&self, _guild_id: GuildId, role_id: RoleId) -> Result<Option<RoleRef>, RoError> {
        self.calls.lock().await.role_lookups += 1;
        Ok(self.roles.get(&role_id).cloned())
    }

    async fn member(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
    ) -> Result<MemberCandidate, RoError> {
        self.calls.lock().await.member_fetches.push(user_id);
        if self.stalled.contains(&user_id) {
            return Err(CommandError::Timeout.into());
        }
        self.members
            .get(&user_id)
            .cloned()
            .ok_or_else(|| RoError::discord("Unknown Member"))
    }

    async fn roster(&self, _guild_id: GuildId) -> Result<Vec<MemberCandidate>, RoError> {
        self.calls.lock().await.roster_fetches += 1;
        if self.roster_fails {
            return Err(RoError::discord("Missing Access"));
        }
        if self.roster_stalls {
            return Err(CommandError::Timeout.into());
        }
        Ok(self.roster.clone())
    }

    async fn add_role(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), RoError> {
        if self.rejects.contains(&user_id) {
            return Err(RoError::discord("Missing Permissions"));
        }
        self.calls.lock().await.grants.push((user_id, role_id));
        Ok(())
    }

    async fn reply(
        &self,
        _channel_id: ChannelId,
        reply_to: MessageId,
        content: &str,
    ) -> Result<MessageId, RoError> {
        let mut calls = self.calls.lock().await;
        let id = MessageId::new(FIRST_REPLY + calls.replies.len() as u64);
        calls.replies.push((reply_to, content.to_owned()));
        Ok(id)
    }
}

fn member(id: u64, tag: &str, highest_position: i64) -> MemberCandidate {
    MemberCandidate {
        id: UserId::new(id),
        tag: tag.into(),
        highest_position,
    }
}

/// Moderator at position 5, an author at 10 and the bot at 20.
fn directory() -> FakeDirectory {
    let mut directory = FakeDirectory::default();
    directory.roles.insert(
        RoleId::new(ROLE),
        RoleRef::new(RoleId::new(ROLE), "Moderator", 5),
    );
    for m in [member(AUTHOR, "boss", 10), member(BOT, "addrole", 20)] {
        directory.members.insert(m.id, m);
    }
    directory
}

fn with_members(mut directory: FakeDirectory, members: Vec<MemberCandidate>) -> FakeDirectory {
    for m in members {
        directory.members.insert(m.id, m);
    }
    directory
}

fn framework(directory: Arc<FakeDirectory>, strategy: TargetStrategy, cache: Cache) -> Framework {
    let config = Configuration::default().strategy(strategy);
    let bot = BotContext::new(UserId::new(BOT), config, cache, directory);
    Framework::new(bot).configure(addrole_config)
}

fn invocation(content: &str) -> Invocation {
    Invocation {
        guild_id: GuildId::new(GUILD),
        channel_id: ChannelId::new(CHANNEL),
        message_id: MessageId::new(MESSAGE),
        author_id: UserId::new(AUTHOR),
        author_tag: "boss".into(),
        author_roles: None,
        content: content.into(),
    }
}

async fn run(directory: FakeDirectory, strategy: TargetStrategy, content: &str) -> Calls {
    let directory = Arc::new(directory);
    let mut framework = framework(directory.clone(), strategy, Cache::new());
    let _ = framework.dispatch(invocation(content)).await;
    let mut calls = directory.calls.lock().await;
    std::mem::take(&mut *calls)
}

fn reply(to: u64, content: &str) -> (MessageId, String) {
    (MessageId::new(to), content.to_owned())
}

#[tokio::test]
async fn grants_by_id_and_reports_failed_lookups() {
    let directory = with_members(directory(), vec![member(111, "alice", 1)]);
    let calls = run(directory, TargetStrategy::ByIdentifier, "!addrole 555 111,222").await;

    assert_eq!(calls.grants, vec![(UserId::new(111), RoleId::new(ROLE))]);
    assert_eq!(
        calls.replies,
        vec![
            reply(MESSAGE, "Processing... Please wait."),
            reply(
                FIRST_REPLY,
                "✅ Moderator added to: alice\n❌ Failed to add Moderator to: 222"
            ),
        ]
    );
}

#[tokio::test]
async fn grants_by_name_with_a_single_roster_fetch() {
    let mut directory = directory();
    directory.roster = vec![member(111, "Alice", 1), member(112, "carol", 1)];
    let calls = run(directory, TargetStrategy::ByDisplayName, "!addrole 555 ALICE, bob").await;

    assert_eq!(calls.roster_fetches, 1);
    assert_eq!(calls.grants, vec![(UserId::new(111), RoleId::new(ROLE))]);
    assert_eq!(
        calls.replies.last(),
        Some(&reply(
            FIRST_REPLY,
            "✅ Moderator added to: Alice\n❌ Failed to add Moderator to: bob"
        ))
    );
}

#[tokio::test]
async fn first_roster_match_wins() {
    let mut directory = directory();
    directory.roster = vec![member(111, "alice", 1), member(112, "ALICE", 1)];
    let calls = run(directory, TargetStrategy::ByDisplayName, "!addrole 555 alice").await;

    assert_eq!(calls.grants, vec![(UserId::new(111), RoleId::new(ROLE))]);
}

#[tokio::test]
async fn missing_arguments_reply_with_usage() {
    for content in ["!addrole", "!addrole 555"] {
        let calls = run(directory(), TargetStrategy::ByIdentifier, content).await;

        assert_eq!(calls.role_lookups, 0);
        assert_eq!(
            calls.replies,
            vec![reply(
                MESSAGE,
                "Usage: !addrole <roleId> <comma-separated user IDs>"
            )]
        );
    }

    let calls = run(directory(), TargetStrategy::ByDisplayName, "!addrole").await;
    assert_eq!(
        calls.replies,
        vec![reply(
            MESSAGE,
            "Usage: !addrole <roleId> <comma-separated usernames>"
        )]
    );
}

#[tokio::test]
async fn blank_targets_are_rejected_before_the_role_lookup() {
    let calls = run(directory(), TargetStrategy::ByIdentifier, "!addrole 555 , ,").await;

    assert_eq!(calls.role_lookups, 0);
    assert_eq!(
        calls.replies,
        vec![reply(MESSAGE, "❌ No valid user IDs provided.")]
    );
}

#[tokio::test]
async fn unknown_role_is_reported() {
    let calls = run(directory(), TargetStrategy::ByIdentifier, "!addrole 777 111").await;

    assert!(calls.grants.is_empty());
    assert_eq!(
        calls.replies,
        vec![reply(MESSAGE, "❌ Role with ID 777 not found.")]
    );
}

#[tokio::test]
async fn role_mentions_are_accepted() {
    let directory = with_members(directory(), vec![member(111, "alice", 1)]);
    let calls = run(directory, TargetStrategy::ByIdentifier, "!addrole <@&555> <@111>").await;

    assert_eq!(calls.grants, vec![(UserId::new(111), RoleId::new(ROLE))]);
}

#[tokio::test]
async fn actor_tied_with_the_role_is_refused() {
    let mut directory = with_members(directory(), vec![member(111, "alice", 1)]);
    directory
        .members
        .insert(UserId::new(AUTHOR), member(AUTHOR, "boss", 5));
    let calls = run(directory, TargetStrategy::ByIdentifier, "!addrole 555 111").await;

    assert!(calls.grants.is_empty());
    assert!(!calls.member_fetches.contains(&UserId::new(BOT)));
    assert_eq!(
        calls.replies,
        vec![reply(
            MESSAGE,
            "❌ You cannot assign the role Moderator because it is higher or equal to your highest role."
        )]
    );
}

#[tokio::test]
async fn bot_below_the_role_is_refused() {
    let mut directory = with_members(directory(), vec![member(111, "alice", 1)]);
    directory
        .members
        .insert(UserId::new(BOT), member(BOT, "addrole", 2));
    let calls = run(directory, TargetStrategy::ByIdentifier, "!addrole 555 111").await;

    assert!(calls.grants.is_empty());
    assert_eq!(
        calls.replies,
        vec![reply(
            MESSAGE,
            "❌ I cannot assign the role Moderator because it is higher or equal to my highest role."
        )]
    );
}

#[tokio::test]
async fn author_roles_from_the_message_use_the_cache() {
    let cache = Cache::new();
    cache.insert_role(CachedRole {
        id: RoleId::new(30),
        guild_id: GuildId::new(GUILD),
        name: "Admin".into(),
        position: 9,
    });
    let directory = Arc::new(with_members(directory(), vec![member(111, "alice", 1)]));
    let mut framework = framework(directory.clone(), TargetStrategy::ByIdentifier, cache);

    let mut invocation = invocation("!addrole 555 111");
    invocation.author_roles = Some(vec![RoleId::new(30)]);
    let _ = framework.dispatch(invocation).await;

    let calls = directory.calls.lock().await;
    assert!(!calls.member_fetches.contains(&UserId::new(AUTHOR)));
    assert_eq!(calls.grants, vec![(UserId::new(111), RoleId::new(ROLE))]);
}

#[tokio::test]
async fn roster_failure_skips_the_report() {
    let mut directory = directory();
    directory.roster_fails = true;
    let calls = run(directory, TargetStrategy::ByDisplayName, "!addrole 555 alice").await;

    assert!(calls.grants.is_empty());
    assert_eq!(
        calls.replies,
        vec![
            reply(MESSAGE, "Processing... Please wait."),
            reply(
                MESSAGE,
                "❌ Failed to fetch the server members. Please try again."
            ),
        ]
    );
}

#[tokio::test]
async fn a_rejected_grant_does_not_stop_the_batch() {
    let mut directory = with_members(
        directory(),
        vec![
            member(111, "alice", 1),
            member(222, "bob#0042", 1),
            member(333, "carol", 1),
        ],
    );
    directory.rejects.insert(UserId::new(222));
    let calls = run(directory, TargetStrategy::ByIdentifier, "!addrole 555 111,222,333").await;

    assert_eq!(
        calls.grants,
        vec![
            (UserId::new(111), RoleId::new(ROLE)),
            (UserId::new(333), RoleId::new(ROLE)),
        ]
    );
    assert_eq!(
        calls.replies.last(),
        Some(&reply(
            FIRST_REPLY,
            "✅ Moderator added to: alice, carol\n❌ Failed to add Moderator to: bob#0042"
        ))
    );
}

#[tokio::test]
async fn duplicate_targets_are_processed_twice() {
    let directory = with_members(directory(), vec![member(111, "alice", 1)]);
    let calls = run(directory, TargetStrategy::ByIdentifier, "!addrole 555 111,111").await;

    assert_eq!(calls.grants.len(), 2);
    assert_eq!(
        calls.replies.last(),
        Some(&reply(FIRST_REPLY, "✅ Moderator added to: alice, alice"))
    );
}

#[tokio::test]
async fn long_reports_are_split_under_the_acknowledgement() {
    let members = (0..300)
        .map(|i| member(10_000 + i, &format!("member-with-a-long-name-{:04}", i), 1))
        .collect::<Vec<_>>();
    let targets = members
        .iter()
        .map(|m| m.id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let directory = with_members(directory(), members);
    let calls = run(
        directory,
        TargetStrategy::ByIdentifier,
        &format!("!addrole 555 {}", targets),
    )
    .await;

    assert_eq!(calls.grants.len(), 300);
    let (ack, chunks) = calls.replies.split_first().unwrap();
    assert_eq!(ack.1, "Processing... Please wait.");
    assert!(chunks.len() > 1);
    assert!(chunks
        .iter()
        .all(|(to, c)| *to == MessageId::new(FIRST_REPLY) && c.chars().count() <= MESSAGE_LIMIT));

    let report = chunks.iter().map(|(_, c)| c.as_str()).collect::<String>();
    assert!(report.starts_with("✅ Moderator added to: member-with-a-long-name-0000, "));
    assert!(report.ends_with("member-with-a-long-name-0299"));
}

#[tokio::test]
async fn unrelated_messages_are_ignored() {
    for content in ["hello there", "!other 555 111", "addrole 555 111", "!addrole555 111"] {
        let calls = run(directory(), TargetStrategy::ByIdentifier, content).await;
        assert!(calls.replies.is_empty());
        assert_eq!(calls.role_lookups, 0);
    }
}

#[tokio::test]
async fn command_word_is_case_insensitive() {
    let directory = with_members(directory(), vec![member(111, "alice", 1)]);
    let calls = run(directory, TargetStrategy::ByIdentifier, "!AddRole 555 111").await;

    assert_eq!(calls.grants.len(), 1);
}

#[tokio::test]
async fn timed_out_lookup_fails_only_that_target() {
    let mut directory = with_members(
        directory(),
        vec![member(111, "alice", 1), member(222, "bob", 1), member(333, "carol", 1)],
    );
    directory.stalled.insert(UserId::new(222));
    let calls = run(directory, TargetStrategy::ByIdentifier, "!addrole 555 111,222,333").await;

    assert_eq!(
        calls.grants,
        vec![
            (UserId::new(111), RoleId::new(ROLE)),
            (UserId::new(333), RoleId::new(ROLE)),
        ]
    );
    assert_eq!(
        calls.replies.last(),
        Some(&reply(
            FIRST_REPLY,
            "✅ Moderator added to: alice, carol\n❌ Failed to add Moderator to: 222"
        ))
    );
}

#[tokio::test]
async fn timed_out_roster_counts_as_a_roster_failure() {
    let mut directory = directory();
    directory.roster_stalls = true;
    let calls = run(directory, TargetStrategy::ByDisplayName, "!addrole 555 alice").await;

    assert!(calls.grants.is_empty());
    assert_eq!(
        calls.replies.last(),
        Some(&reply(
            MESSAGE,
            "❌ Failed to fetch the server members. Please try again."
        ))
    );
}

#[tokio::test]
async fn timed_out_bot_lookup_replies_with_the_timeout() {
    let mut directory = with_members(directory(), vec![member(111, "alice", 1)]);
    directory.stalled.insert(UserId::new(BOT));
    let calls = run(directory, TargetStrategy::ByIdentifier, "!addrole 555 111").await;

    assert!(calls.grants.is_empty());
    assert_eq!(
        calls.replies,
        vec![reply(
            MESSAGE,
            "❌ The request to Discord timed out. Please try again."
        )]
    );
}
