use twilight_model::{guild::Member, user::User};

use crate::id::UserId;

/// A guild member considered as a grant target, or the actor/bot being checked against
/// the role hierarchy.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MemberCandidate {
    pub id: UserId,
    pub tag: String,
    pub highest_position: i64,
}

impl MemberCandidate {
    pub fn from_member(member: &Member, highest_position: i64) -> Self {
        Self {
            id: member.user.id,
            tag: user_tag(&member.user),
            highest_position,
        }
    }
}

pub fn user_tag(user: &User) -> String {
    tag(&user.name, user.discriminator)
}

/// `name#0001` for accounts that still carry a discriminator, the bare name otherwise.
pub fn tag(name: &str, discriminator: u16) -> String {
    if discriminator == 0 {
        name.to_owned()
    } else {
        format!("{}#{:04}", name, discriminator)
    }
}
