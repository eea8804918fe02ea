//! Shared user-to-summary projection.

use tracing::warn;

use crate::domain::ports::UserSkillRepository;
use crate::domain::{ProfileSummary, SkillDirection, User};

/// Project a user into a [`ProfileSummary`], resolving both skill lists.
///
/// A failing skill lookup degrades to an empty list rather than failing the
/// whole projection; summaries back listing views where partial data beats
/// an error.
pub(crate) async fn summarize<L>(links: &L, user: &User) -> ProfileSummary
where
    L: UserSkillRepository + ?Sized,
{
    let offered = names_or_empty(links, user, SkillDirection::Offered).await;
    let wanted = names_or_empty(links, user, SkillDirection::Wanted).await;
    ProfileSummary::project(user, offered, wanted)
}

async fn names_or_empty<L>(links: &L, user: &User, direction: SkillDirection) -> Vec<String>
where
    L: UserSkillRepository + ?Sized,
{
    match links.skill_names(&user.id, direction).await {
        Ok(names) => names,
        Err(error) => {
            warn!(
                user_id = %user.id,
                direction = %direction,
                %error,
                "skill lookup failed; degrading to empty list"
            );
            Vec::new()
        }
    }
}
