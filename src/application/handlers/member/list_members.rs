//! ListMembersHandler - staff directory with free-text search.

use std::sync::Arc;

use crate::application::handlers::admin::AdminGuard;
use crate::domain::foundation::UserId;
use crate::domain::member::{MemberError, MemberProfile};
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct ListMembersQuery {
    pub requested_by: UserId,
    /// Case-insensitive match on name, email, phone or role.
    pub search: Option<String>,
}

pub struct ListMembersHandler {
    guard: AdminGuard,
    members: Arc<dyn MemberRepository>,
}

impl ListMembersHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self {
            guard: AdminGuard::new(members.clone()),
            members,
        }
    }

    /// Newest first.
    pub async fn handle(&self, query: ListMembersQuery) -> Result<Vec<MemberProfile>, MemberError> {
        self.guard.require_admin(&query.requested_by).await?;
        search_members(self.members.as_ref(), query.search.as_deref()).await
    }
}

pub(super) async fn search_members(
    members: &dyn MemberRepository,
    search: Option<&str>,
) -> Result<Vec<MemberProfile>, MemberError> {
    let mut all = members.list_all().await?;
    if let Some(q) = search {
        all.retain(|m| m.matches_search(q));
    }
    Ok(all)
}
