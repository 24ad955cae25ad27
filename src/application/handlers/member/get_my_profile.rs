//! GetMyProfileHandler - returns the caller's profile, creating it on first visit.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::member::{MemberError, MemberProfile};
use crate::ports::MemberRepository;

#[derive(Debug, Clone)]
pub struct GetMyProfileQuery {
    pub user_id: UserId,
    /// Email from the token; refreshes the stored one when present.
    pub email: Option<String>,
}

pub struct GetMyProfileHandler {
    members: Arc<dyn MemberRepository>,
}

impl GetMyProfileHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, query: GetMyProfileQuery) -> Result<MemberProfile, MemberError> {
        Ok(self
            .members
            .ensure(&query.user_id, query.email.as_deref())
            .await?)
    }
}
