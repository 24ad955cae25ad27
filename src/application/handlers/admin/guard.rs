//! Staff authorization.
//!
//! Admin rights come from the caller's profile role, not from token claims,
//! so promoting or demoting staff takes effect on the next request.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::member::MemberProfile;
use crate::ports::MemberRepository;

#[derive(Clone)]
pub struct AdminGuard {
    members: Arc<dyn MemberRepository>,
}

impl AdminGuard {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    /// Returns the caller's profile if their role is `admin`.
    ///
    /// # Errors
    ///
    /// - `Forbidden` when there is no profile or the role is `member`
    pub async fn require_admin(&self, user_id: &UserId) -> Result<MemberProfile, DomainError> {
        match self.members.find_by_user(user_id).await? {
            Some(profile) if profile.is_admin() => Ok(profile),
            _ => {
                tracing::warn!(user_id = %user_id, "Admin action refused");
                Err(DomainError::new(
                    ErrorCode::Forbidden,
                    "Only studio staff can do that",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user, Fixture};
    use crate::ports::MemberRepository;

    #[tokio::test]
    async fn admin_passes() {
        let fx = Fixture::new();
        let admin = fx.admin("staff-1").await;
        let guard = AdminGuard::new(fx.members.clone());

        let profile = guard.require_admin(&admin).await.unwrap();
        assert!(profile.is_admin());
    }

    #[tokio::test]
    async fn member_is_forbidden() {
        let fx = Fixture::new();
        let member = user("member-1");
        fx.members.ensure(&member, None).await.unwrap();
        let guard = AdminGuard::new(fx.members.clone());

        let err = guard.require_admin(&member).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn unknown_user_is_forbidden() {
        let fx = Fixture::new();
        let guard = AdminGuard::new(fx.members.clone());

        let err = guard.require_admin(&user("ghost")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
