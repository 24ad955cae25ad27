//! UpdateMyProfileHandler - edits the caller's name and phone.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::member::{MemberError, MemberProfile};
use crate::ports::MemberRepository;

/// `None` leaves a field as is; a blank string clears it.
#[derive(Debug, Clone)]
pub struct UpdateMyProfileCommand {
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

pub struct UpdateMyProfileHandler {
    members: Arc<dyn MemberRepository>,
}

impl UpdateMyProfileHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, cmd: UpdateMyProfileCommand) -> Result<MemberProfile, MemberError> {
        let mut profile = self.members.ensure(&cmd.user_id, None).await?;

        let full_name = cmd
            .full_name
            .or_else(|| profile.full_name().map(String::from));
        let phone = cmd.phone.or_else(|| profile.phone().map(String::from));
        profile.update_contact(full_name, phone);

        self.members.update(&profile).await?;
        tracing::debug!(user_id = %cmd.user_id, "Profile updated");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user, Fixture};
    use crate::ports::MemberRepository;

    fn command(full_name: Option<&str>, phone: Option<&str>) -> UpdateMyProfileCommand {
        UpdateMyProfileCommand {
            user_id: user("alice"),
            full_name: full_name.map(String::from),
            phone: phone.map(String::from),
        }
    }

    #[tokio::test]
    async fn sets_and_trims_fields() {
        let fx = Fixture::new();
        let handler = UpdateMyProfileHandler::new(fx.members.clone());

        let profile = handler
            .handle(command(Some("  Alice Smith "), Some("07700 900123")))
            .await
            .unwrap();

        assert_eq!(profile.full_name(), Some("Alice Smith"));
        assert_eq!(profile.phone(), Some("07700 900123"));

        let stored = fx.members.find_by_user(&user("alice")).await.unwrap().unwrap();
        assert_eq!(stored.full_name(), Some("Alice Smith"));
    }

    #[tokio::test]
    async fn blank_clears_and_missing_keeps() {
        let fx = Fixture::new();
        let handler = UpdateMyProfileHandler::new(fx.members.clone());
        handler
            .handle(command(Some("Alice"), Some("123")))
            .await
            .unwrap();

        let profile = handler.handle(command(None, Some("  "))).await.unwrap();

        assert_eq!(profile.full_name(), Some("Alice"));
        assert_eq!(profile.phone(), None);
    }
}
