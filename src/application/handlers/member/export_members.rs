//! ExportMembersHandler - CSV download of the (filtered) member directory.

use std::sync::Arc;

use crate::application::handlers::admin::AdminGuard;
use crate::domain::foundation::UserId;
use crate::domain::member::{members_to_csv, MemberError};
use crate::ports::MemberRepository;

use super::list_members::search_members;

pub const EXPORT_FILENAME: &str = "bloom-members.csv";

#[derive(Debug, Clone)]
pub struct ExportMembersQuery {
    pub requested_by: UserId,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembersExport {
    pub filename: &'static str,
    pub csv: String,
    pub rows: usize,
}

pub struct ExportMembersHandler {
    guard: AdminGuard,
    members: Arc<dyn MemberRepository>,
}

impl ExportMembersHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self {
            guard: AdminGuard::new(members.clone()),
            members,
        }
    }

    pub async fn handle(&self, query: ExportMembersQuery) -> Result<MembersExport, MemberError> {
        self.guard.require_admin(&query.requested_by).await?;

        let members = search_members(self.members.as_ref(), query.search.as_deref()).await?;
        let csv = members_to_csv(&members)?;

        tracing::info!(rows = members.len(), requested_by = %query.requested_by, "Member export");

        Ok(MembersExport {
            filename: EXPORT_FILENAME,
            csv,
            rows: members.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user, Fixture};
    use crate::ports::MemberRepository;

    #[tokio::test]
    async fn exports_filtered_rows_with_header() {
        let fx = Fixture::new();
        let admin = fx.admin("staff").await;
        fx.members
            .ensure(&user("m1"), Some("alice@example.com"))
            .await
            .unwrap();
        fx.members
            .ensure(&user("m2"), Some("bob@example.com"))
            .await
            .unwrap();

        let export = ExportMembersHandler::new(fx.members.clone())
            .handle(ExportMembersQuery {
                requested_by: admin,
                search: Some("alice".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(export.filename, "bloom-members.csv");
        assert_eq!(export.rows, 1);
        assert!(export
            .csv
            .starts_with("\"full_name\",\"email\",\"phone\",\"role\",\"created_at\""));
        assert!(export.csv.contains("\"alice@example.com\""));
        assert!(!export.csv.contains("bob@example.com"));
    }

    #[tokio::test]
    async fn members_cannot_export() {
        let fx = Fixture::new();
        fx.members.ensure(&user("m1"), None).await.unwrap();

        let result = ExportMembersHandler::new(fx.members.clone())
            .handle(ExportMembersQuery {
                requested_by: user("m1"),
                search: None,
            })
            .await;
        assert_eq!(result.unwrap_err(), MemberError::Forbidden);
    }
}
