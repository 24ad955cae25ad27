//! CSV export of the member directory.

use csv::{QuoteStyle, WriterBuilder};

use super::{MemberError, MemberProfile};

/// Column order of the export.
pub const CSV_HEADER: [&str; 5] = ["full_name", "email", "phone", "role", "created_at"];

/// Renders profiles as CSV with every field quoted and missing values empty.
pub fn members_to_csv(profiles: &[MemberProfile]) -> Result<String, MemberError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(export_error)?;

    for profile in profiles {
        let created_at = profile.created_at().to_rfc3339();
        writer
            .write_record([
                profile.full_name().unwrap_or_default(),
                profile.email().unwrap_or_default(),
                profile.phone().unwrap_or_default(),
                profile.role().as_str(),
                created_at.as_str(),
            ])
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MemberError::export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| MemberError::export(e.to_string()))
}

fn export_error(err: csv::Error) -> MemberError {
    MemberError::export(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::member::MemberRole;
    use chrono::{TimeZone, Utc};

    fn member(name: Option<&str>, email: Option<&str>, role: MemberRole) -> MemberProfile {
        MemberProfile::reconstitute(
            UserId::new("user-1").unwrap(),
            name.map(String::from),
            None,
            email.map(String::from),
            role,
            Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()),
        )
    }

    #[test]
    fn header_only_for_empty_directory() {
        let csv = members_to_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "\"full_name\",\"email\",\"phone\",\"role\",\"created_at\"\n"
        );
    }

    #[test]
    fn every_field_is_quoted_and_missing_values_are_empty() {
        let csv = members_to_csv(&[member(Some("Ana"), None, MemberRole::Admin)]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"Ana\",\"\",\"\",\"admin\",\"2024-03-01T08:30:00+00:00\""
        );
    }

    #[test]
    fn embedded_quotes_and_commas_are_escaped() {
        let csv = members_to_csv(&[member(
            Some("O\"Neil, Sam"),
            Some("sam@example.com"),
            MemberRole::Member,
        )])
        .unwrap();
        assert!(csv.contains("\"O\"\"Neil, Sam\""));
    }
}
