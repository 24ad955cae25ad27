//! Profile and member-directory handlers.

mod export_members;
mod get_my_profile;
mod list_members;
mod update_my_profile;

pub use export_members::{ExportMembersHandler, ExportMembersQuery, MembersExport, EXPORT_FILENAME};
pub use get_my_profile::{GetMyProfileHandler, GetMyProfileQuery};
pub use list_members::{ListMembersHandler, ListMembersQuery};
pub use update_my_profile::{UpdateMyProfileCommand, UpdateMyProfileHandler};
