//! Staff-only handlers. Every handler checks `AdminGuard` first.

mod class_types;
mod guard;
mod session_roster;
mod sessions;

pub use class_types::{
    AdminListClassTypesHandler, ClassTypeFields, CreateClassTypeCommand, CreateClassTypeHandler,
    UpdateClassTypeCommand, UpdateClassTypeHandler,
};
pub use guard::AdminGuard;
pub use session_roster::{RosterEntry, SessionRoster, SessionRosterHandler, SessionRosterQuery};
pub use sessions::{
    AdminSessionRow, CreateClassSessionCommand, CreateClassSessionHandler,
    ListAdminSessionsHandler, ListAdminSessionsQuery, SessionFields, SessionRange,
    ToggleSessionCancellationCommand, ToggleSessionCancellationHandler,
    UpdateClassSessionCommand, UpdateClassSessionHandler,
};
