//! HTTP adapter for the staff console under `/api/admin`.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AdminSessionResponse, AdminSessionsParams, AmountInput, ClassTypeRequest, MemberSearchParams,
    RosterEntryResponse, RosterResponse, SessionRequest,
};
pub use handlers::AdminHandlers;
pub use routes::admin_routes;
