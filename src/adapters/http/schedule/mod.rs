//! HTTP adapter for the public schedule.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ActionResponse, AvailabilityResponse, BookingResponse, ClassTypeResponse,
    DayScheduleResponse, PriceResponse, ScheduleParams, SessionResponse, SessionSummaryResponse,
};
pub use handlers::ScheduleHandlers;
pub use routes::schedule_routes;
