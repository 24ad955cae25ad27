//! Public schedule queries.

mod get_session_detail;
mod list_class_types;
mod list_day_schedule;
mod session_view;

pub use get_session_detail::{GetSessionDetailHandler, GetSessionDetailQuery};
pub use list_class_types::ListClassTypesHandler;
pub use list_day_schedule::{DaySchedule, ListDayScheduleHandler, ListDayScheduleQuery};
pub use session_view::{SessionView, SessionViewAssembler};
