//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, money, timestamps, errors, events)
//! - `schedule` - Class types, class sessions and the studio calendar
//! - `booking` - Bookings and the availability calculator
//! - `member` - Member profiles, roles and the member directory
//! - `announcement` - Studio announcements

pub mod announcement;
pub mod booking;
pub mod foundation;
pub mod member;
pub mod schedule;
