//! Bloom Studio - class booking service for a boutique fitness studio.
//!
//! Members browse the day's schedule, book classes or join a waitlist, and
//! cancel their own bookings; staff manage class types, sessions, rosters,
//! members and announcements. The availability calculator in
//! `domain::booking` decides both what a member sees and what status a new
//! booking receives.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
