//! Shared in-memory tables.
//!
//! All in-memory repositories built from the same `InMemoryStore` see the
//! same data, the way repositories sharing a connection pool see one
//! database. A single async mutex guards every table, which makes each
//! repository call atomic.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::announcement::Announcement;
use crate::domain::booking::Booking;
use crate::domain::member::MemberProfile;
use crate::domain::schedule::{ClassSession, ClassType};

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub class_types: Vec<ClassType>,
    pub sessions: Vec<ClassSession>,
    /// Insertion order doubles as creation order.
    pub bookings: Vec<Booking>,
    pub members: Vec<MemberProfile>,
    pub announcements: Vec<Announcement>,
}

/// Handle to one in-memory dataset. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) async fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().await
    }
}
