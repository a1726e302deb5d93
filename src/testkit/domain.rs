//! Builders for domain primitives used across tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{Hashtag, PostId};

/// Create a [`Hashtag`] from a string, panicking on invalid input.
pub fn tag(value: &str) -> Hashtag {
    Hashtag::try_new(value).unwrap_or_else(|e| panic!("bad test hashtag: {e}"))
}

/// Create a [`PostId`] from a string, panicking on invalid input.
pub fn post(id: &str) -> PostId {
    PostId::try_new(id).unwrap_or_else(|e| panic!("bad test post id: {e}"))
}

/// Fixed reference instant shared by time-sensitive tests.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("fixed test timestamp is valid"))
}
