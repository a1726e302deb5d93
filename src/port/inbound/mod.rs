//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`post_event`]: post-lifecycle notifications from the external post store
//! - [`trending`]: the use cases the HTTP and CLI adapters drive

pub mod post_event;
pub mod trending;
