//! HTTP adapter.
//!
//! | Route               | Auth   | Purpose                              |
//! |---------------------|--------|--------------------------------------|
//! | `GET /trending`     | bearer | cached top-N listing (POST accepted) |
//! | `POST /post-events` | bearer | post-lifecycle intake                |
//! | `GET /healthz`      | none   | liveness                             |

pub mod auth;
pub mod error;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::router;
pub use server::{serve, shutdown_signal};
pub use state::AppState;
