//! Session HTTP module (voice calls and video avatar sessions).

mod dto;
mod handlers;
mod routes;

pub use routes::routes;
