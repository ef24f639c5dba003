// Status-page REST API
//
// Base path: /api/v1/
// Auth: `Authorization: Bearer <token>`
// Envelope: every non-empty success body is `{"data": <payload>}`

mod auth;
pub mod client;
mod groups;
mod incidents;
mod maintenance;
pub mod models;
mod services;

pub use client::ApiClient;
