//! Citizen profiles.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/profile` | Get (creating on first access) the caller's profile |
//! | PATCH | `/api/profile` | Update name, city or avatar |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProfileService;
