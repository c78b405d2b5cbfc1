//! Student and admin profiles.
//!
//! A profile row shares its id with the auth backend user and is created at
//! sign up with the `student` role. The role is assigned server-side only.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/profile` | Session | Current user's profile |
//! | PATCH | `/api/profile` | Session | Update name, branch, semester |
//! | GET | `/api/profile/activity` | Session | Current user's uploads |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgProfileRepository, ProfileRepository};
pub use services::ProfileService;
