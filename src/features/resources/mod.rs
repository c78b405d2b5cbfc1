//! Resource catalog and lifecycle.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/resources` | Session | Filtered catalog, newest first |
//! | GET | `/api/resources/{id}` | Session | Single resource |
//! | GET | `/api/admin/resources` | Admin | Paged management list |
//! | POST | `/api/admin/resources` | Admin | Upload file and create resource |
//! | PATCH | `/api/admin/resources/{id}` | Admin | Edit title and subject code |
//! | DELETE | `/api/admin/resources/{id}` | Admin | Delete stored file and row |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgResourceRepository, ResourceRepository};
pub use services::ResourceService;
