//! Engineering branches offered in the catalog filters.
//!
//! Deleting a branch does not touch resources; they keep the branch name.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/branches` | No | List branches |
//! | POST | `/api/admin/branches` | Admin | Create branch |
//! | DELETE | `/api/admin/branches/{id}` | Admin | Delete branch |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgBranchRepository;
pub use services::BranchService;
