//! Folder tree for organising resources.
//!
//! Folders form a forest through `parent_id`. Expand/collapse state belongs
//! to the client; the server only renders the rows for a given expansion set.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/folders` | Session | Flat folder list |
//! | GET | `/api/folders/tree` | Session | Nested tree |
//! | GET | `/api/folders/tree/rows` | Session | Visible rows for an expansion set |
//! | POST | `/api/admin/folders` | Admin | Create folder |
//! | PATCH | `/api/admin/folders/{id}` | Admin | Rename folder |
//! | DELETE | `/api/admin/folders/{id}` | Admin | Delete folder |
//! | PUT | `/api/admin/folders/{id}/parent` | Admin | Move folder |
//! | PUT | `/api/admin/resources/{id}/folder` | Admin | Move resource into folder |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgFolderRepository;
pub use services::FolderService;
