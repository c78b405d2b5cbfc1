//! Broadcast notifications shown to every visitor.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/notifications` | No | All notifications, newest first |
//! | POST | `/api/admin/notifications` | Admin | Post a notification |
//! | DELETE | `/api/admin/notifications/{id}` | Admin | Remove a notification |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgNotificationRepository;
pub use services::NotificationService;
