//! Authentication delegated to the backend's auth API.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/signup` | No | Register a student |
//! | POST | `/api/auth/login` | No | Password login, sets the session cookie |
//! | POST | `/api/auth/refresh` | No | Exchange a refresh token |
//! | POST | `/api/auth/forgot-password` | No | Send a reset email |
//! | POST | `/api/auth/logout` | Session | End the session, clear the cookie |
//! | GET | `/api/auth/me` | Session | Session user and role |

mod validator;

pub mod clients;
pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use clients::{AuthProvider, BackendAuthClient};
pub use services::{AuthService, AuthSettings};
pub use validator::JwtValidator;
