pub mod access;
pub mod admin;
pub mod auth;
pub mod branches;
pub mod folders;
pub mod notifications;
pub mod profiles;
pub mod resources;
