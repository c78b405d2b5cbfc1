mod admin_resource_handler;
mod resource_handler;

pub use admin_resource_handler::*;
pub use resource_handler::*;
