mod filter;
mod resource;

pub use filter::ResourceFilter;
pub use resource::{Resource, ResourceType};
