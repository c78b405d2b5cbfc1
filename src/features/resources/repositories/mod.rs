mod resource_repository;

pub use resource_repository::*;
