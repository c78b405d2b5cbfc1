mod folder_repository;

pub use folder_repository::*;
