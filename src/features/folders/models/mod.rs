mod folder;
mod tree;

pub use folder::Folder;
pub use tree::FolderTree;
