//! Filesystem seam for the collaborators
//!
//! The detector, template loader and state store read and write through
//! [`FileSystem`] so their tests can run against [`MockFileSystem`].

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::{FileMetadata, FileSystem, FileType};
pub use real::RealFileSystem;
