//! Local-disk storage for uploaded files.

mod local;

pub use local::LocalFileStore;
