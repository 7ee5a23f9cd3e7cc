//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - session: session snapshot pushed in by the shell
//! - collection: the generic list controller state
//! - album: album entries and their interaction state
//! - image: image entries and display sizing

pub mod album;
pub mod collection;
pub mod image;
pub mod session;

// Re-export all types for convenient access
pub use album::*;
pub use collection::*;
pub use image::*;
pub use session::*;
