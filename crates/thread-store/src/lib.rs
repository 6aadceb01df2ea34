//! Flat JSON persistence keyed by thread and user id.
//!
//! Each document lives in one file and is rewritten as a whole on every
//! change. A missing file reads as an empty document.

mod error;
mod file;
mod store;
mod types;

pub use error::StoreError;
pub use file::JsonFile;
pub use store::{GameIdStore, UserListStore};
pub use types::*;
