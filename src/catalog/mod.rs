//! Media asset catalog (iconik) REST client.
//!
//! Used by `sync` to attach subtitle files produced by a run to an existing
//! catalog asset.

mod client;
mod helper;
mod types;

pub use client::CatalogClient;
pub use helper::{derive_file_location, AddedFile, FileLocation};
pub use types::*;
