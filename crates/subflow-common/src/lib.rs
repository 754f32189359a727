//! Subflow-Common: Shared error type and storage URI utilities.
//!
//! This crate provides functionality used across subflow:
//!
//! - **Error Handling**: The error taxonomy shared by the job builder and the
//!   collaborator glue, plus a `Result` alias
//! - **Storage URIs**: Parsing and formatting of `s3://bucket/key` locations
//!
//! # Examples
//!
//! ```
//! use subflow_common::{Error, Result, StorageUri};
//!
//! let uri = StorageUri::parse("s3://media/in/clip.mov").unwrap();
//! assert_eq!(uri.bucket(), "media");
//! assert_eq!(uri.key(), "in/clip.mov");
//!
//! fn example() -> Result<()> {
//!     Err(Error::configuration("job name required"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod uri;

pub use error::{Error, Result};
pub use uri::{ensure_trailing_separator, StorageUri, STORAGE_SCHEME};
