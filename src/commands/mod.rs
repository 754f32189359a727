//! Command implementations shared by the CLI and the event handler.

pub mod create;
pub mod describe;
pub mod sync;

pub use create::{build_and_submit, CreateOutcome, Submission};
pub use describe::describe_run;
pub use sync::{storage_path_from_uri, sync_subtitles, SyncRequest};
