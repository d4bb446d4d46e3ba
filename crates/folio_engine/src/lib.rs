//! Folio engine: IO pipeline and effect execution.
mod engine;
mod fetch;
mod launch;
mod output_path;
mod persist;
mod submit;
mod types;

pub use engine::{EngineConfig, EngineHandle};
pub use fetch::{ContentFetcher, ContentOrigin, DirectoryFetcher, FetchSettings, ReqwestFetcher};
pub use launch::{LaunchError, Launcher, LogOnlyLauncher, SystemLauncher};
pub use output_path::page_file_name;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use submit::{ContactMessage, ContactSubmitter, ReqwestSubmitter, SubmitError};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, RequestId};
