pub mod import_request;
pub mod loaders;
pub mod outcome;

pub use import_request::{normalize, ImportRequest};
pub use loaders::{load_profile, load_raw_links};
pub use outcome::{BatchPhase, BatchResult, Decision, FailedItem, ImportOutcome};
