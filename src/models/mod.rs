pub mod outcome;
pub mod process;
pub mod report;

pub use outcome::{batch_failed, StopOutcome, StopResult};
pub use process::{format_elapsed, ProcessEntry, ServiceProcess};
pub use report::StatusReport;
