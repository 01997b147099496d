//! Mirror Orchestrator: sequences the pipeline stages and collects results

pub mod orchestrator;
pub mod progress;
pub mod report;

pub use orchestrator::SiteMirror;
pub use progress::{LogProgress, MirrorStage, NoOpProgress, ProgressReporter};
pub use report::{MirrorReport, PageFailure};
