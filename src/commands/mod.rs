pub mod task;

pub use task::{run_task, RunSummary, TaskRequest};
