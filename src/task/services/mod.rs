//! Application services for task lifecycle and visibility.

mod visibility;
mod workflow;

pub use visibility::{
    TaskView, UNKNOWN_ASSET, UNKNOWN_LOCATION, VisibilityError, VisibilityResult,
    VisibilityService,
};
pub use workflow::{
    CompleteTaskRequest, CreateTaskRequest, TaskWorkflowError, TaskWorkflowResult,
    TaskWorkflowService,
};
