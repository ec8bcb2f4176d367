//! Application services for the action lifecycle.

mod handlers;
mod lifecycle;
mod result;

pub use handlers::ActionHandlers;
pub use lifecycle::{
    ActionLifecycleService, ActionServiceError, ActionServiceResult, CreatedAction,
};
pub use result::ActionResult;
