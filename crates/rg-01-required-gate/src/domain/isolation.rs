//! Isolation of third-party component calls.
//!
//! Interceptors and listeners are foreign code. A panic inside one must not
//! unwind through the pipeline and abort its siblings.

use shared_types::ComponentFault;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Run a component call, turning a panic into [`ComponentFault::Failed`].
pub fn guarded_call<T, F>(call: F) -> Result<T, ComponentFault>
where
    F: FnOnce() -> Result<T, ComponentFault>,
{
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => Err(ComponentFault::Failed(format!(
            "panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
