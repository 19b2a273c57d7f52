//! Addressing a single OS process by id.
//!
//! A handle is a capability, not a tracker: it holds no state and never
//! waits for the target to react.

mod handle;

pub use handle::ProcessHandle;
