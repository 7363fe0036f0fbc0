// storefront-cart/src/flow/mod.rs

//! A small async step runner.
//!
//! A [`Flow`] is an ordered list of named steps. Each step carries `before`,
//! `on` and `after` handlers that operate on a shared [`FlowContext`], an
//! optional flag, and an optional skip condition evaluated right before the
//! step runs. The cart provider describes each of its mutations as a flow so
//! the guest and authenticated paths are visible as skipped or executed steps
//! in the trace output.

pub mod context;
pub mod control;
pub mod definition;
pub mod error;
pub mod execution;
pub mod hooks;
pub mod step;

pub use context::{FlowContext, Handler};
pub use control::{FlowControl, FlowOutcome};
pub use definition::Flow;
pub use error::{FlowError, FlowResult};
pub use step::{SkipCondition, StepDef};
