// storefront-cart/src/flow/control.rs

/// Returned by a handler to let the flow carry on or halt it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  Continue,
  /// Halt immediately. Remaining handlers and steps are not run.
  Stop,
}

/// How a full run ended when no handler failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  Completed,
  Stopped,
}
