// storefront-cart/src/flow/execution.rs

//! `Flow::run`: walks the steps in order and drives their handlers.

use crate::flow::context::{FlowContext, Handler};
use crate::flow::control::{FlowControl, FlowOutcome};
use crate::flow::definition::Flow;
use crate::flow::error::FlowError;
use tracing::{event, instrument, Instrument, Level};

#[derive(Clone, Copy)]
enum Phase {
  Before,
  On,
  After,
}

impl Phase {
  fn as_str(self) -> &'static str {
    match self {
      Phase::Before => "before",
      Phase::On => "on",
      Phase::After => "after",
    }
  }
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step against `ctx`.
  ///
  /// A step whose skip condition holds is passed over. A non-optional step
  /// without any handler fails with [`FlowError::HandlerMissing`]; an
  /// optional one is passed over. The first handler error or `Stop` ends
  /// the run.
  #[instrument(
    name = "Flow::run",
    skip_all,
    fields(flow = %self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, ctx: FlowContext<TData>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      if let Some(skip_if) = &step_def.skip_if {
        if skip_if(&ctx) {
          event!(Level::DEBUG, step = step_name, "Step skipped by condition.");
          continue;
        }
      }

      let has_handlers = [&self.before, &self.on, &self.after]
        .iter()
        .any(|table| table.get(step_name).map_or(false, |v| !v.is_empty()));

      if !has_handlers {
        if step_def.optional {
          event!(Level::DEBUG, step = step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, step = step_name, "Non-optional step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      for (phase, table) in [(Phase::Before, &self.before), (Phase::On, &self.on), (Phase::After, &self.after)] {
        let Some(handlers) = table.get(step_name) else {
          continue;
        };
        if let FlowControl::Stop = run_phase(handlers, &ctx, step_name, step_idx, phase).await? {
          event!(Level::INFO, step = step_name, phase = phase.as_str(), "Flow stopped by a handler.");
          return Ok(FlowOutcome::Stopped);
        }
      }
      event!(Level::DEBUG, step = step_name, "Step finished.");
    }

    event!(Level::DEBUG, "Flow completed.");
    Ok(FlowOutcome::Completed)
  }
}

async fn run_phase<TData, Err>(
  handlers: &[Handler<TData, Err>],
  ctx: &FlowContext<TData>,
  step_name: &str,
  step_idx: usize,
  phase: Phase,
) -> Result<FlowControl, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  for (handler_idx, handler_fn) in handlers.iter().enumerate() {
    let span = tracing::debug_span!(
      "flow_handler",
      step = step_name,
      step_index = step_idx,
      phase = phase.as_str(),
      handler_index = handler_idx
    );
    match handler_fn(ctx.clone()).instrument(span).await {
      Ok(FlowControl::Continue) => {}
      Ok(FlowControl::Stop) => return Ok(FlowControl::Stop),
      Err(e) => {
        event!(Level::ERROR, step = step_name, phase = phase.as_str(), error = %e, "Handler failed.");
        return Err(e);
      }
    }
  }
  Ok(FlowControl::Continue)
}
