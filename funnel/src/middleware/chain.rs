use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{trace, warn};

use crate::error::DispatchError;
use crate::http_helpers::{RequestContext, ResponseBuilder};
use crate::traits_helpers::{Handler, Middleware, Next};

/// Where a dispatch currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Pending,
    RunningMiddleware(usize),
    RunningHandler,
    Complete,
    Failed,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchState::Pending => f.write_str("pending dispatch"),
            DispatchState::RunningMiddleware(stage) => write!(f, "middleware stage {}", stage),
            DispatchState::RunningHandler => f.write_str("route handler"),
            DispatchState::Complete => f.write_str("completed dispatch"),
            DispatchState::Failed => f.write_str("failed dispatch"),
        }
    }
}

/// Execution list for one dispatch: the matching middleware in registration order followed by
/// the terminal handler.
///
/// Stages run strictly one after another against the same context and builder. A stage may
/// await anything before advancing; the next stage does not start until it has.
pub struct MiddlewareChain {
    stages: Vec<Arc<dyn Middleware>>,
    handler: Arc<dyn Handler>,
    route: String,
    budget: Option<Duration>,
    state: DispatchState,
}

impl MiddlewareChain {
    pub fn new(
        stages: Vec<Arc<dyn Middleware>>,
        handler: Arc<dyn Handler>,
        route: impl Into<String>,
    ) -> Self {
        Self {
            stages,
            handler,
            route: route.into(),
            budget: None,
            state: DispatchState::Pending,
        }
    }

    /// Give every stage at most `budget` to finish; a stage that never advances then fails
    /// the dispatch instead of suspending it forever.
    pub fn with_budget(mut self, budget: Option<Duration>) -> Self {
        self.budget = budget;
        self
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub async fn execute(
        &mut self,
        ctx: &mut RequestContext,
        res: &mut ResponseBuilder,
    ) -> Result<(), DispatchError> {
        for stage in 0..self.stages.len() {
            self.state = DispatchState::RunningMiddleware(stage);
            trace!(stage, route = %self.route, "running middleware");

            let middleware = self.stages[stage].clone();
            let outcome = self
                .within_budget(middleware.handle(ctx, res, Next::new(stage)))
                .await;
            match outcome {
                Ok(Ok(advanced)) => debug_assert_eq!(advanced.stage(), stage),
                Ok(Err(source)) => {
                    self.state = DispatchState::Failed;
                    return Err(DispatchError::Middleware { stage, source });
                }
                Err(budget) => return Err(self.suspended(budget)),
            }
        }

        self.state = DispatchState::RunningHandler;
        trace!(route = %self.route, "running handler");

        let handler = self.handler.clone();
        let outcome = self.within_budget(handler.handle(ctx, res)).await;
        match outcome {
            Ok(Ok(())) => {
                self.state = DispatchState::Complete;
                Ok(())
            }
            Ok(Err(source)) => {
                self.state = DispatchState::Failed;
                Err(DispatchError::Handler {
                    route: self.route.clone(),
                    source,
                })
            }
            Err(budget) => Err(self.suspended(budget)),
        }
    }

    async fn within_budget<T>(&self, stage: impl Future<Output = T>) -> Result<T, Duration> {
        match self.budget {
            Some(budget) => tokio::time::timeout(budget, stage)
                .await
                .map_err(|_| budget),
            None => Ok(stage.await),
        }
    }

    fn suspended(&mut self, budget: Duration) -> DispatchError {
        let state = self.state;
        warn!(%state, ?budget, route = %self.route, "stage exceeded its budget");
        self.state = DispatchState::Failed;
        DispatchError::Suspended { state, budget }
    }
}
