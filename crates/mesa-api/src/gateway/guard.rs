use std::{future::Future, time::Instant};

use tracing::{Instrument, debug_span};

use mesa_core::Requirement;
use mesa_model::{Response, SessionKey};

use crate::{error::ApiError, gateway::SchedulerGateway, gateway::outcome::log_outcome};

impl SchedulerGateway {
    /// Run a command body, turning its error into the response envelope.
    ///
    /// The outcome is logged and reported to the metrics backend exactly once.
    pub(crate) async fn run<T, Fut>(&self, command: &'static str, body: Fut) -> Response<T>
    where
        Fut: Future<Output = Result<Response<T>, ApiError>>,
    {
        let started = Instant::now();
        let response = body
            .instrument(debug_span!("command", command))
            .await
            .unwrap_or_else(Response::from);

        log_outcome(command, &response);
        self.metrics
            .record_command(command, response.code, started.elapsed());
        response
    }

    /// Authorize `session` against `requirement`, then run the body.
    ///
    /// The body is only constructed once authorization passed, so a denied command
    /// never reaches a collaborator.
    pub(crate) async fn guarded<T, F, Fut>(
        &self,
        command: &'static str,
        session: &SessionKey,
        requirement: Requirement,
        body: F,
    ) -> Response<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Response<T>, ApiError>>,
    {
        let authorized = self.authorizer.authorize(session, &requirement);
        self.run(command, async move {
            match authorized {
                Ok(()) => body().await,
                Err(e) => Err(ApiError::from(e)),
            }
        })
        .await
    }
}
