use std::collections::BTreeSet;

use tracing::{debug, instrument};

use mesa_model::{Capability, Response, ResponseCode, SessionKey, TaskQuery};

use crate::{error::ApiError, gateway::SchedulerGateway};

pub(crate) const TASKS_KILLED: &str = "Tasks killed.";
pub(crate) const KILL_TIMED_OUT: &str = "Tasks were not killed in time.";

impl SchedulerGateway {
    #[instrument(level = "debug", skip_all, fields(user = %session.user))]
    pub(crate) async fn kill_tasks_body(
        &self,
        query: TaskQuery,
        session: &SessionKey,
    ) -> Result<Response<()>, ApiError> {
        if query.has_blank_job_name() {
            return Err(ApiError::invalid("job name must not be blank"));
        }

        self.authorize_kill(&query, session).await?;
        self.scheduler.kill_tasks(&query, &session.user).await?;
        self.await_killed(query).await
    }

    /// ROOT may kill anything; otherwise the caller must act for every owning role.
    async fn authorize_kill(
        &self,
        query: &TaskQuery,
        session: &SessionKey,
    ) -> Result<(), ApiError> {
        if self
            .authorizer
            .check_capability(session, Capability::Root)
            .is_ok()
        {
            return Ok(());
        }

        let mut roles: BTreeSet<String> = self
            .store
            .fetch_tasks(query)
            .await?
            .iter()
            .filter_map(|task| task.role().map(str::to_owned))
            .collect();
        if roles.is_empty()
            && let Some(role) = &query.role
        {
            roles.insert(role.clone());
        }
        if roles.is_empty() {
            return Err(ApiError::invalid(
                "no role could be resolved from the query",
            ));
        }

        for role in &roles {
            self.authorizer.check_role(session, role)?;
        }
        Ok(())
    }

    /// Poll with backoff until no task matching `query` is active.
    async fn await_killed(&self, query: TaskQuery) -> Result<Response<()>, ApiError> {
        let wait = self.config.kill_wait;
        let active = query.active();

        let mut attempt = 0;
        loop {
            if self.store.fetch_tasks(&active).await?.is_empty() {
                return Ok(Response::with_code(ResponseCode::Ok, TASKS_KILLED));
            }
            if attempt >= wait.max_attempts {
                return Err(ApiError::Error(KILL_TIMED_OUT.into()));
            }

            let delay = wait.delay(attempt);
            debug!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                "tasks still active"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
