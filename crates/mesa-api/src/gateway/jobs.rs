use std::collections::BTreeSet;

use tracing::{debug, instrument};

use mesa_core::parse_job;
use mesa_model::{
    InstanceId, JobConfig, JobKey, Response, ResponseCode, SessionKey, StartUpdateResult,
    TaskConfig,
};

use crate::{error::ApiError, gateway::SchedulerGateway};

impl SchedulerGateway {
    #[instrument(level = "debug", skip_all, fields(job = %job.key))]
    pub(crate) async fn create_job_body(&self, job: JobConfig) -> Result<Response<()>, ApiError> {
        let parsed = parse_job(&job, &self.config.limits())?;
        let instances = parsed.instance_count();

        self.scheduler.create_job(parsed).await?;
        debug!(instances, "job admitted");
        Ok(Response::empty(ResponseCode::Ok))
    }

    pub(crate) async fn populate_body(
        &self,
        job: JobConfig,
    ) -> Result<Response<TaskConfig>, ApiError> {
        let (_, task_configs) = parse_job(&job, &self.config.limits())?.into_parts();
        task_configs
            .into_iter()
            .next()
            .map(Response::ok)
            .ok_or_else(|| ApiError::invalid("job expanded to no tasks"))
    }

    pub(crate) async fn start_cron_job_body(&self, key: &JobKey) -> Result<Response<()>, ApiError> {
        self.scheduler.start_cron_job(key).await?;
        Ok(Response::empty(ResponseCode::Ok))
    }

    #[instrument(level = "debug", skip_all, fields(job = %job.key))]
    pub(crate) async fn start_update_body(
        &self,
        job: JobConfig,
    ) -> Result<Response<StartUpdateResult>, ApiError> {
        let parsed = parse_job(&job, &self.config.limits())?;
        let token = self.scheduler.initiate_job_update(parsed).await?;

        debug!(rolling = token.is_some(), "update initiated");
        Ok(Response::ok(StartUpdateResult::from_token(token)))
    }

    pub(crate) async fn restart_shards_body(
        &self,
        key: &JobKey,
        shards: BTreeSet<InstanceId>,
        session: &SessionKey,
    ) -> Result<Response<()>, ApiError> {
        self.scheduler
            .restart_shards(key, &shards, &session.user)
            .await?;
        Ok(Response::empty(ResponseCode::Ok))
    }
}
