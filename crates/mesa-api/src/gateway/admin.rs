use mesa_model::{
    Quota, Response, ResponseCode, ScheduleStatus, ScheduledTask, SessionKey, TaskId, TaskQuery,
};

use crate::{error::ApiError, gateway::SchedulerGateway};

impl SchedulerGateway {
    pub(crate) async fn set_quota_body(
        &self,
        role: &str,
        quota: Quota,
    ) -> Result<Response<()>, ApiError> {
        if !quota.is_non_negative() {
            return Err(ApiError::invalid(format!(
                "quota for {role} must not be negative"
            )));
        }
        self.quotas.set_quota(role, quota).await?;
        Ok(Response::empty(ResponseCode::Ok))
    }

    pub(crate) async fn get_quota_body(&self, role: &str) -> Result<Response<Quota>, ApiError> {
        Ok(Response::ok(self.quotas.get_quota(role).await?))
    }

    pub(crate) async fn force_task_state_body(
        &self,
        task_id: TaskId,
        status: ScheduleStatus,
        session: &SessionKey,
    ) -> Result<Response<()>, ApiError> {
        let message = format!("Transition forced by {}", session.user);
        self.scheduler
            .set_task_status(&TaskQuery::by_id(task_id), status, Some(message))
            .await?;
        Ok(Response::empty(ResponseCode::Ok))
    }

    pub(crate) async fn perform_backup_body(&self) -> Result<Response<()>, ApiError> {
        self.store.snapshot().await?;
        Ok(Response::empty(ResponseCode::Ok))
    }

    pub(crate) async fn get_tasks_status_body(
        &self,
        query: TaskQuery,
    ) -> Result<Response<Vec<ScheduledTask>>, ApiError> {
        Ok(Response::ok(self.store.fetch_tasks(&query).await?))
    }
}
