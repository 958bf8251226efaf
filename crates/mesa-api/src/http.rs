use std::{collections::BTreeSet, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response as HttpResponse},
    routing::post,
};
use serde::{Deserialize, Serialize};

use mesa_model::{
    ConfigRewrite, Hosts, InstanceId, JobConfig, JobKey, Quota, Response, ResponseCode,
    ScheduleStatus, SessionKey, TaskId, TaskQuery,
};

use crate::{error::ApiError, handler::SchedulerApi};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: SchedulerApi,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with one `POST /api/v1/<command>` route per command.
    pub fn router(self) -> Router {
        Router::new()
            .route("/api/v1/create_job", post(create_job::<H>))
            .route("/api/v1/populate_job_config", post(populate_job_config::<H>))
            .route("/api/v1/start_cron_job", post(start_cron_job::<H>))
            .route("/api/v1/start_update", post(start_update::<H>))
            .route("/api/v1/restart_shards", post(restart_shards::<H>))
            .route("/api/v1/kill_tasks", post(kill_tasks::<H>))
            .route("/api/v1/get_tasks_status", post(get_tasks_status::<H>))
            .route("/api/v1/get_jobs", post(get_jobs::<H>))
            .route("/api/v1/set_quota", post(set_quota::<H>))
            .route("/api/v1/get_quota", post(get_quota::<H>))
            .route("/api/v1/force_task_state", post(force_task_state::<H>))
            .route("/api/v1/perform_backup", post(perform_backup::<H>))
            .route("/api/v1/rewrite_configs", post(rewrite_configs::<H>))
            .route("/api/v1/maintenance_status", post(maintenance_status::<H>))
            .route("/api/v1/start_maintenance", post(start_maintenance::<H>))
            .route("/api/v1/drain_hosts", post(drain_hosts::<H>))
            .route("/api/v1/end_maintenance", post(end_maintenance::<H>))
            .with_state(self.handler)
    }
}

/// HTTP status carrying a response code.
pub fn status_for(code: ResponseCode) -> StatusCode {
    match code {
        ResponseCode::Ok | ResponseCode::Warning => StatusCode::OK,
        ResponseCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ResponseCode::AuthFailed => StatusCode::UNAUTHORIZED,
        ResponseCode::Error => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON envelope sent back for every command.
#[derive(Debug)]
pub struct Reply<T>(pub Response<T>);

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> HttpResponse {
        (status_for(self.0.code), Json(self.0)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> HttpResponse {
        Reply(Response::<()>::from(self)).into_response()
    }
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobRequest {
    session: SessionKey,
    job: JobConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PopulateRequest {
    job: JobConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobKeyRequest {
    session: SessionKey,
    key: JobKey,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestartShardsRequest {
    session: SessionKey,
    key: JobKey,
    shards: BTreeSet<InstanceId>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KillTasksRequest {
    session: SessionKey,
    query: TaskQuery,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    query: TaskQuery,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoleRequest {
    role: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetQuotaRequest {
    session: SessionKey,
    role: String,
    quota: Quota,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForceTaskStateRequest {
    session: SessionKey,
    task_id: TaskId,
    status: ScheduleStatus,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRequest {
    session: SessionKey,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewriteRequest {
    session: SessionKey,
    rewrites: Vec<ConfigRewrite>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HostsRequest {
    session: SessionKey,
    hosts: Hosts,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/create_job
async fn create_job<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<JobRequest>,
) -> impl IntoResponse {
    Reply(handler.create_job(req.job, &req.session).await)
}

/// POST /api/v1/populate_job_config
async fn populate_job_config<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<PopulateRequest>,
) -> impl IntoResponse {
    Reply(handler.populate_job_config(req.job).await)
}

/// POST /api/v1/start_cron_job
async fn start_cron_job<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<JobKeyRequest>,
) -> impl IntoResponse {
    Reply(handler.start_cron_job(&req.key, &req.session).await)
}

/// POST /api/v1/start_update
async fn start_update<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<JobRequest>,
) -> impl IntoResponse {
    Reply(handler.start_update(req.job, &req.session).await)
}

/// POST /api/v1/restart_shards
async fn restart_shards<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<RestartShardsRequest>,
) -> impl IntoResponse {
    Reply(
        handler
            .restart_shards(&req.key, req.shards, &req.session)
            .await,
    )
}

/// POST /api/v1/kill_tasks
async fn kill_tasks<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<KillTasksRequest>,
) -> impl IntoResponse {
    Reply(handler.kill_tasks(req.query, &req.session).await)
}

/// POST /api/v1/get_tasks_status
async fn get_tasks_status<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<QueryRequest>,
) -> impl IntoResponse {
    Reply(handler.get_tasks_status(req.query).await)
}

/// POST /api/v1/get_jobs
async fn get_jobs<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<RoleRequest>,
) -> impl IntoResponse {
    Reply(handler.get_jobs(&req.role).await)
}

/// POST /api/v1/set_quota
async fn set_quota<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<SetQuotaRequest>,
) -> impl IntoResponse {
    Reply(handler.set_quota(&req.role, req.quota, &req.session).await)
}

/// POST /api/v1/get_quota
async fn get_quota<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<RoleRequest>,
) -> impl IntoResponse {
    Reply(handler.get_quota(&req.role).await)
}

/// POST /api/v1/force_task_state
async fn force_task_state<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<ForceTaskStateRequest>,
) -> impl IntoResponse {
    Reply(
        handler
            .force_task_state(req.task_id, req.status, &req.session)
            .await,
    )
}

/// POST /api/v1/perform_backup
async fn perform_backup<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<SessionRequest>,
) -> impl IntoResponse {
    Reply(handler.perform_backup(&req.session).await)
}

/// POST /api/v1/rewrite_configs
async fn rewrite_configs<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<RewriteRequest>,
) -> impl IntoResponse {
    Reply(handler.rewrite_configs(req.rewrites, &req.session).await)
}

/// POST /api/v1/maintenance_status
async fn maintenance_status<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<HostsRequest>,
) -> impl IntoResponse {
    Reply(handler.maintenance_status(req.hosts, &req.session).await)
}

/// POST /api/v1/start_maintenance
async fn start_maintenance<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<HostsRequest>,
) -> impl IntoResponse {
    Reply(handler.start_maintenance(req.hosts, &req.session).await)
}

/// POST /api/v1/drain_hosts
async fn drain_hosts<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<HostsRequest>,
) -> impl IntoResponse {
    Reply(handler.drain_hosts(req.hosts, &req.session).await)
}

/// POST /api/v1/end_maintenance
async fn end_maintenance<H: SchedulerApi>(
    State(handler): State<Arc<H>>,
    Json(req): Json<HostsRequest>,
) -> impl IntoResponse {
    Reply(handler.end_maintenance(req.hosts, &req.session).await)
}
