mod config;
pub use config::{GatewayConfig, KillWaitConfig};

mod error;
pub use error::ApiError;

mod handler;
pub use handler::SchedulerApi;

mod gateway;
pub use gateway::{Collaborators, SchedulerGateway};

mod listing;
mod rewrite;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpApi, Reply};

#[cfg(feature = "http")]
pub use axum;
