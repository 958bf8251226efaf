use tracing::{debug, error, info, warn};

use mesa_model::{Response, ResponseCode};

#[inline]
pub(crate) fn message_for(code: ResponseCode) -> &'static str {
    match code {
        ResponseCode::Ok => "command succeeded",
        ResponseCode::Warning => "command accepted but not honored",
        ResponseCode::InvalidRequest => "command rejected as invalid",
        ResponseCode::AuthFailed => "command not authorized",
        ResponseCode::Error => "command failed",
    }
}

#[inline]
pub(crate) fn log_outcome<T>(command: &'static str, response: &Response<T>) {
    let msg = message_for(response.code);
    let detail = response.message.as_deref().unwrap_or("");

    match response.code {
        ResponseCode::Ok => debug!(command, code = %response.code, "{msg}"),
        ResponseCode::InvalidRequest => info!(command, code = %response.code, detail, "{msg}"),
        ResponseCode::Warning | ResponseCode::AuthFailed => {
            warn!(command, code = %response.code, detail, "{msg}")
        }
        ResponseCode::Error => error!(command, code = %response.code, detail, "{msg}"),
    }
}
