//! Request and response types shared by the mesa command gateway.
//!
//! Everything here is a plain data transfer object: constructed per call,
//! compared structurally and discarded once converted into (or checked against)
//! persisted records.

mod domain;
pub use domain::*;

mod error;
pub use error::ModelError;

mod response;
pub use response::{Response, ResponseCode};
