//! HTTP middleware

pub mod panic_recovery;
pub mod request_id;

pub use panic_recovery::PanicRecoveryMiddleware;
pub use request_id::{get_request_id, RequestIdData, RequestIdMiddleware};
