pub mod auth_guard;
pub mod request_log;

pub use auth_guard::AuthGuard;
pub use request_log::RequestLog;
