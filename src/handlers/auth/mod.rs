// handlers/auth/mod.rs - Session and access-check endpoints under /api/auth

pub mod check_access;
pub mod session;

pub use check_access::check_access;
pub use session::{logout, session_get};
