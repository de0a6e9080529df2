// handlers/mod.rs
//
// Pages go through the access gate. /api/* handlers are exempt from it; only
// the session endpoints look at the session cookie.
pub mod auth;
pub mod health;
pub mod pages;
