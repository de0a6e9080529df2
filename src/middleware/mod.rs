pub mod access_gate;
pub mod response;
pub mod route_matcher;

pub use access_gate::access_gate;
pub use response::{ApiResponse, ApiResult};
