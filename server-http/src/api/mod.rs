pub mod requests;
pub mod responses;

pub use requests::LookupParams;
pub use responses::{ApiError, ErrorResponse, HealthResponse};
