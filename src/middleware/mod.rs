pub mod auth;
pub mod response;
pub mod validate_json;
pub mod validate_query;

pub use auth::{authenticate_jwt, Admin, AuthUser, CorrectUserOrAdmin};
pub use response::{ApiResponse, ApiResult};
pub use validate_json::ValidatedJson;
pub use validate_query::{validate_company_query, validate_job_query};
