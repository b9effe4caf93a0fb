mod error;
mod runs;

pub use error::{from_pipeline_error, ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use runs::{RunLeadRequest, RunResponse, RunTicketRequest};
