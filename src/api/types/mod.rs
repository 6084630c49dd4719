//! Shared API request and response types

pub mod error;
pub mod fields;
pub mod form;
pub mod response;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use fields::FieldErrors;
pub use form::{FieldValue, FormData, UploadedFile};
pub use response::AtomResponse;
