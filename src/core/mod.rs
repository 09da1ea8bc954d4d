pub mod form;
pub mod handler;

pub use crate::domain::model::{ContactSubmission, EmailSendRequest, HandlerResult};
pub use crate::domain::ports::{EmailProvider, ProviderResponse};
pub use crate::utils::error::Result;
