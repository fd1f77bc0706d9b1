//! Utility modules

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResponse, ok};
pub use logger::init_logger;
