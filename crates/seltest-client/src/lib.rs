// ABOUTME: Client library for the Selenium test generator backend
// ABOUTME: Models, model selection, app context, test plan generation, and script download

mod client;
mod error;
mod models;

pub use client::{SeltestClient, DEFAULT_ARCHIVE_NAME};
pub use error::{ApiError, Result};
pub use models::*;
