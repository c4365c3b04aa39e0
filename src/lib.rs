//! Resumatch resume optimization service
//!
//! Extracts plain text from uploaded resume documents (PDF, DOCX, TXT),
//! validates that the text looks like resume content, and delegates the
//! optimization itself to a hosted language model.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
