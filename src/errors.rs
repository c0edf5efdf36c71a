//! Unified application error type.
//! All modules (core, cli, config, export) return AppError to keep the error
//! handling consistent and easy to manage.
//!
//! Core-state rejections (clocking in while outside the fence, toggling a
//! task while clocked out, over-allocating) are NOT errors: they degrade to
//! no-op outcomes or clamped values and never reach this type.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid time multiplier: {0} (expected 1, 10, 100 or 1000)")]
    InvalidMultiplier(i64),

    #[error("Invalid app variant: {0}")]
    InvalidVariant(String),

    #[error("Invalid allocation spec: {0}")]
    InvalidAllocation(String),

    #[error("Invalid task spec: {0}")]
    InvalidTaskSpec(String),

    // ---------------------------
    // Catalog lookups
    // ---------------------------
    #[error("Unknown task id: {0}")]
    UnknownTask(u32),

    #[error("Unknown project id: {0}")]
    UnknownProject(u32),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
