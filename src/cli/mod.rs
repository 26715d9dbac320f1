//! CLI command handlers

pub mod commands;

pub use commands::{check_template, context, render, ContextFormat};
