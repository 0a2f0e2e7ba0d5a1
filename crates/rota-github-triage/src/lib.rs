//! Shared helpers for the Rota GitHub triage bot runtime.
//! This crate provides the webhook payload model, label normalization,
//! priority resolution, comment-command parsing, and comment rendering
//! helpers consumed by the runtime crate.

pub mod label_helpers;
pub mod priority;
pub mod triage_command;
pub mod triage_render;
pub mod triage_template;
pub mod webhook_payload;
