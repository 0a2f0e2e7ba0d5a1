//! Runtime crate for the Rota GitHub triage bot.
//!
//! Wires the webhook server to per-event handlers, the board sync protocol,
//! and comment-command dispatch.

pub mod github_triage_runtime;

pub use github_triage_runtime::{
    run_github_triage_server, BoardConfig, GithubTriageRuntime, GithubTriageRuntimeConfig,
    PriorityOptionMap, StatusOptionMap,
};
