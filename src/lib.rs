//! HTTP gateway in front of an Ollama inference server.
//!
//! Callers post chat messages tagged with a session ID. The gateway keeps
//! each session's recent history in memory, forwards it to Ollama's
//! `/api/chat` endpoint and returns the generated reply.

pub mod api;
pub mod auth;
pub mod cli;
pub mod core;
pub mod ollama;
pub mod proxy;
pub mod session;
