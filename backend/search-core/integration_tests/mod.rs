//! Integration tests for search-core.
//!
//! - `gemini_client`: REST client against a wiremock server
//! - `services`: search / weather / probe end to end over HTTP
//! - `settings`, `config`: filesystem round trips in temp directories
//! - `credential_env`: `.env` and environment loading (serialized)

mod config;
mod credential_env;
mod gemini_client;
mod helpers;
mod services;
mod settings;
