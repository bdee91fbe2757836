//! Code Audit Library
//!
//! This crate provides the command-dispatch shell for the code audit editor
//! integration: it registers named commands with a host, and when one is
//! invoked it either launches the external analysis script in a terminal or
//! shows a status message.

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod host;
pub mod session;
