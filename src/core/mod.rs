//! Core library components shared by every command.

pub mod debrid;
pub mod discover;
pub mod docker;
pub mod env;
pub mod http;
pub mod poll;
pub mod render;
pub mod report;
pub mod service;
