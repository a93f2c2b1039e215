//! Worker Scaling Plot Library
//!
//! Core modules for rendering worker scaling benchmarks. The binary in
//! `main.rs` is a thin CLI over `pipeline`.

pub mod cli;
pub mod config;
pub mod pipeline;
pub mod profiling;
pub mod render;
pub mod scaling;
