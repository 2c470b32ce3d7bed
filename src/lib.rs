//! ASP.NET Core buildpack
//!
//! Compile stage of the .NET Core buildpack: finds the app's projects,
//! picks the .NET SDK, installs it with its native dependencies, restores
//! packages and keeps everything it can in the buildpack cache.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod pipeline;
pub mod project;
pub mod sdk;
pub mod shell;
pub mod text;
pub mod ui;

pub use error::{BuildpackError, BuildpackResult};
