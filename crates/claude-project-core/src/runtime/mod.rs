//! External tools used during scaffolding
//!
//! This module provides:
//! - A [`CommandRunner`] capability with a process-backed implementation
//! - Git repository bootstrap
//! - Package manager detection and install commands

pub mod command;
pub mod git;
pub mod package_manager;

pub use command::{CommandError, CommandRunner, ProcessRunner};
pub use git::bootstrap_repository;
pub use package_manager::PackageManager;
