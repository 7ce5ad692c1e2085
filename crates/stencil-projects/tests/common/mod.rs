//! Common test utilities for stencil-projects
//!
//! - A scripted command runner that simulates the package registry
//! - Workspace and configuration fixtures

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
