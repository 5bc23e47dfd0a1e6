//! Lumen host application: loads, resolves and reports configuration.

pub mod bootstrap;
