//! Command handlers

pub mod install;
