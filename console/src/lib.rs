//! Fleetops Library
//!
//! Core modules for the remote fleet health and operations console.

pub mod catalog;
pub mod channel;
pub mod config;
pub mod errors;
pub mod health;
pub mod logs;
pub mod parse;
pub mod workflows;
