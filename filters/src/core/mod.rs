//! Core configuration shared by every filter registry

pub mod config;
pub mod constants;
