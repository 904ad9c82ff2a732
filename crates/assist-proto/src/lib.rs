//! Shared types for the music assistant: the organize request contract, the
//! organized-result model, the backend HTTP client, and on-disk config.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod platform;
pub mod request;
pub mod upload;
