pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod league_params;
pub mod request;
