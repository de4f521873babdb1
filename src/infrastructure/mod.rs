pub mod config;
pub mod http;
pub mod pdf;
pub mod repositories;
pub mod retention;
