pub mod app;
pub mod client;
pub mod conf;
pub mod errors;
pub mod transform;
pub mod trigger;
