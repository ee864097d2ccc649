pub use config::*;
pub use config_serializer::*;

mod config;
mod config_serializer;
