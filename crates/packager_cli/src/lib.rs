//! Terminal front end for the web app packager.
pub mod cli;
pub mod config;
pub mod effects;
pub mod interactive;
pub mod render;
pub mod session;

pub use config::{ConfigError, FileConfig, Settings};
pub use effects::EffectRunner;
pub use session::Session;
