pub mod api;
pub mod client;
pub mod config;
mod error;
pub mod flow;
mod locale;
pub mod prompt;
pub mod shell;
pub mod view;

pub use client::RemoteClient;
pub use config::Config;
pub use error::{Error, Result};
pub use locale::Locale;
