//! Configuration section definitions.

mod assets;
mod dev_server;
mod serve;

pub use assets::{AssetsConfig, Environment};
pub use dev_server::DevServerConfig;
pub use serve::ServeConfig;
