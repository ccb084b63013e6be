pub mod catalog;
pub mod config;
pub mod discovery;
pub mod launch;
pub mod manifest;
pub mod menu;
pub mod model;
pub mod names;
pub mod shortcuts;

mod fs_util;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
