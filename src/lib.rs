pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod render;
pub mod schedule;
pub mod world;

pub use error::{AssetError, ConfigError, Error};
pub use world::World;
