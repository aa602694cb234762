// src/config/mod.rs
pub mod engine;

pub use engine::{EngineConfig, HotReloadConfig, DEFAULT_ENGINE_CONFIG_PATH, ENV_ENGINE_CONFIG_PATH};
