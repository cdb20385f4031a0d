// src/config/mod.rs

pub mod game_config;
pub mod rules;

pub use game_config::GameConfig;
