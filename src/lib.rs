pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod highscore;
pub mod hud;
pub mod input;
