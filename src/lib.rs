//! Top-down cave shooter: procedural map generation and the headless
//! simulation core. The terminal front end lives in the binary.

pub mod bullet;
pub mod camera;
pub mod cave;
pub mod collision;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod noise;
pub mod player;
pub mod world;
