pub mod compute;
pub mod config;
pub mod entities;
pub mod grid;
pub mod input;
pub mod overlay;
pub mod resources;
pub mod scene;
