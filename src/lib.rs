pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod events;
pub mod look;
pub mod scene;
pub mod schedule;
pub mod spawner;
pub mod sprite;
pub mod timer;
