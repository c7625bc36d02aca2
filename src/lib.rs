pub mod compute;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod input;
pub mod logging;
pub mod timers;
pub mod world;
