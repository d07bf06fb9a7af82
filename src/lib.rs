//! Traveling Dragon: a flappy-style arcade game.
//!
//! The library holds the whole simulation (bird physics, pipes, scoring, level
//! progression, the screen state machine and the player store). The binary is a
//! thin terminal front end over `engine::GameEngine`.

pub mod bird;
pub mod compute;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod menu;
pub mod pipe;
pub mod players;
pub mod scenario;
