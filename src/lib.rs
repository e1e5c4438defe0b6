//! Tick-driven Snake simulation on a bounded tile grid.
//!
//! [`game::SimulationEngine`] owns the rules; everything under [`renderer`],
//! [`ui`] and [`terminal_runtime`] is the terminal driver that feeds it ticks
//! and key presses and draws its [`game::Snapshot`].

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
