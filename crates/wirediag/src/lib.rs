//! Wiring diagrams for beginner GPIO electronics projects.
//!
//! A [`project::Project`] names a controller and the parts wired to it. The
//! [`diagram`] module places those parts on a canvas and routes one wire per
//! pin with the greedy orthogonal router in [`routing`]; [`render`] turns
//! the result into a PNG.

pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod diagram;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod project;
pub mod rails;
pub mod render;
pub mod routing;
pub mod theme;

pub use error::{Result, WiringError};
