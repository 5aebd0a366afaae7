//! Wallrunner: a 2D platformer locomotion controller with double jump,
//! wall jump, wall run, slope sliding and gliding.

pub mod content;
pub mod movement;
