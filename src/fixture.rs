//! Tile grid generation, loading and the commands built on them.
//!
//! For the fixture layout, see the crate documentation.

pub(crate) mod classify;
pub(crate) mod commands;
pub(crate) mod draw;
pub(crate) mod error;
pub(crate) mod grid;
pub(crate) mod tile;
