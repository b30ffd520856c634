// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use thiserror::Error;

/// Errors raised while building, validating or loading a tile grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixtureError {
    #[error("grid dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: usize, height: usize },

    #[error("draw range [{min}, {max}] is empty")]
    EmptyDrawRange { min: u32, max: u32 },

    #[error("classification rule {0} has a modulus of zero")]
    ZeroModulus(usize),

    #[error("border walls need a grid at least 2 rows tall, got {0}")]
    GridTooShort(usize),

    #[error("fixture should be {expected} bytes long, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid tile value {value:#04x} at index {index}")]
    InvalidTile { index: usize, value: u8 },
}
