// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! Random draw sources used to pick a value for every grid cell.

use rand::{Rng, RngCore};

/// Something that can produce one integer draw per grid cell.
///
/// Generation only ever asks for values through this trait, so a fixed
/// sequence can stand in for a real random number generator.
pub trait DrawSource {
    /// Return a value in the inclusive range `[min, max]`.
    fn draw(&mut self, min: u32, max: u32) -> u32;
}

/// Adapts any `rand` generator into a [DrawSource] with uniform draws.
#[derive(Debug)]
pub struct RandDraw<R>(pub R);

impl<R: Rng> DrawSource for RandDraw<R> {
    fn draw(&mut self, min: u32, max: u32) -> u32 {
        self.0.gen_range(min..=max)
    }
}

/// Seed the shift register lands on after one step from `0x8988`.
pub const LFSR_DEFAULT_SEED: u16 = lfsr_step(0x8988);

/// A 16-bit linear-feedback shift register.
///
/// This is the generator the level builder runs on the console, where every
/// output is the high byte of the register. Bits 1 and 9 feed back into bit 15.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lfsr16 {
    state: u16,
}

const fn lfsr_step(state: u16) -> u16 {
    let feedback = ((state >> 9) ^ (state >> 1)) & 1;
    (feedback << 15) | (state >> 1)
}

impl Lfsr16 {
    /// Create a register from `seed`.
    ///
    /// A zero register would stay zero forever, so zero falls back to
    /// [LFSR_DEFAULT_SEED].
    pub fn new(seed: u16) -> Self {
        let state = if seed == 0 { LFSR_DEFAULT_SEED } else { seed };
        Lfsr16 { state }
    }

    /// Advance the register and return its new high byte.
    pub fn next_byte(&mut self) -> u8 {
        self.state = lfsr_step(self.state);
        (self.state >> 8) as u8
    }
}

impl Default for Lfsr16 {
    fn default() -> Self {
        Lfsr16::new(LFSR_DEFAULT_SEED)
    }
}

impl RngCore for Lfsr16 {
    fn next_u32(&mut self) -> u32 {
        u32::from_le_bytes([
            self.next_byte(),
            self.next_byte(),
            self.next_byte(),
            self.next_byte(),
        ])
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.next_byte();
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
