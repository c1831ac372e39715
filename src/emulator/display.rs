//! The monochrome framebuffer that sprites are drawn onto.

use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

type Pixels = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Pixels = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// A 64x32 grid of pixels, stored row by row.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Pixels,
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer { pixels: EMPTY_SCREEN }
    }

    pub fn clear(&mut self) {
        self.pixels = EMPTY_SCREEN;
    }

    /// Whether the pixel at (`x`, `y`) is set. Coordinates outside of the screen are unset.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; SCREEN_WIDTH]> {
        self.pixels.iter()
    }

    /// Number of set pixels.
    pub fn lit(&self) -> usize {
        self.pixels.iter().flatten().filter(|p| **p).count()
    }

    /// XOR a sprite onto the screen with its top left corner at (`x`, `y`).
    /// Each byte of `sprite` is one row, most significant bit leftmost.
    /// The origin wraps around the screen, the sprite itself is clipped at the edges.
    /// Returns true if any set pixel was unset.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let x_coord = x % SCREEN_WIDTH;
        let y_coord = y % SCREEN_HEIGHT;

        let mut collision = false;
        for (dy, row) in sprite.iter().enumerate() {
            let y = y_coord + dy;
            if y >= SCREEN_HEIGHT {
                break;
            }
            for dx in 0..8 {
                let x = x_coord + dx;
                if x >= SCREEN_WIDTH {
                    break;
                }
                let new_pixel = (row >> (7 - dx)) & 1 == 1;
                let old_pixel = &mut self.pixels[y][x];

                // Set pixel is unset
                if *old_pixel && new_pixel {
                    collision = true;
                }
                *old_pixel ^= new_pixel;
            }
        }
        collision
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for pixel in row.iter() {
                write!(f, "{}", if *pixel { "#" } else { "." })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Framebuffer {{")?;
        write!(f, "{}", self)?;
        write!(f, "}}")
    }
}
