//! # Scratch Card
//!
//! Headless scratch-off widget. The rendering layer owns the actual canvas
//! and forwards pointer events here; this machine owns the overlay's alpha
//! buffer, the reveal threshold, and the prize.
//!
//! ## States
//!
//! - Idle: overlay intact, no pointer held down
//! - Scratching: pointer held down, moves erase circles of transparency
//! - Revealed: enough of the overlay erased, terminal
//!
//! Dragging is a separate flag from the reveal machine: it only gates whether
//! move events erase. Reveal progress is evaluated at drag-end.

use rand::{Rng, thread_rng};

/// Radius in pixels of the circle erased per pointer move.
pub const ERASE_RADIUS: f32 = 20.0;

/// Fraction of the overlay that must be erased before the card reveals.
pub const REVEAL_THRESHOLD: f32 = 0.5;

/// Pixels with alpha below this are counted as erased.
const ALPHA_CUTOFF: u8 = 128;

const DEFAULT_WIDTH: u32 = 320;
const DEFAULT_HEIGHT: u32 = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Scratching,
    Revealed,
}

pub struct ScratchCard {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
    dragging: bool,
    revealed: bool,
    reward: Option<u8>,
    on_complete: Option<Box<dyn FnOnce(u8)>>,
}

impl Default for ScratchCard {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl ScratchCard {
    /// Dimensions are fixed for the widget's lifetime; resize is unsupported.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![u8::MAX; (width * height) as usize],
            dragging: false,
            revealed: false,
            reward: None,
            on_complete: None,
        }
    }

    /// Fires at most once, with the reward value, when the card reveals.
    pub fn on_complete(mut self, callback: impl FnOnce(u8) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn pointer_down(&mut self) {
        if self.revealed {
            return;
        }

        self.dragging = true;

        if self.reward.is_none() {
            self.reward = Some(thread_rng().gen_range(5..=75));
        }
    }

    /// Erases a filled circle of [`ERASE_RADIUS`] around the pointer.
    /// Circles extending past the surface edge are clipped, never wrapped.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.dragging || self.revealed {
            return;
        }

        let min_x = ((x - ERASE_RADIUS).floor().max(0.0)) as u32;
        let max_x = ((x + ERASE_RADIUS).ceil().min((self.width - 1) as f32)).max(0.0) as u32;
        let min_y = ((y - ERASE_RADIUS).floor().max(0.0)) as u32;
        let max_y = ((y + ERASE_RADIUS).ceil().min((self.height - 1) as f32)).max(0.0) as u32;

        if x + ERASE_RADIUS < 0.0 || y + ERASE_RADIUS < 0.0 {
            return;
        }

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f32 - x;
                let dy = py as f32 - y;

                if dx * dx + dy * dy <= ERASE_RADIUS * ERASE_RADIUS {
                    self.alpha[(py * self.width + px) as usize] = 0;
                }
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;

        if self.revealed {
            return;
        }

        if self.coverage() > REVEAL_THRESHOLD {
            self.revealed = true;

            if let (Some(callback), Some(reward)) = (self.on_complete.take(), self.reward) {
                callback(reward);
            }
        }
    }

    /// A pointer leaving the surface mid-drag counts as a drag-end, otherwise
    /// the dragging flag would stick until the next pointer-up.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Erased fraction of the overlay. Walks the full alpha buffer, so this
    /// is O(width * height) per call.
    pub fn coverage(&self) -> f32 {
        let erased = self
            .alpha
            .iter()
            .filter(|&&alpha| alpha < ALPHA_CUTOFF)
            .count();

        erased as f32 / self.alpha.len() as f32
    }

    pub fn phase(&self) -> Phase {
        if self.revealed {
            Phase::Revealed
        } else if self.dragging {
            Phase::Scratching
        } else {
            Phase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn reward(&self) -> Option<u8> {
        self.reward
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
