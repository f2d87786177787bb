//! Host-facing input record
//!
//! Keyboard and touch handlers only flip these flags; the simulation reads
//! the record once per tick and consumes the jump edge. The core never
//! sees raw events.

/// Held and edge-triggered input flags for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Jump key currently held; used to debounce repeats into one edge
    pub jump: bool,
    /// Set on a fresh press, consumed by the next tick
    pub jump_pressed: bool,
}

impl InputState {
    /// Apply a key-down event. Returns whether the key was recognized.
    pub fn key_down(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" => {
                self.left = true;
                true
            }
            "ArrowRight" => {
                self.right = true;
                true
            }
            " " | "w" | "W" => {
                self.press_jump();
                true
            }
            _ => false,
        }
    }

    /// Apply a key-up event. Returns whether the key was recognized.
    pub fn key_up(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" => {
                self.left = false;
                true
            }
            "ArrowRight" => {
                self.right = false;
                true
            }
            " " | "w" | "W" => {
                self.release_jump();
                true
            }
            _ => false,
        }
    }

    /// Arm the jump edge. Key auto-repeat and held touch buttons deliver
    /// repeated press events; only the first one past a release counts.
    pub fn press_jump(&mut self) {
        if !self.jump {
            self.jump_pressed = true;
        }
        self.jump = true;
    }

    pub fn release_jump(&mut self) {
        self.jump = false;
    }
}
