//! DOM embellishments: hover scramble, status flicker, card tilt
//!
//! Pure state and math only; `main` wires them to elements and timers.

use rand::Rng;

/// Scramble alphabet; only the letters are drawn as noise
pub const SCRAMBLE_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Scramble frame interval
pub const SCRAMBLE_INTERVAL_MS: i32 = 30;
/// Status flicker interval
pub const FLICKER_INTERVAL_MS: i32 = 100;
/// Duration of the text-shadow flash on button press
pub const UI_FLASH_MS: i32 = 100;
pub const UI_FLASH_SHADOW: &str = "0 0 5px rgba(255,255,255,0.8)";

/// Hover effect that resolves random letters back into the original text
#[derive(Debug, Clone)]
pub struct TextScramble {
    original: Vec<char>,
    /// Settled-prefix cursor, in thirds of a character
    thirds: usize,
}

impl TextScramble {
    pub fn new(text: &str) -> Self {
        Self {
            original: text.chars().collect(),
            thirds: 0,
        }
    }

    /// Produce the next frame and whether the effect is done
    ///
    /// Characters left of the iteration cursor are settled; the cursor moves
    /// a third of a character per frame.
    pub fn next_frame(&mut self, rng: &mut impl Rng) -> (String, bool) {
        let text = self
            .original
            .iter()
            .enumerate()
            .map(|(index, &letter)| {
                if index * 3 < self.thirds {
                    letter
                } else {
                    SCRAMBLE_LETTERS[rng.random_range(0..26)] as char
                }
            })
            .collect();

        let done = self.thirds >= self.original.len() * 3;
        self.thirds += 1;
        (text, done)
    }
}

/// Occasionally pick a new opacity for a status item
pub fn status_flicker(rng: &mut impl Rng) -> Option<f32> {
    if rng.random::<f32>() > 0.9 {
        Some(rng.random::<f32>() * 0.5 + 0.5)
    } else {
        None
    }
}

/// CSS transform leaning a card toward the pointer
///
/// `x`, `y` are relative to the card's top-left corner.
pub fn tilt_transform(x: f64, y: f64, width: f64, height: f64) -> String {
    let (rotate_x, rotate_y) = tilt_angles(x, y, width, height);
    format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) scale(1.02)",
        rotate_x, rotate_y
    )
}

/// Rotation in degrees around X and Y, each within ±7.5
pub fn tilt_angles(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    let x_pct = x / width - 0.5;
    let y_pct = y / height - 0.5;
    (y_pct * -15.0, x_pct * 15.0)
}

pub const TILT_RESET: &str = "perspective(1000px) rotateX(0) rotateY(0) scale(1)";

/// Label for the combat toggle button
pub fn combat_button_label(game_active: bool) -> &'static str {
    if game_active {
        "TERMINATE SIMULATION"
    } else {
        "COMBAT SIMULATION"
    }
}
