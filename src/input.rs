/// Keyboard and mouse state, folded into per-frame intent flags.
///
/// Input model: instead of acting on each key event individually, the
/// `KeyTracker` records the frame number of the last press/repeat event for
/// every key.  Each frame `snapshot` reports which keys are still "fresh"
/// (within `HOLD_WINDOW` frames), so Space + A/D can be held at the same
/// time with no interference.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;

use crossterm::event::KeyCode;

/// A key counts as held if its last repeat arrived within this many frames.
/// OS key-repeat runs at ≥ 15 Hz, i.e. at most 4 frames apart at 60 FPS.
pub const HOLD_WINDOW: u64 = 5;

/// Window used until the first repeat arrives; covers the OS delay
/// before key-repeat starts (≈ 500 ms).
pub const INITIAL_HOLD: u64 = 30;

/// Intent flags read once at the start of each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// The gameplay meaning of a key, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

pub fn intent_for(code: &KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Intent::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::Down),
        KeyCode::Char(' ') => Some(Intent::Fire),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug)]
struct Held {
    first: u64,
    last: u64,
}

impl Held {
    fn fresh(frame: u64) -> Self {
        Held { first: frame, last: frame }
    }

    fn is_live(&self, frame: u64) -> bool {
        let window = if self.first == self.last { INITIAL_HOLD } else { HOLD_WINDOW };
        frame.saturating_sub(self.last) <= window
    }
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashMap<Intent, Held>,
    mouse_fire: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or repeat.  Unmapped keys are ignored.
    pub fn press(&mut self, code: &KeyCode, frame: u64) {
        if let Some(intent) = intent_for(code) {
            // An expired hold without a release starts over as a new press
            self.held
                .entry(intent)
                .and_modify(|h| {
                    if h.is_live(frame) {
                        h.last = frame;
                    } else {
                        *h = Held::fresh(frame);
                    }
                })
                .or_insert(Held::fresh(frame));
        }
    }

    pub fn release(&mut self, code: &KeyCode) {
        if let Some(intent) = intent_for(code) {
            self.held.remove(&intent);
        }
    }

    pub fn set_mouse_fire(&mut self, down: bool) {
        self.mouse_fire = down;
    }

    /// Forget everything, e.g. after a restart.
    pub fn clear(&mut self) {
        self.held.clear();
        self.mouse_fire = false;
    }

    fn is_held(&self, intent: Intent, frame: u64) -> bool {
        self.held.get(&intent).is_some_and(|h| h.is_live(frame))
    }

    pub fn snapshot(&self, frame: u64) -> InputState {
        InputState {
            left: self.is_held(Intent::Left, frame),
            right: self.is_held(Intent::Right, frame),
            up: self.is_held(Intent::Up, frame),
            down: self.is_held(Intent::Down, frame),
            fire: self.mouse_fire || self.is_held(Intent::Fire, frame),
        }
    }
}
