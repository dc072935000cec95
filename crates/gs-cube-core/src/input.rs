//! Controller edge detection.
//!
//! Turns the pad's button word into newly-pressed buttons and maps the d-pad
//! to direction events. Holding a button fires once.

/// Button bits, active-high (set = pressed).
pub const PAD_SELECT: u16 = 0x0001;
pub const PAD_L3: u16 = 0x0002;
pub const PAD_R3: u16 = 0x0004;
pub const PAD_START: u16 = 0x0008;
pub const PAD_UP: u16 = 0x0010;
pub const PAD_RIGHT: u16 = 0x0020;
pub const PAD_DOWN: u16 = 0x0040;
pub const PAD_LEFT: u16 = 0x0080;
pub const PAD_L2: u16 = 0x0100;
pub const PAD_R2: u16 = 0x0200;
pub const PAD_L1: u16 = 0x0400;
pub const PAD_R1: u16 = 0x0800;
pub const PAD_TRIANGLE: u16 = 0x1000;
pub const PAD_CIRCLE: u16 = 0x2000;
pub const PAD_CROSS: u16 = 0x4000;
pub const PAD_SQUARE: u16 = 0x8000;

/// A d-pad direction event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Down, Direction::Right, Direction::Up];

    /// The button bit that produces this event.
    pub const fn button(self) -> u16 {
        match self {
            Direction::Left => PAD_LEFT,
            Direction::Right => PAD_RIGHT,
            Direction::Up => PAD_UP,
            Direction::Down => PAD_DOWN,
        }
    }
}

/// Buttons pressed since the previous poll.
pub fn edge(previous: u16, current: u16) -> u16 {
    current & !previous
}

/// Convert the pad's raw active-low word to active-high.
pub fn from_active_low(raw: u16) -> u16 {
    raw ^ 0xFFFF
}

/// Newly pressed buttons from one poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PadEdges(pub u16);

impl PadEdges {
    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Direction events in this edge set. Non d-pad bits are ignored.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |dir| self.0 & dir.button() != 0)
    }
}

/// Edge detector state carried between polls.
#[derive(Clone, Copy, Debug)]
pub struct PadState {
    previous: u16,
    connected: bool,
}

impl Default for PadState {
    fn default() -> Self {
        Self::new()
    }
}

impl PadState {
    pub const fn new() -> Self {
        Self {
            previous: 0,
            connected: true,
        }
    }

    /// Buttons held at the last poll (active-high).
    pub fn previous(&self) -> u16 {
        self.previous
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Feed an active-high button word and return the new presses.
    pub fn update(&mut self, current: u16) -> PadEdges {
        let edges = edge(self.previous, current);
        self.previous = current;
        PadEdges(edges)
    }

    /// Feed one raw poll result (`None` = disconnected).
    ///
    /// A disconnected pad yields no events and forgets held buttons, so a
    /// button still held on reconnect fires once.
    pub fn poll(&mut self, raw: Option<u16>) -> PadEdges {
        match raw {
            Some(raw) => {
                if !self.connected {
                    log::info!("pad reconnected");
                    self.connected = true;
                }
                self.update(from_active_low(raw))
            }
            None => {
                if self.connected {
                    log::warn!("pad disconnected, ignoring input");
                    self.connected = false;
                }
                self.previous = 0;
                PadEdges::default()
            }
        }
    }
}
