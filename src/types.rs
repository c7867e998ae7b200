use std::fmt;

/// The level of a diagram: the number of variables it still branches on.
///
/// Terminals live at level 0; every non-terminal node has a level `>= 1` and
/// all its successors live exactly one level below.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Level(u32);

impl Level {
    /// The level of the `⊥` and `⊤` terminals.
    pub const TERMINAL: Level = Level(0);

    /// Creates a new level.
    pub const fn new(level: u32) -> Self {
        Level(level)
    }

    /// Returns the raw level value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns true for the terminal level 0.
    pub const fn is_terminal(self) -> bool {
        self.0 == 0
    }

    /// The level directly above this one.
    pub const fn up(self) -> Level {
        Level(self.0 + 1)
    }

    /// The level directly below this one.
    ///
    /// # Panics
    ///
    /// Debug-panics when called on the terminal level.
    pub fn down(self) -> Level {
        debug_assert!(self.0 > 0, "no level below the terminal level");
        Level(self.0 - 1)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl From<u32> for Level {
    fn from(level: u32) -> Self {
        Level::new(level)
    }
}

impl From<Level> for u32 {
    fn from(level: Level) -> Self {
        level.0
    }
}
