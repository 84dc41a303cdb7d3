//! `CharSlot`: The display record of one committed character.
//!
//! A slot carries a character, its natural position inside the chunk it
//! was committed with, and the signed offset to its shuffled display rank:
//!
//! ```text
//! natural:   T  H  E  _  Q      index         0  1  2  3  4
//! shuffled:  H  T  E  Q  _      index + delta 1  0  2  4  3
//! ```

/// Index value that marks a slot as blank ("no data yet").
pub const BLANK_INDEX: i32 = -1;

/// One committed character and its shuffle metadata.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharSlot {
    /// Position within the commit chunk, in natural reading order.
    /// [`BLANK_INDEX`] for the blank sentinel.
    pub index: i32,
    /// The character to display.
    pub ch: char,
    /// Offset from `index` to the locally shuffled display rank.
    pub readable_delta: i32,
}

impl CharSlot {
    /// Create a slot for a committed character.
    #[inline]
    pub const fn new(index: i32, ch: char, readable_delta: i32) -> Self {
        Self {
            index,
            ch,
            readable_delta,
        }
    }

    /// The blank sentinel: a space with no position.
    #[inline]
    pub const fn blank() -> Self {
        Self::new(BLANK_INDEX, ' ', 0)
    }

    /// Check whether this is the blank sentinel.
    #[inline]
    pub const fn is_blank(&self) -> bool {
        self.index == BLANK_INDEX
    }

    /// The shuffled display rank, `index + readable_delta`.
    #[inline]
    pub const fn displaced_position(&self) -> i32 {
        self.index + self.readable_delta
    }
}

impl Default for CharSlot {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_slot() {
        let slot = CharSlot::blank();
        assert!(slot.is_blank());
        assert_eq!(slot.ch, ' ');
        assert_eq!(slot.readable_delta, 0);
        assert_eq!(CharSlot::default(), slot);
    }

    #[test]
    fn test_displaced_position() {
        let slot = CharSlot::new(4, 'Q', -1);
        assert!(!slot.is_blank());
        assert_eq!(slot.displaced_position(), 3);
    }
}
