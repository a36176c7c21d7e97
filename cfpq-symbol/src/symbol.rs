use std::num::NonZeroU32;

/// A common grammar symbol type.
///
/// Symbols are dense: the first generated symbol has index `0`, which makes them
/// usable as row and column indices of bit sets and bit matrices.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Symbol {
    n: NonZeroU32,
}

impl Default for Symbol {
    fn default() -> Self {
        Self::first()
    }
}

impl Symbol {
    /// The symbol with index `0`.
    pub fn first() -> Self {
        Symbol { n: NonZeroU32::MIN }
    }

    /// Cast the symbol's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        self.n.get() as usize - 1
    }
}

impl From<usize> for Symbol {
    #[inline]
    fn from(id: usize) -> Self {
        let id = u32::try_from(id).expect("symbol id out of range");
        Symbol {
            n: NonZeroU32::new(id.wrapping_add(1)).expect("ran out of Symbol space?"),
        }
    }
}

impl From<Symbol> for u32 {
    fn from(sym: Symbol) -> u32 {
        sym.n.get() - 1
    }
}
