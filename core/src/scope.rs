//! Generation tags for view-scoped requests.
//!
//! Every mounted view gets a fresh [`Generation`]. Requests carry the
//! generation that was current when they were issued; a response whose
//! generation no longer matches belongs to a view that has been replaced
//! and must be dropped.

use std::fmt;

/// Identifier of one mounted view lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Generation before any view has been mounted
    #[must_use]
    pub const fn initial() -> Self {
        Self(0)
    }

    /// The generation that follows this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Tracks which view generation is current
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewScope {
    current: Generation,
}

impl ViewScope {
    /// Create a scope with no mounted view
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Generation::initial(),
        }
    }

    /// Generation of the currently mounted view
    #[must_use]
    pub const fn current(&self) -> Generation {
        self.current
    }

    /// Retire the current view and return the generation of the next one
    pub const fn advance(&mut self) -> Generation {
        self.current = self.current.next();
        self.current
    }

    /// Whether a response tagged with `generation` belongs to the mounted view
    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current == generation
    }
}
