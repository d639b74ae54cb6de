use core::fmt;
use core::num::NonZeroU32;

/// Declares a dense, position-based handle into one of the graph's arenas.
///
/// The stored value is the arena slot plus one, so `Option<Handle>` costs
/// nothing extra.
macro_rules! arena_handle {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            pub fn from_index(slot: u32) -> Self {
                Self(NonZeroU32::MIN.saturating_add(slot))
            }

            /// Arena slot this handle points at.
            pub fn index(self) -> u32 {
                self.0.get() - 1
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "#{}"), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.index())
            }
        }
    };
}

arena_handle!(
    /// Handle to a feed, pipe or product node.
    NodeId,
    "n"
);
arena_handle!(
    /// Handle to a directed link between two nodes.
    EdgeId,
    "e"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_keep_their_slot() {
        assert_eq!(NodeId::from_index(0).index(), 0);
        assert_eq!(EdgeId::from_index(7).index(), 7);
        assert!(NodeId::from_index(1) < NodeId::from_index(2));
    }

    #[test]
    fn display_tags_the_arena() {
        assert_eq!(NodeId::from_index(3).to_string(), "n3");
        assert_eq!(EdgeId::from_index(0).to_string(), "e0");
        assert_eq!(format!("{:?}", NodeId::from_index(5)), "n#5");
    }

    #[test]
    fn optional_handle_has_no_overhead() {
        assert_eq!(size_of::<Option<NodeId>>(), size_of::<u32>());
    }
}
