//! Arena configuration parameters.

/// Initial reservations for the node and leaf slabs of a lattice tree.
///
/// The slabs grow on demand; reserving up front only avoids reallocation
/// when the caller knows roughly how large the lattice will get.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of node slots reserved at construction and on reset.
    ///
    /// Default: 64.
    pub node_capacity: usize,

    /// Number of leaf slots reserved at construction and on reset.
    ///
    /// Default: 64. Each leaf owns a `(2R+1)²` cell buffer allocated
    /// separately, so this only reserves the slot table.
    pub leaf_capacity: usize,
}

impl ArenaConfig {
    /// Default node reservation.
    pub const DEFAULT_NODE_CAPACITY: usize = 64;

    /// Default leaf reservation.
    pub const DEFAULT_LEAF_CAPACITY: usize = 64;

    /// Create a config with explicit reservations.
    pub fn new(node_capacity: usize, leaf_capacity: usize) -> Self {
        Self {
            node_capacity,
            leaf_capacity,
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NODE_CAPACITY, Self::DEFAULT_LEAF_CAPACITY)
    }
}
