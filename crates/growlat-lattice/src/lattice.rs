//! [`GrowingLattice`]: the user-facing sparse lattice.

use std::cell::Cell;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::mem::size_of;
use std::path::Path;

use growlat_arena::ArenaConfig;
use growlat_codec::{
    decode_header, decode_site_info, decode_trailer, encode_header, encode_site_info,
    encode_trailer, CodecError,
};
use growlat_core::{LatticeError, Rect, SiteInfo, SiteKind, SiteValue};
use log::debug;

use crate::child::SquareRef;
use crate::diag::{InvariantViolation, MemoryReport};
use crate::persist::{read_tree, write_tree};
use crate::tree::SquareTree;

/// A sparse, unbounded lattice over `Z²` storing one `T` per site.
///
/// Every site starts out holding the `empty` value. Sites are stored in
/// `(2R+1)×(2R+1)` leaf blocks hung from a tree of 3×3 nodes that grows
/// outward from the origin as far sites are written. Regions that are
/// uniformly empty or uniformly `full` are compressed into single
/// sentinel slots, so a huge solid blob costs little more than its
/// boundary.
///
/// Lookups and writes remember the square where the last access ended and
/// start from there, so spatially local access patterns are fast. That
/// memory lives in a [`Cell`], which lets read queries take `&self` but
/// makes the lattice `!Sync`.
///
/// `R` must be at least 2; other values fail to compile.
///
/// # Examples
///
/// ```
/// use growlat_lattice::GrowingLattice;
///
/// let mut lattice: GrowingLattice<u8, 5> = GrowingLattice::new(0, 1).unwrap();
/// lattice.set(7, 100, -3);
/// assert_eq!(lattice.get(100, -3), 7);
/// assert_eq!(lattice.get(-1_000_000, 42), 0);
/// assert_eq!(lattice.non_empty_count(), 1);
/// ```
pub struct GrowingLattice<T, const R: usize = 30> {
    tree: SquareTree<T, R>,
    hint: Cell<SquareRef>,
    info: SiteInfo<T>,
}

impl<T: SiteValue, const R: usize> GrowingLattice<T, R> {
    const VALID_RADIUS: () = assert!(R >= 2, "leaf radius R must be at least 2");

    /// Create an all-empty lattice with default arena reservations.
    ///
    /// Fails if `empty == full` or if either sentinel does not equal
    /// itself.
    pub fn new(empty: T, full: T) -> Result<Self, LatticeError> {
        Self::with_config(empty, full, ArenaConfig::default())
    }

    /// Create an all-empty lattice reserving arena space per `config`.
    #[allow(clippy::eq_op)]
    pub fn with_config(empty: T, full: T, config: ArenaConfig) -> Result<Self, LatticeError> {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_RADIUS;
        for v in [empty, full] {
            if v != v {
                return Err(LatticeError::UnstableSentinel {
                    value: format!("{v:?}"),
                });
            }
        }
        if empty == full {
            return Err(LatticeError::IndistinctSentinels {
                value: format!("{empty:?}"),
            });
        }
        let tree = SquareTree::new(config);
        let hint = Cell::new(SquareRef::Node(tree.root()));
        Ok(Self {
            tree,
            hint,
            info: SiteInfo::new(empty, full),
        })
    }

    /// Make every site empty again, releasing the whole tree. The sentinels
    /// are kept.
    pub fn reset(&mut self) {
        self.tree.reset();
        self.info.clear_counts();
        self.hint.set(SquareRef::Node(self.tree.root()));
    }

    /// Value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> T {
        let (v, hint) = self.tree.get(x, y, self.hint.get(), &self.info);
        self.hint.set(hint);
        v
    }

    /// Store `v` at `(x, y)`.
    ///
    /// Writing a non-empty value extends the bounding box returned by
    /// [`range`](Self::range).
    ///
    /// # Panics
    ///
    /// If a value other than the current one is written to a site too far
    /// out for the tree to reach: the root radius would have to exceed
    /// `i64::MAX`.
    #[inline]
    pub fn set(&mut self, v: T, x: i64, y: i64) {
        if v != self.info.empty {
            self.info.record_non_empty(x, y);
        }
        let hint = self.tree.set(v, x, y, self.hint.get(), &mut self.info);
        debug_assert_eq!(self.tree.root_of(hint), self.tree.root());
        self.hint.set(hint);
    }

    /// Rectangle containing every site ever set to a non-empty value, or
    /// `None` while no site is non-empty.
    ///
    /// The box only grows: clearing sites back to empty does not shrink
    /// it.
    pub fn range(&self) -> Option<Rect> {
        (self.info.non_empty > 0).then_some(self.info.bbox)
    }

    /// Number of sites whose value is not the empty sentinel.
    pub fn non_empty_count(&self) -> i64 {
        self.info.non_empty
    }

    /// Number of sites holding the full sentinel.
    pub fn full_count(&self) -> i64 {
        self.info.full_count
    }

    /// The empty sentinel.
    pub fn empty_value(&self) -> T {
        self.info.empty
    }

    /// The full sentinel.
    pub fn full_value(&self) -> T {
        self.info.full
    }

    /// Classify the value at `(x, y)` against the sentinels.
    pub fn site_kind(&self, x: i64, y: i64) -> SiteKind {
        self.info.classify(self.get(x, y))
    }

    /// Sentinels and aggregate counters.
    pub fn info(&self) -> &SiteInfo<T> {
        &self.info
    }

    /// The full block holding `(x, y)`, or `None` if the site is not full.
    ///
    /// A full site stored in a leaf block yields the single point; a site
    /// inside a compressed full square yields that whole square.
    pub fn enclosing_rect_full(&self, x: i64, y: i64) -> Option<Rect> {
        let mut hint = self.hint.get();
        let r = self.tree.enclosing_rect_full(x, y, &mut hint, &self.info);
        self.hint.set(hint);
        r
    }

    /// Like [`enclosing_rect_full`](Self::enclosing_rect_full) but tries to
    /// extend the block over neighboring full squares. Slower, usually
    /// larger.
    ///
    /// ```
    /// use growlat_lattice::GrowingLattice;
    ///
    /// let mut lattice: GrowingLattice<u8, 2> = GrowingLattice::new(0, 1).unwrap();
    /// for x in -20..=20 {
    ///     for y in -20..=20 {
    ///         lattice.set(1, x, y);
    ///     }
    /// }
    /// let base = lattice.enclosing_rect_full(0, 0).unwrap();
    /// let better = lattice.improved_enclosing_rect_full(0, 0).unwrap();
    /// assert!(better.contains_rect(&base));
    /// ```
    pub fn improved_enclosing_rect_full(&self, x: i64, y: i64) -> Option<Rect> {
        let mut hint = self.hint.get();
        let r = self
            .tree
            .improved_enclosing_rect_full(x, y, &mut hint, &self.info);
        self.hint.set(hint);
        r
    }

    /// [`improved_enclosing_rect_full`](Self::improved_enclosing_rect_full)
    /// clipped so that the origin is excluded.
    ///
    /// Returns `None` at the origin itself. When the rectangle contains the
    /// origin it is cut along x if `|x| > |y|` and along y otherwise,
    /// keeping the side of the query site.
    pub fn improved_enclosing_not_zero(&self, x: i64, y: i64) -> Option<Rect> {
        if x == 0 && y == 0 {
            return None;
        }
        let mut r = self.improved_enclosing_rect_full(x, y)?;
        if r.contains(0, 0) {
            if x.unsigned_abs() > y.unsigned_abs() {
                if x > 0 {
                    r.x_min = 1;
                } else {
                    r.x_max = -1;
                }
            } else if y > 0 {
                r.y_min = 1;
            } else {
                r.y_max = -1;
            }
        }
        Some(r)
    }

    /// Write the lattice to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CodecError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.save_to(BufWriter::new(file))?;
        debug!("saved lattice to {}", path.display());
        Ok(())
    }

    /// Write the lattice to `writer` in the current format.
    pub fn save_to<W: Write>(&self, mut writer: W) -> Result<(), CodecError> {
        let w: &mut dyn Write = &mut writer;
        encode_header(w, T::WIDTH as u64, R as u64)?;
        encode_site_info(w, &self.info)?;
        write_tree(w, &self.tree)?;
        encode_trailer(w)?;
        w.flush()?;
        Ok(())
    }

    /// Replace the lattice with the one stored at `path`.
    ///
    /// On failure the lattice is left reset to empty.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), CodecError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                self.reset();
                debug!("cannot open lattice file {}: {err}", path.display());
                return Err(err.into());
            }
        };
        self.load_from(BufReader::new(file))?;
        debug!("loaded lattice from {}", path.display());
        Ok(())
    }

    /// Replace the lattice with the one read from `reader`.
    ///
    /// Both the current and the legacy framing are accepted. The stream
    /// must end right after the trailer. On failure the lattice is left
    /// reset to empty with its previous sentinels.
    pub fn load_from<Rd: Read>(&mut self, mut reader: Rd) -> Result<(), CodecError> {
        match Self::decode(&mut reader, self.tree.config()) {
            Ok((info, tree)) => {
                self.tree = tree;
                self.info = info;
                self.hint.set(SquareRef::Node(self.tree.root()));
                Ok(())
            }
            Err(err) => {
                self.reset();
                debug!("lattice load failed: {err}");
                Err(err)
            }
        }
    }

    fn decode(
        r: &mut dyn Read,
        config: ArenaConfig,
    ) -> Result<(SiteInfo<T>, SquareTree<T, R>), CodecError> {
        decode_header(r)?.validate(T::WIDTH as u64, R as u64)?;
        let info: SiteInfo<T> = decode_site_info(r)?;
        if info.empty == info.full {
            return Err(CodecError::malformed("empty and full sentinels are equal"));
        }
        let tree = read_tree(r, &info, config)?;
        decode_trailer(r)?;
        tree.check_invariants(&info)
            .map_err(|v| CodecError::malformed(v.to_string()))?;
        Ok((info, tree))
    }

    /// Human-readable summary; with `debug` the tree dump is appended.
    pub fn stats(&self, debug: bool) -> String {
        let memory = self.memory();
        let side = 2 * R + 1;
        let mut s = String::from("Growing lattice statistics\n");
        s.push_str(&format!("  -> R = {R} (each leaf is {side}x{side} sites)\n"));
        s.push_str(&format!(
            "  -> T = object of size {} bytes\n",
            size_of::<T>()
        ));
        s.push_str(&format!(
            "  -> number of non-empty sites = {}\n",
            self.info.non_empty
        ));
        s.push_str(&format!(
            "  -> number of full sites      = {}\n",
            self.info.full_count
        ));
        if let Some(r) = self.range() {
            s.push_str(&format!("  -> enclosing rectangle       = {r}\n"));
        }
        s.push_str(&format!("  -> tree depth       = {}\n", memory.depth));
        s.push_str(&format!("  -> number of nodes  = {}\n", memory.nodes));
        s.push_str(&format!("  -> number of leaves = {}\n", memory.leaves));
        s.push_str(&format!(
            "  -> memory used      = {} bytes ({} MB)\n",
            memory.bytes,
            memory.bytes / (1024 * 1024)
        ));
        if debug {
            s.push('\n');
            s.push_str(&self.debug_tree());
        }
        s
    }

    /// Memory held by the lattice, including the lattice object itself.
    pub fn memory(&self) -> MemoryReport {
        let mut report = self.tree.memory();
        report.bytes += size_of::<Self>() as u64;
        report
    }

    /// Depth of the tree: 1 while everything fits in the first 3×3 leaves.
    pub fn depth(&self) -> u32 {
        self.tree.depth(SquareRef::Node(self.tree.root()))
    }

    /// Indented dump of the tree structure.
    pub fn debug_tree(&self) -> String {
        self.tree.debug_tree()
    }

    /// Walk the whole tree and verify its structural invariants and the
    /// site counters.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.tree.check_invariants(&self.info)
    }
}

impl<T: SiteValue, const R: usize> Clone for GrowingLattice<T, R> {
    fn clone(&self) -> Self {
        let tree = self.tree.clone();
        let hint = Cell::new(SquareRef::Node(tree.root()));
        Self {
            tree,
            hint,
            info: self.info,
        }
    }
}

/// Two lattices are equal when their trees have the same shape and hold
/// the same values; sentinels are compared by role.
impl<T: SiteValue, const R: usize> PartialEq for GrowingLattice<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.tree.same_as(&other.tree)
    }
}

impl<T: SiteValue, const R: usize> fmt::Debug for GrowingLattice<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowingLattice")
            .field("radius", &R)
            .field("info", &self.info)
            .field("nodes", &self.tree.node_count())
            .field("leaves", &self.tree.leaf_count())
            .finish()
    }
}
