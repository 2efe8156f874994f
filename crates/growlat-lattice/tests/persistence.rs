//! Save/load through files and byte buffers, including every failure path.

use std::path::PathBuf;

use growlat_codec::{read_file_header, CodecError, FormatVersion, LEGACY_MAGIC, MAGIC};
use growlat_core::Rect;
use growlat_lattice::GrowingLattice;
use growlat_test_utils::fixtures::{disk, fill_rect};

type Lattice = GrowingLattice<u16, 3>;

// ── Helpers ─────────────────────────────────────────────────────

fn sample() -> Lattice {
    let mut l = Lattice::new(0, 1).unwrap();
    disk(&mut l, -12, 5, 25, 40);
    fill_rect(&mut l, Rect::new(200, 230, -3, 3), 7);
    l.set(1, -5_000, 9_000);
    l
}

fn bytes(l: &Lattice) -> Vec<u8> {
    let mut buf = Vec::new();
    l.save_to(&mut buf).unwrap();
    buf
}

/// Loading `buf` must fail with an error matching `pred` and leave the
/// target empty.
fn assert_load_fails(buf: &[u8], pred: impl Fn(&CodecError) -> bool) {
    let mut target = sample();
    let err = target.load_from(buf).unwrap_err();
    assert!(pred(&err), "unexpected error: {err}");
    assert_eq!(target.non_empty_count(), 0);
    assert_eq!(target.range(), None);
    assert_eq!(target, Lattice::new(0, 1).unwrap());
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("growlat-{}-{name}.glz2", std::process::id()))
}

// ── Round trips ─────────────────────────────────────────────────

#[test]
fn buffer_round_trip_preserves_everything() {
    let a = sample();
    let mut b = Lattice::new(0, 1).unwrap();
    b.load_from(bytes(&a).as_slice()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.info(), b.info());
    assert_eq!(b.get(-5_000, 9_000), 1);
    assert_eq!(b.get(215, 0), 7);
    b.check_invariants().unwrap();
}

#[test]
fn file_round_trip() {
    let a = sample();
    let path = scratch_path("round-trip");
    a.save(&path).unwrap();
    let header = read_file_header(&path).unwrap();
    assert_eq!(header.version, FormatVersion::Current);
    assert_eq!(header.value_width, Some(2));
    assert_eq!(header.radius, Some(3));
    let mut b = Lattice::new(0, 1).unwrap();
    b.load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(a, b);
}

#[test]
fn load_adopts_stored_sentinels() {
    let mut a = Lattice::new(5, 6).unwrap();
    a.set(6, 0, 0);
    a.set(9, 1, 0);
    let mut b = Lattice::new(0, 1).unwrap();
    b.load_from(bytes(&a).as_slice()).unwrap();
    assert_eq!(b.empty_value(), 5);
    assert_eq!(b.full_value(), 6);
    assert_eq!(b.get(100, 100), 5);
    assert_eq!(b.full_count(), 1);
}

#[test]
fn legacy_tag_loads() {
    let a = sample();
    let buf = bytes(&a);
    // legacy files have no width/radius header
    let mut legacy = LEGACY_MAGIC.to_vec();
    legacy.extend_from_slice(&buf[MAGIC.len() + 16..]);
    let mut b = Lattice::new(0, 1).unwrap();
    b.load_from(legacy.as_slice()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_lattice_round_trip() {
    let a = Lattice::new(0, 1).unwrap();
    let buf = bytes(&a);
    let mut b = sample();
    b.load_from(buf.as_slice()).unwrap();
    assert_eq!(a, b);
    assert_eq!(b.range(), None);
}

// ── Failures ────────────────────────────────────────────────────

#[test]
fn bad_magic_fails() {
    let mut buf = bytes(&sample());
    buf[0] = b'x';
    assert_load_fails(&buf, |e| matches!(e, CodecError::InvalidMagic { .. }));
}

#[test]
fn width_mismatch_fails() {
    let mut narrow: GrowingLattice<u8, 3> = GrowingLattice::new(0, 1).unwrap();
    narrow.set(1, 0, 0);
    let mut buf = Vec::new();
    narrow.save_to(&mut buf).unwrap();
    assert_load_fails(&buf, |e| {
        matches!(e, CodecError::ValueWidthMismatch { found: 1, expected: 2 })
    });
}

#[test]
fn radius_mismatch_fails() {
    let mut other: GrowingLattice<u16, 4> = GrowingLattice::new(0, 1).unwrap();
    other.set(1, 0, 0);
    let mut buf = Vec::new();
    other.save_to(&mut buf).unwrap();
    assert_load_fails(&buf, |e| matches!(e, CodecError::RadiusMismatch { .. }));
}

#[test]
fn truncation_fails() {
    let buf = bytes(&sample());
    for cut in [3, 20, 60, buf.len() / 2, buf.len() - 1] {
        assert_load_fails(&buf[..cut], |e| {
            matches!(e, CodecError::Io(_) | CodecError::InvalidTrailer { .. })
        });
    }
}

#[test]
fn bad_trailer_fails() {
    let mut buf = bytes(&sample());
    let n = buf.len();
    buf[n - 1] = b'?';
    assert_load_fails(&buf, |e| matches!(e, CodecError::InvalidTrailer { .. }));
}

#[test]
fn trailing_bytes_fail() {
    let mut buf = bytes(&sample());
    buf.push(0);
    assert_load_fails(&buf, |e| matches!(e, CodecError::TrailingData));
}

#[test]
fn corrupted_tag_fails() {
    let a = Lattice::new(0, 1).unwrap();
    let mut buf = bytes(&a);
    // header (21) + SiteInfo (2 + 2 + 6 * 8) + root header (24) → first tag
    let first_tag = 21 + 52 + 24;
    buf[first_tag] = 9;
    assert_load_fails(&buf, |e| matches!(e, CodecError::MalformedTree { .. }));
}

#[test]
fn missing_file_fails() {
    let mut l = sample();
    let err = l.load(scratch_path("does-not-exist")).unwrap_err();
    assert!(matches!(err, CodecError::Io(_)));
    assert_eq!(l.non_empty_count(), 0);
}
