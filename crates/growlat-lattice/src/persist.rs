//! Depth-first serialization of the square tree.
//!
//! Each square starts with a [`SquareHeader`]. A node follows it with its
//! nine child tags (`i` outer) and then, in the same order, the encoding of
//! every leaf or node child. A leaf header carries `sub_radius = 1` and is
//! followed by its empty and full counters (`i32` each) and its cells.

use std::io::{Read, Write};

use growlat_arena::{ArenaConfig, NodeId};
use growlat_codec::codec::{
    decode_child_tags, encode_child_tags, read_i32_le, read_values, write_i32_le, write_values,
};
use growlat_codec::{decode_square_header, encode_square_header, ChildTag, CodecError, SquareHeader};
use growlat_core::{SiteInfo, SiteValue};

use crate::child::Child;
use crate::leaf::Leaf;
use crate::node::Node;
use crate::tree::SquareTree;

/// `sub_radius` written in the header of every leaf.
const LEAF_MARKER: i64 = 1;

pub(crate) fn write_tree<T: SiteValue, const R: usize>(
    w: &mut dyn Write,
    tree: &SquareTree<T, R>,
) -> Result<(), CodecError> {
    write_node(w, tree, tree.root())
}

fn write_node<T: SiteValue, const R: usize>(
    w: &mut dyn Write,
    tree: &SquareTree<T, R>,
    id: NodeId,
) -> Result<(), CodecError> {
    let node = tree.node(id);
    encode_square_header(
        w,
        &SquareHeader {
            center_x: node.cx,
            center_y: node.cy,
            sub_radius: node.sub_radius,
        },
    )?;
    encode_child_tags(w, &node.children.map(|row| row.map(Child::tag)))?;
    for (_, _, child) in node.slots() {
        match child {
            Child::Leaf(leaf_id) => write_leaf(w, tree.leaf(leaf_id))?,
            Child::Node(node_id) => write_node(w, tree, node_id)?,
            Child::Empty | Child::Full => {}
        }
    }
    Ok(())
}

fn write_leaf<T: SiteValue, const R: usize>(
    w: &mut dyn Write,
    leaf: &Leaf<T, R>,
) -> Result<(), CodecError> {
    encode_square_header(
        w,
        &SquareHeader {
            center_x: leaf.cx,
            center_y: leaf.cy,
            sub_radius: LEAF_MARKER,
        },
    )?;
    write_i32_le(w, leaf.empty_cells as i32)?;
    write_i32_le(w, leaf.full_cells as i32)?;
    write_values(w, &leaf.cells)
}

/// Rebuild a tree, checking that every square sits exactly where its
/// parent expects it and that leaf counters agree with the cells.
pub(crate) fn read_tree<T: SiteValue, const R: usize>(
    r: &mut dyn Read,
    info: &SiteInfo<T>,
    config: ArenaConfig,
) -> Result<SquareTree<T, R>, CodecError> {
    let header = decode_square_header(r)?;
    if header.center_x != 0 || header.center_y != 0 {
        return Err(CodecError::malformed(format!(
            "root centered at ({},{}) instead of the origin",
            header.center_x, header.center_y
        )));
    }
    if header.sub_radius > SquareTree::<T, R>::MAX_SUB_RADIUS
        || !SquareTree::<T, R>::is_node_sub_radius(header.sub_radius)
    {
        return Err(CodecError::malformed(format!(
            "root sub-radius {} is not a node level for R = {R}",
            header.sub_radius
        )));
    }
    let mut tree = SquareTree::unrooted(config);
    tree.root = read_node(r, &mut tree, header, None, info)?;
    Ok(tree)
}

fn read_node<T: SiteValue, const R: usize>(
    r: &mut dyn Read,
    tree: &mut SquareTree<T, R>,
    header: SquareHeader,
    parent: Option<NodeId>,
    info: &SiteInfo<T>,
) -> Result<NodeId, CodecError> {
    let tags = decode_child_tags(r)?;
    let id = tree.nodes.insert(Node::uniform(
        header.center_x,
        header.center_y,
        header.sub_radius,
        parent,
        Child::Empty,
    ));
    let is_level_one = header.sub_radius == SquareTree::<T, R>::RADIUS;
    for i in 0..3 {
        for j in 0..3 {
            let expected = tree.node(id).child_center(i, j);
            let child = match tags[i][j] {
                ChildTag::Empty => Child::Empty,
                ChildTag::Full => Child::Full,
                ChildTag::Leaf => {
                    if !is_level_one {
                        return Err(CodecError::malformed(format!(
                            "leaf under node of sub-radius {}",
                            header.sub_radius
                        )));
                    }
                    let h = decode_square_header(r)?;
                    check_child(&h, expected, LEAF_MARKER)?;
                    let leaf = read_leaf(r, &h, id, info)?;
                    Child::Leaf(tree.leaves.insert(leaf))
                }
                ChildTag::Node => {
                    if is_level_one {
                        return Err(CodecError::malformed("node below the leaf level"));
                    }
                    let h = decode_square_header(r)?;
                    check_child(&h, expected, (header.sub_radius - 1) / 3)?;
                    Child::Node(read_node(r, tree, h, Some(id), info)?)
                }
            };
            tree.nodes[id].children[i][j] = child;
        }
    }
    Ok(id)
}

fn check_child(h: &SquareHeader, center: (i64, i64), sub_radius: i64) -> Result<(), CodecError> {
    if (h.center_x, h.center_y) != center || h.sub_radius != sub_radius {
        return Err(CodecError::malformed(format!(
            "square ({},{}) r={} where ({},{}) r={} was expected",
            h.center_x, h.center_y, h.sub_radius, center.0, center.1, sub_radius
        )));
    }
    Ok(())
}

fn read_leaf<T: SiteValue, const R: usize>(
    r: &mut dyn Read,
    header: &SquareHeader,
    parent: NodeId,
    info: &SiteInfo<T>,
) -> Result<Leaf<T, R>, CodecError> {
    let empty_cells = read_i32_le(r)?;
    let full_cells = read_i32_le(r)?;
    let cells = read_values::<T>(r, Leaf::<T, R>::CELLS)?.into_boxed_slice();
    let leaf = Leaf {
        cx: header.center_x,
        cy: header.center_y,
        parent,
        cells,
        empty_cells: u32::try_from(empty_cells).unwrap_or(u32::MAX),
        full_cells: u32::try_from(full_cells).unwrap_or(u32::MAX),
    };
    if leaf.recount(info) != (leaf.empty_cells, leaf.full_cells) {
        return Err(CodecError::malformed(format!(
            "leaf ({},{}) counters {empty_cells}/{full_cells} disagree with its cells",
            leaf.cx, leaf.cy
        )));
    }
    Ok(leaf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::child::SquareRef;

    type Tree = SquareTree<u16, 2>;

    fn sample() -> (Tree, SiteInfo<u16>) {
        let mut t = Tree::new(ArenaConfig::default());
        let mut info = SiteInfo::new(0, 1);
        let mut h = SquareRef::Node(t.root());
        for x in -8..=8 {
            for y in -8..=8 {
                h = t.set(1, x, y, h, &mut info);
            }
        }
        h = t.set(300, 40, -3, h, &mut info);
        t.set(0, 0, 0, h, &mut info);
        (t, info)
    }

    fn encode(t: &Tree) -> Vec<u8> {
        let mut buf = Vec::new();
        write_tree(&mut buf, t).unwrap();
        buf
    }

    #[test]
    fn tree_survives_a_round_trip() {
        let (t, info) = sample();
        let buf = encode(&t);
        let back: Tree = read_tree(&mut buf.as_slice(), &info, ArenaConfig::default()).unwrap();
        assert!(back.same_as(&t));
        assert_eq!(back.leaf_count(), t.leaf_count());
        assert_eq!(back.node_count(), t.node_count());
    }

    #[test]
    fn fresh_tree_is_header_plus_tags() {
        let t = Tree::new(ArenaConfig::default());
        let buf = encode(&t);
        assert_eq!(buf.len(), 24 + 9);
        assert!(buf[24..].iter().all(|&b| b == 0));
    }

    #[test]
    fn off_center_root_rejected() {
        let mut buf = encode(&Tree::new(ArenaConfig::default()));
        buf[0] = 3;
        let err = read_tree::<u16, 2>(&mut buf.as_slice(), &SiteInfo::new(0, 1), ArenaConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, CodecError::MalformedTree { .. }));
    }

    #[test]
    fn wrong_level_rejected() {
        let t = Tree::new(ArenaConfig::default());
        let buf = encode(&t);
        // Same bytes read with a different leaf radius.
        let err = read_tree::<u16, 3>(&mut buf.as_slice(), &SiteInfo::new(0, 1), ArenaConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, CodecError::MalformedTree { .. }));
    }

    #[test]
    fn unreachable_root_level_rejected() {
        // 3377129294182480222 is a node level for R = 2, but a node with
        // that child radius would have a radius past i64::MAX.
        let level: i64 = 3_377_129_294_182_480_222;
        assert!(Tree::is_node_sub_radius(level));
        assert!(level > Tree::MAX_SUB_RADIUS);
        let mut buf = encode(&Tree::new(ArenaConfig::default()));
        buf[16..24].copy_from_slice(&level.to_le_bytes());
        let err = read_tree::<u16, 2>(&mut buf.as_slice(), &SiteInfo::new(0, 1), ArenaConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, CodecError::MalformedTree { .. }));
    }

    #[test]
    fn corrupted_counters_rejected() {
        let mut t = Tree::new(ArenaConfig::default());
        let mut info = SiteInfo::new(0, 1);
        t.set(5, 0, 0, SquareRef::Node(t.root()), &mut info);
        let mut buf = encode(&t);
        // root header, nine tags, leaf header, then the empty counter
        let at = 24 + 9 + 24;
        assert_eq!(buf[24 + 4], ChildTag::Leaf as u8);
        assert_eq!(buf[at], 24);
        buf[at] = 23;
        let err = read_tree::<u16, 2>(&mut buf.as_slice(), &info, ArenaConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, CodecError::MalformedTree { .. }));
    }

    #[test]
    fn truncated_stream_is_io_error() {
        let (t, info) = sample();
        let buf = encode(&t);
        let cut = &buf[..buf.len() - 3];
        let err = read_tree::<u16, 2>(&mut &cut[..], &info, ArenaConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, CodecError::Io(_)));
    }
}
