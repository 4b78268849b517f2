//! # Tree Layout
//!
//! File: cli/src/common/diagram/layout.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Depth-first layout of the visible hierarchy as a horizontal node-link
//! diagram (root on the left):
//!
//! - **Axial offset**: `margin + depth * level_spacing`.
//! - **Lateral offset**: leaves take consecutive slots in depth-first order.
//!   Two adjacent leaves under the same parent are `sibling_separation` slots
//!   apart, leaves under different parents `cousin_separation` slots. A parent
//!   sits midway between its first and last child.
//!
//! Slots are then scaled so the diagram fills the container height, but never
//! closer together than `min_node_spacing`; a diagram narrower than the
//! container is centered, so a lone node sits at `height / 2`.
//!
//! The input is the visible hierarchy only: an arena of child index lists where
//! collapsed subtrees are simply absent.
//!
use super::transition::Point;
use serde::{Deserialize, Serialize};

/// Container dimensions in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and positive.
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Axial distance between depth levels.
    pub level_spacing: f64,
    /// Smallest lateral distance between two adjacent slots.
    pub min_node_spacing: f64,
    /// Slots between adjacent leaves sharing a parent.
    pub sibling_separation: f64,
    /// Slots between adjacent leaves with different parents.
    pub cousin_separation: f64,
    /// Blank border kept around the diagram.
    pub margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_spacing: 220.0,
            min_node_spacing: 20.0,
            sibling_separation: 1.0,
            cousin_separation: 2.0,
            margin: 40.0,
        }
    }
}

/// Lays out the hierarchy rooted at `root`.
///
/// `children[i]` lists the visible children of arena node `i`. The result is
/// indexed the same way; nodes not reachable from `root` get `None`.
pub fn layout(children: &[Vec<usize>], root: usize, size: Size, config: &LayoutConfig) -> Vec<Option<Point>> {
    let mut slots = vec![None; children.len()];
    let mut depths = vec![0usize; children.len()];
    if root >= children.len() {
        return vec![None; children.len()];
    }

    let mut walker = SlotWalker {
        children,
        config,
        slots: &mut slots,
        depths: &mut depths,
        cursor: 0.0,
        previous_leaf_parent: None,
    };
    walker.visit(root, None, 0);
    let span = walker.cursor;

    let available = (size.height - 2.0 * config.margin).max(0.0);
    let spacing = if span > 0.0 {
        (available / span).max(config.min_node_spacing)
    } else {
        0.0
    };
    let offset = config.margin + ((available - span * spacing) / 2.0).max(0.0);

    slots
        .iter()
        .zip(depths.iter())
        .map(|(slot, depth)| {
            slot.map(|slot: f64| {
                Point::new(
                    config.margin + *depth as f64 * config.level_spacing,
                    offset + slot * spacing,
                )
            })
        })
        .collect()
}

/// Assigns unscaled lateral slots during a depth-first walk.
struct SlotWalker<'a> {
    children: &'a [Vec<usize>],
    config: &'a LayoutConfig,
    slots: &'a mut Vec<Option<f64>>,
    depths: &'a mut Vec<usize>,
    /// Slot of the most recently placed leaf.
    cursor: f64,
    /// Parent of the most recently placed leaf; `None` before the first leaf.
    previous_leaf_parent: Option<Option<usize>>,
}

impl SlotWalker<'_> {
    fn visit(&mut self, node: usize, parent: Option<usize>, depth: usize) -> f64 {
        self.depths[node] = depth;
        let children = self.children;
        let kids = &children[node];
        let slot = if kids.is_empty() {
            match self.previous_leaf_parent {
                None => self.cursor = 0.0,
                Some(previous) if previous == parent => {
                    self.cursor += self.config.sibling_separation
                }
                Some(_) => self.cursor += self.config.cousin_separation,
            }
            self.previous_leaf_parent = Some(parent);
            self.cursor
        } else {
            let mut first = None;
            let mut last = 0.0;
            for &child in kids {
                let child_slot = self.visit(child, Some(node), depth + 1);
                first.get_or_insert(child_slot);
                last = child_slot;
            }
            (first.unwrap_or(last) + last) / 2.0
        };
        self.slots[node] = Some(slot);
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LayoutConfig {
        LayoutConfig {
            margin: 0.0,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn test_drawable_sizes() {
        assert!(Size::new(960.0, 600.0).is_drawable());
        assert!(!Size::new(0.0, 600.0).is_drawable());
        assert!(!Size::new(960.0, -1.0).is_drawable());
        assert!(!Size::new(f64::INFINITY, 600.0).is_drawable());
        assert!(!Size::new(960.0, f64::NAN).is_drawable());
    }

    #[test]
    fn test_single_node_is_centered() {
        let positions = layout(&[vec![]], 0, Size::new(800.0, 600.0), &config());
        assert_eq!(positions, vec![Some(Point::new(0.0, 300.0))]);
    }

    #[test]
    fn test_axial_offset_is_depth_proportional() {
        // 0 -> 1 -> 2
        let children = vec![vec![1], vec![2], vec![]];
        let positions = layout(&children, 0, Size::new(800.0, 600.0), &config());
        let xs: Vec<f64> = positions.iter().map(|p| p.unwrap().x).collect();
        assert_eq!(xs, vec![0.0, 220.0, 440.0]);
        // a single chain is straight
        assert!(positions.iter().all(|p| p.unwrap().y == 300.0));
    }

    #[test]
    fn test_siblings_fill_height_and_parent_is_centered() {
        // root with three leaves
        let children = vec![vec![1, 2, 3], vec![], vec![], vec![]];
        let positions = layout(&children, 0, Size::new(800.0, 600.0), &config());
        let ys: Vec<f64> = positions.iter().map(|p| p.unwrap().y).collect();
        assert_eq!(ys, vec![300.0, 0.0, 300.0, 600.0]);
    }

    #[test]
    fn test_cousins_are_separated_further() {
        // 0 -> {1 -> {3, 4}, 2 -> {5}}
        let children = vec![vec![1, 2], vec![3, 4], vec![5], vec![], vec![], vec![]];
        let positions = layout(&children, 0, Size::new(800.0, 20.0 * 3.0), &config());
        let y = |i: usize| positions[i].unwrap().y;
        // slots: 3 -> 0, 4 -> 1, 5 -> 3 (cousin gap of 2)
        assert_eq!(y(4) - y(3), 20.0);
        assert_eq!(y(5) - y(4), 40.0);
        assert_eq!(y(1), (y(3) + y(4)) / 2.0);
        assert_eq!(y(2), y(5));
    }

    #[test]
    fn test_min_spacing_overflows_container() {
        let children = vec![(1..=50).collect::<Vec<_>>()]
            .into_iter()
            .chain((1..=50).map(|_| vec![]))
            .collect::<Vec<_>>();
        let positions = layout(&children, 0, Size::new(800.0, 100.0), &config());
        let y1 = positions[1].unwrap().y;
        let y2 = positions[2].unwrap().y;
        assert_eq!(y2 - y1, 20.0);
        assert_eq!(y1, 0.0);
    }

    #[test]
    fn test_unreachable_nodes_are_skipped() {
        let children = vec![vec![1], vec![], vec![]];
        let positions = layout(&children, 0, Size::new(100.0, 100.0), &config());
        assert!(positions[2].is_none());
        assert!(layout(&children, 7, Size::new(100.0, 100.0), &config())
            .iter()
            .all(Option::is_none));
    }
}
