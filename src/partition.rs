use std::ops::Range;
use crate::grid::Grid;
use crate::hydro::geometry::Direction;
use crate::index_space::IndexSpace;

/// Sub-range index of the interior node region.
pub const INTERIOR: usize = 12;

/// Sub-range index of all normal nodes (boundary layers included).
pub const NORMAL_NODES: usize = 13;

/// Names of the standard sub-ranges, indexed by their position.
const NAMES: [&str; 14] = [
    "west", "east", "south", "north", "front", "back",
    "west ghost", "east ghost", "south ghost", "north ghost", "front ghost", "back ghost",
    "interior",
    "domain",
];

/// A named rectangular sub-range of node indexes.
///
#[derive(Clone, Debug, PartialEq)]
pub struct SubRange {
    pub name: String,
    pub space: IndexSpace,
}

/// A list of rectangular sub-ranges covering parts of a grid. The standard
/// partition has the six boundary layers (west, east, south, north, front,
/// back) at positions 0 to 5, the six exterior ghost slabs in the same order
/// at 6 to 11, the interior at 12 and all normal nodes at 13.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    ranges: Vec<SubRange>,
}

impl Partition {
    pub fn new(grid: &Grid) -> Self {
        let ng = grid.ghost_depth();
        let normal = grid.normal_nodes();
        let mut ranges = Vec::with_capacity(NAMES.len());
        let axes = [Direction::X, Direction::Y, Direction::Z];

        // boundary layers, lower then upper face of each axis
        for axis in axes.iter() {
            let n = grid.node_layers(*axis);
            ranges.push(replace_range(&normal, *axis, ng..ng + 1));
            ranges.push(replace_range(&normal, *axis, n + ng - 1..n + ng));
        }

        // exterior ghost slabs
        for axis in axes.iter() {
            let n = grid.node_layers(*axis);
            ranges.push(replace_range(&normal, *axis, 0..ng));
            ranges.push(replace_range(&normal, *axis, n + ng..n + 2 * ng));
        }

        ranges.push(normal.trim_all(1));
        ranges.push(normal);

        Self {
            ranges: ranges
                .into_iter()
                .zip(NAMES.iter())
                .map(|(space, name)| SubRange { name: name.to_string(), space })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn get(&self, n: usize) -> &SubRange {
        &self.ranges[n]
    }

    pub fn space(&self, n: usize) -> &IndexSpace {
        &self.ranges[n].space
    }

    pub fn interior(&self) -> &IndexSpace {
        self.space(INTERIOR)
    }

    pub fn normal_nodes(&self) -> &IndexSpace {
        self.space(NORMAL_NODES)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubRange> {
        self.ranges.iter()
    }
}

fn replace_range(space: &IndexSpace, axis: Direction, range: Range<i64>) -> IndexSpace {
    let (dk, dj, di): (Range<i64>, Range<i64>, Range<i64>) = space.clone().into();
    match axis {
        Direction::X => IndexSpace::new(dk, dj, range),
        Direction::Y => IndexSpace::new(dk, range, di),
        Direction::Z => IndexSpace::new(range, dj, di),
    }
}
