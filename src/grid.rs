use serde::{Deserialize, Serialize};
use crate::hydro::error::Error;
use crate::hydro::geometry::{Direction, Vector3d};
use crate::index_space::IndexSpace;




/**
 * A node-based structured Cartesian grid with exterior ghost layers.
 *
 * Along each axis there are `n` normal node layers, the first and last of
 * which sit on the domain boundary, surrounded by `ng` exterior ghost layers
 * on either side, so `n + 2 ng` layers in total. Node `ng` on an axis is at
 * the lower bound and node `n + ng - 1` at the upper bound. A two-dimensional
 * problem is a grid with a single interior layer (three node layers) along
 * the collapsed axis.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    layers: [i64; 3],
    ghost: i64,
    lower: [f64; 3],
    upper: [f64; 3],
    spacing: [f64; 3],
    inverse_spacing: [f64; 3],
}




// ============================================================================
impl Grid {

    /**
     * Create a grid from the number of cells along each axis (x, y, z). With
     * `m` cells on an axis the grid has `m + 2` node layers, so the boundary
     * nodes are aligned with the domain faces.
     */
    pub fn new(cells: [usize; 3], ghost: usize, lower: [f64; 3], upper: [f64; 3]) -> Result<Self, Error> {
        let mut layers = [0; 3];

        for (n, m) in layers.iter_mut().zip(cells.iter()) {
            *n = *m as i64 + 2;
        }
        Self::from_node_layers(layers, ghost, lower, upper)
    }

    /**
     * Create a grid from the number of normal node layers along each axis.
     */
    pub fn from_node_layers(layers: [i64; 3], ghost: usize, lower: [f64; 3], upper: [f64; 3]) -> Result<Self, Error> {
        if ghost == 0 {
            return Err(Error::Config("ghost depth must be at least one".into()));
        }
        let mut spacing = [0.0; 3];
        let mut inverse_spacing = [0.0; 3];

        for axis in 0..3 {
            if layers[axis] < 3 {
                return Err(Error::Config(format!("axis {} needs at least one interior node layer", axis)));
            }
            if !(upper[axis] > lower[axis]) {
                return Err(Error::Config(format!("axis {} has an empty extent", axis)));
            }
            spacing[axis] = (upper[axis] - lower[axis]) / (layers[axis] - 1) as f64;
            inverse_spacing[axis] = 1.0 / spacing[axis];
        }

        Ok(Self {
            layers,
            ghost: ghost as i64,
            lower,
            upper,
            spacing,
            inverse_spacing,
        })
    }

    /**
     * Number of normal node layers (boundary nodes included) along an axis.
     */
    pub fn node_layers(&self, axis: Direction) -> i64 {
        self.layers[axis.index()]
    }

    pub fn ghost_depth(&self) -> i64 {
        self.ghost
    }

    /**
     * Total number of node layers along an axis, exterior ghosts included.
     */
    pub fn layer_max(&self, axis: Direction) -> i64 {
        self.layers[axis.index()] + 2 * self.ghost
    }

    /**
     * Return `(kMax, jMax, iMax)`.
     */
    pub fn shape(&self) -> (i64, i64, i64) {
        (self.layer_max(Direction::Z), self.layer_max(Direction::Y), self.layer_max(Direction::X))
    }

    /**
     * Total number of nodes, exterior ghosts included.
     */
    pub fn len(&self) -> usize {
        let (k, j, i) = self.shape();
        (k * j * i) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn spacing(&self, axis: Direction) -> f64 {
        self.spacing[axis.index()]
    }

    pub fn inverse_spacing(&self, axis: Direction) -> f64 {
        self.inverse_spacing[axis.index()]
    }

    /**
     * Inverse spacing of all three axes in (x, y, z) order.
     */
    pub fn inverse_spacings(&self) -> [f64; 3] {
        self.inverse_spacing
    }

    pub fn lower(&self, axis: Direction) -> f64 {
        self.lower[axis.index()]
    }

    pub fn upper(&self, axis: Direction) -> f64 {
        self.upper[axis.index()]
    }

    /**
     * Axes carrying a single interior node layer. Periodic conditions on the
     * two boundary layers of such an axis realize a two-dimensional problem.
     */
    pub fn collapsed_axes(&self) -> Vec<Direction> {
        Direction::ALL.iter().cloned().filter(|a| self.node_layers(*a) == 3).collect()
    }

    /**
     * Linear address of the node `(k, j, i)`.
     */
    pub fn index(&self, (k, j, i): (i64, i64, i64)) -> usize {
        let (_, j_max, i_max) = self.shape();
        ((k * j_max + j) * i_max + i) as usize
    }

    /**
     * Convert a coordinate along an axis to the index of the closest node
     * layer.
     */
    pub fn node_space(&self, axis: Direction, s: f64) -> i64 {
        ((s - self.lower(axis)) * self.inverse_spacing(axis) + 0.5).floor() as i64 + self.ghost
    }

    /**
     * Coordinate of the node layer `n` along an axis.
     */
    pub fn point_space(&self, axis: Direction, n: i64) -> f64 {
        self.lower(axis) + (n - self.ghost) as f64 * self.spacing(axis)
    }

    pub fn point_of(&self, (k, j, i): (i64, i64, i64)) -> Vector3d {
        Vector3d::new(
            self.point_space(Direction::X, i),
            self.point_space(Direction::Y, j),
            self.point_space(Direction::Z, k))
    }

    pub fn node_of(&self, point: &Vector3d) -> (i64, i64, i64) {
        (self.node_space(Direction::Z, point.z()),
         self.node_space(Direction::Y, point.y()),
         self.node_space(Direction::X, point.x()))
    }

    /**
     * Whether a point lies in the closed domain box.
     */
    pub fn contains_point(&self, point: &Vector3d) -> bool {
        Direction::ALL.iter().all(|a| {
            let s = point.component(*a);
            s >= self.lower(*a) && s <= self.upper(*a)
        })
    }

    /**
     * All nodes, exterior ghost layers included.
     */
    pub fn entire(&self) -> IndexSpace {
        let (k, j, i) = self.shape();
        IndexSpace::new(0..k, 0..j, 0..i)
    }

    /**
     * The normal nodes: boundary layers and everything inside them.
     */
    pub fn normal_nodes(&self) -> IndexSpace {
        self.entire().trim_all(self.ghost)
    }
}




/**
 * Clamp a node index into `[n_min, n_max - 1]`.
 */
pub fn valid_node_space(n: i64, n_min: i64, n_max: i64) -> i64 {
    n.max(n_min).min(n_max - 1)
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::*;
    use approx::assert_abs_diff_eq;

    fn grid() -> Grid {
        Grid::new([10, 4, 1], 2, [0.0, -1.0, 0.0], [1.1, 1.0, 0.5]).unwrap()
    }

    #[test]
    fn cells_are_refined_to_node_layers() {
        let g = grid();
        assert_eq!(g.node_layers(Direction::X), 12);
        assert_eq!(g.layer_max(Direction::X), 16);
        assert_eq!(g.shape(), (7, 10, 16));
        assert_eq!(g.len(), 7 * 10 * 16);
        assert_abs_diff_eq!(g.spacing(Direction::X), 0.1, epsilon = 1e-14);
        assert_abs_diff_eq!(g.spacing(Direction::Y), 0.4, epsilon = 1e-14);
        assert_eq!(g.collapsed_axes(), vec![Direction::Z]);
    }

    #[test]
    fn boundary_nodes_sit_on_domain_faces() {
        let g = grid();
        let n = g.node_layers(Direction::X);
        assert_eq!(g.point_space(Direction::X, g.ghost_depth()), 0.0);
        assert_abs_diff_eq!(g.point_space(Direction::X, n + g.ghost_depth() - 1), 1.1, epsilon = 1e-14);
    }

    #[test]
    fn linear_index_is_row_major() {
        let g = grid();
        for (n, index) in g.entire().iter().enumerate() {
            assert_eq!(g.index(index), n);
        }
    }

    #[test]
    fn node_point_round_trip() {
        let g = grid();
        for index in g.normal_nodes().iter() {
            assert_eq!(g.node_of(&g.point_of(index)), index);
        }
    }

    #[test]
    fn clamping_keeps_nodes_in_range() {
        assert_eq!(valid_node_space(-3, 0, 10), 0);
        assert_eq!(valid_node_space(12, 0, 10), 9);
        assert_eq!(valid_node_space(4, 0, 10), 4);
    }

    #[test]
    fn degenerate_grids_are_rejected() {
        assert!(Grid::new([4, 4, 4], 0, [0.0; 3], [1.0; 3]).is_err());
        assert!(Grid::new([4, 4, 4], 1, [0.0; 3], [1.0, 0.0, 1.0]).is_err());
        assert!(Grid::from_node_layers([2, 4, 4], 1, [0.0; 3], [1.0; 3]).is_err());
    }
}
