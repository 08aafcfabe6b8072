use serde::{Deserialize, Serialize};
use crate::grid::Grid;
use crate::hydro::euler::{Conserved, NUM_CONS};




/**
 * Classification of a grid node with respect to the immersed obstacles.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeFlag {
    Solid,
    Fluid,
    Ghost,
    Exterior,
}




// ============================================================================
impl NodeFlag {

    /**
     * The integer code of this flag: solid interior -1, fluid 0, ghost 1,
     * boundary or exterior 2. Fluid is the only zero code.
     */
    pub fn code(&self) -> i32 {
        match self {
            NodeFlag::Solid => -1,
            NodeFlag::Fluid => 0,
            NodeFlag::Ghost => 1,
            NodeFlag::Exterior => 2,
        }
    }
}




/**
 * A grid node: two banks of conserved state (current and next, selected by
 * the time-now index `tn`), a classification flag, and the index of the
 * obstacle occupying it, if any.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub u: [[f64; NUM_CONS]; 2],
    pub flag: NodeFlag,
    pub geometry: Option<usize>,
}




// ============================================================================
impl Node {

    pub fn new(u: Conserved) -> Self {
        Self {
            u: [u.as_array(), u.as_array()],
            flag: NodeFlag::Exterior,
            geometry: None,
        }
    }

    pub fn conserved(&self, tn: usize) -> Conserved {
        Conserved::from(self.u[tn])
    }

    pub fn set_conserved(&mut self, tn: usize, u: Conserved) {
        self.u[tn] = u.as_array();
    }
}




/**
 * Allocate the node array of a grid, exterior ghosts included, with both
 * banks set to the given state.
 */
pub fn allocate_nodes(grid: &Grid, initial: Conserved) -> Vec<Node> {
    vec![Node::new(initial); grid.len()]
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn fluid_is_the_only_zero_code() {
        let flags = [NodeFlag::Solid, NodeFlag::Fluid, NodeFlag::Ghost, NodeFlag::Exterior];
        assert_eq!(flags.iter().filter(|f| f.code() == 0).count(), 1);
        assert_eq!(NodeFlag::Fluid.code(), 0);
    }

    #[test]
    fn banks_are_independent() {
        let mut node = Node::new(Conserved::new(1.0, 0.0, 0.0, 0.0, 2.5));
        node.set_conserved(1, Conserved::new(2.0, 1.0, 0.0, 0.0, 5.0));
        assert_eq!(node.conserved(0).mass_density(), 1.0);
        assert_eq!(node.conserved(1).mass_density(), 2.0);
    }
}
