use log::{debug, info};
use serde::{Deserialize, Serialize};
use crate::grid::Grid;
use crate::hydro::error::Error;
use crate::hydro::geometry::{Direction, Vector3d};
use crate::node::{Node, NodeFlag};
use crate::partition::Partition;




/// Number of scalars persisted per obstacle record.
pub const RECORD_LEN: usize = 8;




/**
 * The capability the classifier needs from an immersed obstacle: a point
 * membership test, plus a sanity check against the grid it is placed in.
 */
pub trait Solid {
    fn contains(&self, point: &Vector3d) -> bool;

    fn check(&self, _index: usize, _grid: &Grid) -> Result<(), Error> {
        Ok(())
    }
}




/**
 * A rigid spherical obstacle. The four trailing scalars are reserved for
 * rigid-body coupling and are carried through persistence untouched.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub r: f64,
    #[serde(default)]
    pub reserved: [f64; 4],
}




// ============================================================================
impl Sphere {

    pub fn new(x: f64, y: f64, z: f64, r: f64) -> Self {
        Self { x, y, z, r, reserved: [0.0; 4] }
    }

    pub fn center(&self) -> Vector3d {
        Vector3d::new(self.x, self.y, self.z)
    }

    /**
     * Return this sphere with its position and radius divided by a reference
     * length.
     */
    pub fn normalized_by(&self, length: f64) -> Self {
        Self {
            x: self.x / length,
            y: self.y / length,
            z: self.z / length,
            r: self.r / length,
            reserved: self.reserved,
        }
    }

    pub fn to_record(&self) -> [f64; RECORD_LEN] {
        let q = &self.reserved;
        [self.x, self.y, self.z, self.r, q[0], q[1], q[2], q[3]]
    }

    pub fn from_record(record: &[f64; RECORD_LEN]) -> Self {
        Self {
            x: record[0],
            y: record[1],
            z: record[2],
            r: record[3],
            reserved: [record[4], record[5], record[6], record[7]],
        }
    }
}

impl Solid for Sphere {
    fn contains(&self, point: &Vector3d) -> bool {
        point.dist2(&self.center()) - self.r * self.r < 0.0
    }

    fn check(&self, index: usize, grid: &Grid) -> Result<(), Error> {
        if !(self.r > 0.0) {
            return Err(Error::NonPositiveRadius { index, radius: self.r });
        }
        if !grid.contains_point(&self.center()) {
            return Err(Error::ObstacleOutsideDomain { index });
        }
        Ok(())
    }
}




/**
 * Node counts per classification over the interior region.
 */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Census {
    pub solid: usize,
    pub ghost: usize,
    pub fluid: usize,
}




/**
 * Tag every node of the grid with respect to the obstacles.
 *
 * All nodes start out as boundary-or-exterior. Interior nodes are then marked
 * fluid, or solid if any obstacle contains them, with the last containing
 * obstacle recorded as the owner. Finally, solid nodes having at least one
 * fluid face neighbor become ghost nodes. Obstacles are checked before any
 * node is touched, so a rejected configuration leaves the flags unchanged.
 */
pub fn classify_domain<S: Solid>(
    grid: &Grid,
    obstacles: &[S],
    partition: &Partition,
    nodes: &mut [Node]) -> Result<Census, Error>
{
    info!("initialize domain geometry ({} obstacles)", obstacles.len());

    for (n, obstacle) in obstacles.iter().enumerate() {
        obstacle.check(n, grid)?;
    }

    for node in nodes.iter_mut() {
        node.flag = NodeFlag::Exterior;
        node.geometry = None;
    }
    locate_solid_geometry(grid, obstacles, partition, nodes);
    let census = identify_ghost_nodes(grid, partition, nodes);

    info!("{} solid, {} ghost, {} fluid nodes", census.solid, census.ghost, census.fluid);
    Ok(census)
}

fn locate_solid_geometry<S: Solid>(grid: &Grid, obstacles: &[S], partition: &Partition, nodes: &mut [Node]) {
    debug!("locate solid geometry");

    for index in partition.interior().iter() {
        let point = grid.point_of(index);
        let node = &mut nodes[grid.index(index)];
        node.flag = NodeFlag::Fluid;

        for (n, obstacle) in obstacles.iter().enumerate() {
            if obstacle.contains(&point) {
                node.flag = NodeFlag::Solid;
                node.geometry = Some(n);
            }
        }
    }
}

fn identify_ghost_nodes(grid: &Grid, partition: &Partition, nodes: &mut [Node]) -> Census {
    debug!("identify ghost nodes");
    let mut census = Census::default();

    for index in partition.interior().iter() {
        let n = grid.index(index);

        if nodes[n].flag == NodeFlag::Solid {
            let product: i32 = Direction::ALL
                .iter()
                .flat_map(|axis| vec![axis.neighbor(index, -1), axis.neighbor(index, 1)])
                .map(|neighbor| nodes[grid.index(neighbor)].flag.code())
                .product();

            if product == 0 {
                nodes[n].flag = NodeFlag::Ghost;
            }
        }
        match nodes[n].flag {
            NodeFlag::Solid => census.solid += 1,
            NodeFlag::Ghost => census.ghost += 1,
            NodeFlag::Fluid => census.fluid += 1,
            NodeFlag::Exterior => {}
        }
    }
    census
}
