use approx::assert_abs_diff_eq;
use artra::gcibm::{classify_domain, Census, Sphere, Solid};
use artra::grid::Grid;
use artra::hydro::euler::Conserved;
use artra::hydro::geometry::Direction;
use artra::node::{allocate_nodes, Node, NodeFlag};
use artra::partition::Partition;




/// Unit sphere at the origin in a box with 21 interior node layers per axis
/// at spacing 0.1, so the interior nodes sit at -1.0, -0.9, ..., 1.0.
fn unit_sphere_case() -> (Grid, Partition, Vec<Node>, Vec<Sphere>) {
    let grid = Grid::new([21, 21, 21], 2, [-1.1; 3], [1.1; 3]).unwrap();
    let partition = Partition::new(&grid);
    let nodes = allocate_nodes(&grid, Conserved::new(1.0, 0.0, 0.0, 0.0, 2.5));
    (grid, partition, nodes, vec![Sphere::new(0.0, 0.0, 0.0, 1.0)])
}

fn face_neighbors(index: (i64, i64, i64)) -> Vec<(i64, i64, i64)> {
    Direction::ALL
        .iter()
        .flat_map(|axis| vec![axis.neighbor(index, -1), axis.neighbor(index, 1)])
        .collect()
}

#[test]
fn unit_sphere_counts() {
    let (grid, partition, mut nodes, obstacles) = unit_sphere_case();
    assert_eq!(partition.interior().len(), 21 * 21 * 21);
    assert_abs_diff_eq!(grid.spacing(Direction::X), 0.1, epsilon = 1e-15);

    let census = classify_domain(&grid, &obstacles, &partition, &mut nodes).unwrap();
    assert_eq!(census, Census { solid: 3161, ghost: 978, fluid: 5122 });
    assert_eq!(census.solid + census.ghost + census.fluid, 9261);
}

#[test]
fn unit_sphere_flags_are_consistent() {
    let (grid, partition, mut nodes, obstacles) = unit_sphere_case();
    classify_domain(&grid, &obstacles, &partition, &mut nodes).unwrap();
    let flag = |index| nodes[grid.index(index)].flag;

    for index in partition.interior().iter() {
        let neighbors: Vec<NodeFlag> = face_neighbors(index).into_iter().map(flag).collect();

        match flag(index) {
            NodeFlag::Ghost => assert!(neighbors.contains(&NodeFlag::Fluid)),
            NodeFlag::Solid => assert!(neighbors.iter().all(|f| *f == NodeFlag::Solid || *f == NodeFlag::Ghost)),
            NodeFlag::Fluid => assert!(obstacles.iter().all(|s| !s.contains(&grid.point_of(index)))),
            NodeFlag::Exterior => panic!("interior node {:?} left unclassified", index),
        }
    }

    for index in grid.entire().iter().filter(|i| !partition.interior().contains(*i)) {
        assert_eq!(flag(index), NodeFlag::Exterior);
    }
}

#[test]
fn reclassification_follows_the_obstacle() {
    let (grid, partition, mut nodes, _) = unit_sphere_case();
    let center = (13, 13, 13);
    assert_eq!(grid.point_of(center), Default::default());

    classify_domain(&grid, &[Sphere::new(0.0, 0.0, 0.0, 0.5)], &partition, &mut nodes).unwrap();
    assert_eq!(nodes[grid.index(center)].flag, NodeFlag::Solid);

    classify_domain(&grid, &[Sphere::new(0.6, 0.6, 0.6, 0.3)], &partition, &mut nodes).unwrap();
    assert_eq!(nodes[grid.index(center)].flag, NodeFlag::Fluid);
    assert_eq!(nodes[grid.index(center)].geometry, None);
}
