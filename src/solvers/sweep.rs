use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use crate::grid::Grid;
use crate::hydro::characteristic::{eigenvalues, left_eigenvectors, mat_vec, right_eigenvectors};
use crate::hydro::error::Error;
use crate::hydro::euler::{symmetric_average, Averager, Conserved, NUM_CONS};
use crate::hydro::geometry::Direction;
use crate::hydro::splitting::Splitter;
use crate::hydro::viscous::viscous_flux;
use crate::index_space::IndexSpace;
use crate::model::Model;
use crate::node::{Node, NodeFlag};
use super::reconstruction::Reconstruction;




/// Numerical scheme selection for the face sweep.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub averager: Averager,
    pub splitter: Splitter,
    pub reconstruction: Reconstruction,
    pub viscous: bool,
}

impl Default for Scheme {
    fn default() -> Self {
        Self {
            averager: Averager::Roe,
            splitter: Splitter::LocalLaxFriedrichs,
            reconstruction: Reconstruction::default(),
            viscous: true,
        }
    }
}




/// Numerical fluxes on the faces along one axis. The face stored at `index`
/// lies between node `index` and its upper neighbor along the axis.
///
#[derive(Clone, Debug)]
pub struct FaceFluxes {
    direction: Direction,
    faces: IndexSpace,
    data: Vec<[f64; NUM_CONS]>,
}

impl FaceFluxes {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn faces(&self) -> &IndexSpace {
        &self.faces
    }

    pub fn get(&self, index: (i64, i64, i64)) -> &[f64; NUM_CONS] {
        &self.data[self.faces.row_major_offset(index)]
    }
}




/// Characteristic flux-vector-split numerical flux at the face in the middle
/// of `stencil`. The stencil holds `2 r` consecutive node states along
/// `direction` for a reconstruction of radius `r`. Every node state is
/// projected on the left eigenvectors of the interface state, weighted by
/// the split eigenvalues, reconstructed to the face from its upwind side, and
/// lifted back with the right eigenvectors.
///
pub fn characteristic_flux(direction: Direction, gamma_law_index: f64, scheme: &Scheme, stencil: &[Conserved]) -> Conserved {
    let r = stencil.len() / 2;
    let state = symmetric_average(scheme.averager, gamma_law_index, &stencil[r - 1], &stencil[r]);
    let (plus, minus) = scheme.splitter.split(&eigenvalues(direction, &state));
    let l = left_eigenvectors(direction, gamma_law_index, &state);
    let w: Vec<[f64; NUM_CONS]> = stencil.iter().map(|u| mat_vec(&l, &u.as_array())).collect();

    let mut g = [0.0; NUM_CONS];
    let mut column = vec![0.0; stencil.len()];

    for c in 0..NUM_CONS {
        for (s, wn) in column.iter_mut().zip(w.iter()) {
            *s = plus[c] * wn[c];
        }
        let g_plus = scheme.reconstruction.face_value(&column);

        for (s, wn) in column.iter_mut().zip(w.iter().rev()) {
            *s = minus[c] * wn[c];
        }
        let g_minus = scheme.reconstruction.face_value(&column);

        g[c] = g_plus + g_minus;
    }
    Conserved::from(mat_vec(&right_eigenvectors(direction, &state), &g))
}




fn face_flux(
    direction: Direction,
    tn: usize,
    index: (i64, i64, i64),
    nodes: &[Node],
    grid: &Grid,
    model: &Model,
    scheme: &Scheme) -> Result<[f64; NUM_CONS], Error>
{
    let entire = grid.entire();
    let r = scheme.reconstruction.stencil_radius();
    let stencil_space: Vec<_> = (1 - r..=r).map(|delta| direction.neighbor(index, delta)).collect();

    if stencil_space.iter().any(|n| !entire.contains(*n)) {
        return Err(Error::StencilOutOfRange { axis: direction, index });
    }

    let left = &nodes[grid.index(index)];
    let right = &nodes[grid.index(direction.neighbor(index, 1))];

    if left.flag == NodeFlag::Solid || right.flag == NodeFlag::Solid {
        return Ok([0.0; NUM_CONS]);
    }

    let stencil = face_stencil(&stencil_space, tn, nodes, grid);
    let mut flux = characteristic_flux(direction, model.gamma, scheme, &stencil).as_array();

    if scheme.viscous {
        let fv = viscous_flux(direction, tn, index, grid, nodes, model)?;

        for (f, v) in flux.iter_mut().zip(fv.iter()) {
            *f -= v;
        }
    }
    Ok(flux)
}




/// Node states along a face stencil, straddling nodes in the middle. A solid
/// node further out is replaced by its neighbor on the face side, which makes
/// the reconstruction first order on that side.
///
fn face_stencil(stencil_space: &[(i64, i64, i64)], tn: usize, nodes: &[Node], grid: &Grid) -> Vec<Conserved> {
    let r = stencil_space.len() / 2;
    let mut stencil: Vec<Conserved> = stencil_space.iter().map(|n| nodes[grid.index(*n)].conserved(tn)).collect();
    let is_solid = |p: usize| nodes[grid.index(stencil_space[p])].flag == NodeFlag::Solid;

    for p in (0..r - 1).rev() {
        if is_solid(p) {
            stencil[p] = stencil[p + 1];
        }
    }
    for p in r + 1..stencil.len() {
        if is_solid(p) {
            stencil[p] = stencil[p - 1];
        }
    }
    stencil
}




/// Evaluate the numerical flux (convective minus viscous) on every face
/// bounding a node of `range` along `direction`, reading bank `tn`. Faces
/// are evaluated in parallel and each is written exactly once. A face
/// touching a solid interior node carries no flux.
///
pub fn compute_face_fluxes(
    direction: Direction,
    tn: usize,
    nodes: &[Node],
    grid: &Grid,
    range: &IndexSpace,
    model: &Model,
    scheme: &Scheme) -> Result<FaceFluxes, Error>
{
    let faces = range.extend_lower(1, direction);
    let indexes: Vec<_> = faces.iter().collect();

    let data = indexes
        .par_iter()
        .map(|index| face_flux(direction, tn, *index, nodes, grid, model, scheme))
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(FaceFluxes { direction, faces, data })
}




/// Take one forward Euler step of size `dt`: difference the face fluxes of
/// bank `tn` into bank `1 - tn` for the fluid nodes of `range`. Every other
/// node has its state copied over unchanged. Returns the new time-now index.
///
/// A nonphysical update stops the step with `Error::NonphysicalState`. Bank
/// `tn` is never written; bank `1 - tn` is then only partially updated and
/// must be discarded.
///
pub fn advance(
    nodes: &mut [Node],
    tn: usize,
    dt: f64,
    grid: &Grid,
    range: &IndexSpace,
    model: &Model,
    scheme: &Scheme) -> Result<usize, Error>
{
    let fluxes = Direction::ALL
        .iter()
        .map(|direction| compute_face_fluxes(*direction, tn, nodes, grid, range, model, scheme))
        .collect::<Result<Vec<_>, Error>>()?;

    let next = 1 - tn;

    for node in nodes.iter_mut() {
        node.u[next] = node.u[tn];
    }

    for index in range.iter() {
        let node = &mut nodes[grid.index(index)];

        if node.flag != NodeFlag::Fluid {
            continue;
        }
        let mut u = node.u[tn];

        for f in &fluxes {
            let direction = f.direction();
            let dd = grid.inverse_spacing(direction);
            let fm = f.get(direction.neighbor(index, -1));
            let fp = f.get(index);

            for n in 0..NUM_CONS {
                u[n] -= dt * dd * (fp[n] - fm[n]);
            }
        }
        let u = Conserved::from(u);
        u.validate()?;
        node.set_conserved(next, u);
    }
    Ok(next)
}




/// Largest stable time step over the fluid nodes of `range`, from the
/// maximum of the summed `(|u_s| + c) / ds` over the three axes.
///
pub fn stable_time_step(
    cfl: f64,
    tn: usize,
    nodes: &[Node],
    grid: &Grid,
    range: &IndexSpace,
    model: &Model) -> Result<f64, Error>
{
    let indexes: Vec<_> = range
        .iter()
        .filter(|index| nodes[grid.index(*index)].flag == NodeFlag::Fluid)
        .collect();

    let rates = indexes
        .par_iter()
        .map(|index| -> Result<f64, Error> {
            let p = nodes[grid.index(*index)].conserved(tn).to_primitive(model.gamma, model.gas_constant)?;
            Ok(Direction::ALL
                .iter()
                .map(|d| p.max_signal_speed(*d, model.gamma) * grid.inverse_spacing(*d))
                .sum::<f64>())
        })
        .collect::<Result<Vec<f64>, Error>>()?;

    let max_rate = rates.into_iter().fold(0.0, f64::max);

    if max_rate > 0.0 {
        Ok(cfl / max_rate)
    } else {
        Err(Error::Config("no fluid node carries a signal".into()))
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use crate::hydro::euler::Primitive;
    use crate::node::allocate_nodes;
    use crate::partition::Partition;
    use crate::solvers::reconstruction::Limiter;

    fn model() -> Model {
        Model::new(1.4, 0.5, 1e-3, 300.0)
    }

    fn state(model: &Model, rho: f64, u: f64, v: f64, w: f64, p: f64) -> Conserved {
        Primitive::new(rho, u, v, w, p, p / (rho * model.gas_constant)).to_conserved(model.gamma)
    }

    fn schemes() -> Vec<Scheme> {
        let mut schemes = Vec::new();
        for averager in [Averager::Arithmetic, Averager::Roe].iter() {
            for splitter in [Splitter::LocalLaxFriedrichs, Splitter::StegerWarming].iter() {
                for reconstruction in [
                    Reconstruction::FirstOrder,
                    Reconstruction::Muscl { limiter: Limiter::MinMod },
                    Reconstruction::Muscl { limiter: Limiter::VanLeer }].iter()
                {
                    schemes.push(Scheme {
                        averager: *averager,
                        splitter: *splitter,
                        reconstruction: *reconstruction,
                        viscous: false,
                    });
                }
            }
        }
        schemes
    }

    #[test]
    fn uniform_state_recovers_physical_flux() {
        let model = model();
        let u = state(&model, 1.3, 0.4, -0.2, 0.1, 2.0);

        for scheme in schemes() {
            let r = scheme.reconstruction.stencil_radius() as usize;
            let stencil = vec![u; 2 * r];

            for direction in Direction::ALL.iter() {
                let f = characteristic_flux(*direction, model.gamma, &scheme, &stencil);
                let exact = u.flux_vector(*direction, model.gamma);
                for (a, b) in f.as_array().iter().zip(exact.as_array().iter()) {
                    assert_relative_eq!(*a, *b, epsilon = 1e-12, max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn face_fluxes_cover_both_sides_of_the_range() {
        let model = model();
        let grid = Grid::new([4, 4, 4], 2, [0.0; 3], [1.0; 3]).unwrap();
        let nodes = allocate_nodes(&grid, state(&model, 1.0, 0.5, 0.0, 0.0, 1.0));
        let partition = Partition::new(&grid);
        let range = partition.interior();

        let fluxes = compute_face_fluxes(Direction::Y, 0, &nodes, &grid, range, &model, &Scheme::default()).unwrap();
        assert_eq!(fluxes.faces().len(), range.len() + range.len() / 4);
        assert_eq!(fluxes.faces().range(Direction::Y).start, range.range(Direction::Y).start - 1);
    }

    #[test]
    fn stencil_reaching_outside_is_an_error() {
        let model = model();
        let grid = Grid::new([4, 4, 4], 1, [0.0; 3], [1.0; 3]).unwrap();
        let nodes = allocate_nodes(&grid, state(&model, 1.0, 0.5, 0.0, 0.0, 1.0));

        assert!(matches!(
            compute_face_fluxes(Direction::X, 0, &nodes, &grid, &grid.normal_nodes(), &model, &Scheme::default()),
            Err(Error::StencilOutOfRange { axis: Direction::X, .. })));
    }

    #[test]
    fn solid_faces_carry_no_flux() {
        let model = model();
        let grid = Grid::new([4, 4, 4], 2, [0.0; 3], [1.0; 3]).unwrap();
        let mut nodes = allocate_nodes(&grid, state(&model, 1.0, 0.5, 0.0, 0.0, 1.0));
        let solid = (4, 4, 4);
        let n = grid.index(solid);
        nodes[n].flag = NodeFlag::Solid;

        let partition = Partition::new(&grid);
        let fluxes = compute_face_fluxes(Direction::X, 0, &nodes, &grid, partition.interior(), &model, &Scheme::default()).unwrap();
        assert_eq!(fluxes.get(solid), &[0.0; NUM_CONS]);
        assert_eq!(fluxes.get((4, 4, 3)), &[0.0; NUM_CONS]);
        assert!(fluxes.get((4, 3, 4))[1] != 0.0);
    }

    #[test]
    fn time_step_shrinks_with_the_signal_speed() {
        let model = model();
        let grid = Grid::new([4, 4, 4], 1, [0.0; 3], [1.0; 3]).unwrap();
        let partition = Partition::new(&grid);
        let mut nodes = allocate_nodes(&grid, state(&model, 1.0, 0.0, 0.0, 0.0, 1.0));
        for index in partition.interior().iter() {
            nodes[grid.index(index)].flag = NodeFlag::Fluid;
        }
        let slow = stable_time_step(0.5, 0, &nodes, &grid, partition.interior(), &model).unwrap();

        let fast = state(&model, 1.0, 2.0, 0.0, 0.0, 1.0);
        nodes[grid.index((2, 2, 2))].set_conserved(0, fast);
        let quick = stable_time_step(0.5, 0, &nodes, &grid, partition.interior(), &model).unwrap();
        assert!(quick < slow);

        let c = (1.4f64).sqrt();
        assert_abs_diff_eq!(slow, 0.5 / (3.0 * c * 5.0), epsilon = 1e-12);
    }
}
