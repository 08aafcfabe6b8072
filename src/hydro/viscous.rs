use crate::grid::Grid;
use crate::model::Model;
use crate::node::{Node, NodeFlag};
use super::error::Error;
use super::euler::NUM_CONS;
use super::geometry::Direction;




/// Prandtl number of air, taken as constant.
pub const PRANDTL_NUMBER: f64 = 0.71;

const SUTHERLAND_COEFFICIENT: f64 = 1.458e-6;
const SUTHERLAND_TEMPERATURE: f64 = 110.4;




/**
 * Sutherland's law for the dynamic viscosity of air, in dimensional form:
 * temperature in Kelvin, viscosity in Pa s.
 */
pub fn sutherland_viscosity(temperature: f64) -> f64 {
    SUTHERLAND_COEFFICIENT * temperature.powf(1.5) / (temperature + SUTHERLAND_TEMPERATURE)
}




/**
 * Velocity and temperature at one stencil node.
 */
#[derive(Clone, Copy)]
struct Sample {
    velocity: [f64; 3],
    temperature: f64,
}




/**
 * Viscous numerical flux through the face between node `index` and its
 * neighbor one layer up along `direction`, read from bank `tn`.
 *
 * The stencil has ten nodes: the two straddling the face, plus the lower and
 * upper neighbors of each along both transverse axes. Normal derivatives are
 * two-point differences across the face; transverse derivatives are
 * four-point centered averages. Velocity and temperature at the face are
 * arithmetic means of the straddling nodes. The diagonal stress term follows
 * the face normal. A solid transverse neighbor is replaced by the straddling
 * node on its side of the face.
 *
 * Returns `Error::StencilOutOfRange` when any stencil node lies outside the
 * node array, which happens only for faces in the outermost ghost layer.
 */
pub fn viscous_flux(
    direction: Direction,
    tn: usize,
    index: (i64, i64, i64),
    grid: &Grid,
    nodes: &[Node],
    model: &Model) -> Result<[f64; NUM_CONS], Error>
{
    let entire = grid.entire();
    let node_at = |at: (i64, i64, i64)| -> Result<Node, Error> {
        if entire.contains(at) {
            Ok(nodes[grid.index(at)])
        } else {
            Err(Error::StencilOutOfRange { axis: direction, index })
        }
    };
    let sample = |node: &Node| {
        let u = node.conserved(tn);
        let d = u.mass_density();
        Sample {
            velocity: [u.momentum_1() / d, u.momentum_2() / d, u.momentum_3() / d],
            temperature: u.temperature(model.cv),
        }
    };
    // Solid nodes are not flux sources: a solid transverse neighbor takes the
    // state of the straddling node on its side of the face.
    let transverse = |at: (i64, i64, i64), straddling: Sample| -> Result<Sample, Error> {
        let node = node_at(at)?;
        Ok(if node.flag == NodeFlag::Solid { straddling } else { sample(&node) })
    };

    let dd = grid.inverse_spacings();
    let s = direction.index();
    let here = sample(&node_at(index)?);
    let next = sample(&node_at(direction.neighbor(index, 1))?);

    // grad[a][b] is the derivative of velocity component a along axis b; only
    // the entries entering the stress on this face are filled.
    let mut grad = [[0.0; 3]; 3];

    for a in 0..3 {
        grad[a][s] = (next.velocity[a] - here.velocity[a]) * dd[s];
    }

    let (ta, tb) = direction.transverse();

    for t in [ta, tb].iter() {
        let plus = transverse(t.neighbor(index, 1), here)?;
        let minus = transverse(t.neighbor(index, -1), here)?;
        let plus_next = transverse(direction.neighbor(t.neighbor(index, 1), 1), next)?;
        let minus_next = transverse(direction.neighbor(t.neighbor(index, -1), 1), next)?;
        let b = t.index();

        for a in [s, b].iter() {
            grad[*a][b] = 0.25 * (
                plus.velocity[*a] + plus_next.velocity[*a] -
                minus.velocity[*a] - minus_next.velocity[*a]) * dd[b];
        }
    }
    let dt_ds = (next.temperature - here.temperature) * dd[s];
    let divergence = grad[0][0] + grad[1][1] + grad[2][2];

    let face_temperature = 0.5 * (here.temperature + next.temperature);
    let mu = model.ref_mu * sutherland_viscosity(face_temperature * model.ref_temperature);
    let heat_k = model.gamma * model.cv * mu / PRANDTL_NUMBER;

    let mut flux = [0.0; NUM_CONS];

    for a in 0..3 {
        flux[a + 1] = if a == s {
            mu * (2.0 * grad[s][s] - (2.0 / 3.0) * divergence)
        } else {
            mu * (grad[a][s] + grad[s][a])
        };
    }

    let face_velocity = [
        0.5 * (here.velocity[0] + next.velocity[0]),
        0.5 * (here.velocity[1] + next.velocity[1]),
        0.5 * (here.velocity[2] + next.velocity[2]),
    ];
    flux[4] = heat_k * dt_ds + flux[1] * face_velocity[0] + flux[2] * face_velocity[1] + flux[3] * face_velocity[2];

    Ok(flux)
}
