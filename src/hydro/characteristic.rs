use super::euler::{InterfaceState, NUM_CONS};
use super::geometry::Direction;




/// A dense 5x5 matrix, row-major.
pub type Matrix5 = [[f64; NUM_CONS]; NUM_CONS];




/**
 * Eigenvalues of the Euler flux Jacobian along the given direction, evaluated
 * at the interface state: `(v - c, v, v, v, v + c)` where `v` is the velocity
 * component along the direction.
 */
pub fn eigenvalues(direction: Direction, state: &InterfaceState) -> [f64; NUM_CONS] {
    let vn = state.velocity(direction);
    let c = state.sound_speed;
    [vn - c, vn, vn, vn, vn + c]
}




/**
 * Left eigenvectors (as rows) of the flux Jacobian along the given direction.
 * The product with the right eigenvector matrix of the same direction and
 * state is the identity.
 */
pub fn left_eigenvectors(direction: Direction, gamma_law_index: f64, state: &InterfaceState) -> Matrix5 {
    let InterfaceState { u, v, w, sound_speed: c, .. } = *state;
    let q = state.specific_kinetic_energy();
    let b = (gamma_law_index - 1.0) / (2.0 * c * c);
    let d = 1.0 / (2.0 * c);

    match direction {
        Direction::X => [
            [b * q + d * u,       -b * u - d,        -b * v,                -b * w,                b],
            [-2.0 * b * q + 1.0,  2.0 * b * u,       2.0 * b * v,           2.0 * b * w,           -2.0 * b],
            [-2.0 * b * q * v,    2.0 * b * v * u,   2.0 * b * v * v + 1.0, 2.0 * b * w * v,       -2.0 * b * v],
            [-2.0 * b * q * w,    2.0 * b * w * u,   2.0 * b * w * v,       2.0 * b * w * w + 1.0, -2.0 * b * w],
            [b * q - d * u,       -b * u + d,        -b * v,                -b * w,                b],
        ],
        Direction::Y => [
            [b * q + d * v,       -b * u,                -b * v - d,        -b * w,                b],
            [-2.0 * b * q * u,    2.0 * b * u * u + 1.0, 2.0 * b * v * u,   2.0 * b * w * u,       -2.0 * b * u],
            [-2.0 * b * q + 1.0,  2.0 * b * u,           2.0 * b * v,       2.0 * b * w,           -2.0 * b],
            [-2.0 * b * q * w,    2.0 * b * w * u,       2.0 * b * w * v,   2.0 * b * w * w + 1.0, -2.0 * b * w],
            [b * q - d * v,       -b * u,                -b * v + d,        -b * w,                b],
        ],
        Direction::Z => [
            [b * q + d * w,       -b * u,                -b * v,                -b * w - d,       b],
            [-2.0 * b * q * u,    2.0 * b * u * u + 1.0, 2.0 * b * v * u,       2.0 * b * w * u,  -2.0 * b * u],
            [-2.0 * b * q * v,    2.0 * b * v * u,       2.0 * b * v * v + 1.0, 2.0 * b * w * v,  -2.0 * b * v],
            [-2.0 * b * q + 1.0,  2.0 * b * u,           2.0 * b * v,           2.0 * b * w,      -2.0 * b],
            [b * q - d * w,       -b * u,                -b * v,                -b * w + d,       b],
        ],
    }
}




/**
 * Right eigenvectors (as columns) of the flux Jacobian along the given
 * direction.
 */
pub fn right_eigenvectors(direction: Direction, state: &InterfaceState) -> Matrix5 {
    let InterfaceState { u, v, w, total_enthalpy: h, sound_speed: c } = *state;
    let q = state.specific_kinetic_energy();

    match direction {
        Direction::X => [
            [1.0,       1.0,       0.0, 0.0, 1.0],
            [u - c,     u,         0.0, 0.0, u + c],
            [v,         0.0,       1.0, 0.0, v],
            [w,         0.0,       0.0, 1.0, w],
            [h - u * c, u * u - q, v,   w,   h + u * c],
        ],
        Direction::Y => [
            [1.0,       0.0, 1.0,       0.0, 1.0],
            [u,         1.0, 0.0,       0.0, u],
            [v - c,     0.0, v,         0.0, v + c],
            [w,         0.0, 0.0,       1.0, w],
            [h - v * c, u,   v * v - q, w,   h + v * c],
        ],
        Direction::Z => [
            [1.0,       0.0, 0.0, 1.0,       1.0],
            [u,         1.0, 0.0, 0.0,       u],
            [v,         0.0, 1.0, 0.0,       v],
            [w - c,     0.0, 0.0, w,         w + c],
            [h - w * c, u,   v,   w * w - q, h + w * c],
        ],
    }
}




/**
 * The Euler flux Jacobian dF/dU along the given direction, in terms of the
 * interface velocity and total enthalpy.
 */
pub fn flux_jacobian(direction: Direction, gamma_law_index: f64, state: &InterfaceState) -> Matrix5 {
    let gm1 = gamma_law_index - 1.0;
    let vel = [state.u, state.v, state.w];
    let h = state.total_enthalpy;
    let q = state.specific_kinetic_energy();
    let vn = state.velocity(direction);
    let n = [
        direction.along(Direction::X),
        direction.along(Direction::Y),
        direction.along(Direction::Z),
    ];
    let mut a = [[0.0; NUM_CONS]; NUM_CONS];

    for b in 0..3 {
        a[0][1 + b] = n[b];
    }
    for r in 0..3 {
        a[1 + r][0] = gm1 * q * n[r] - vel[r] * vn;
        for b in 0..3 {
            let delta = if r == b { vn } else { 0.0 };
            a[1 + r][1 + b] = vel[r] * n[b] - gm1 * vel[b] * n[r] + delta;
        }
        a[1 + r][4] = gm1 * n[r];
    }
    a[4][0] = vn * (gm1 * q - h);
    for b in 0..3 {
        a[4][1 + b] = h * n[b] - gm1 * vel[b] * vn;
    }
    a[4][4] = gamma_law_index * vn;
    a
}




// ============================================================================
pub fn mat_vec(m: &Matrix5, x: &[f64; NUM_CONS]) -> [f64; NUM_CONS] {
    let mut y = [0.0; NUM_CONS];

    for (yr, row) in y.iter_mut().zip(m.iter()) {
        *yr = row.iter().zip(x.iter()).map(|(a, b)| a * b).sum();
    }
    y
}

pub fn mat_mul(a: &Matrix5, b: &Matrix5) -> Matrix5 {
    let mut c = [[0.0; NUM_CONS]; NUM_CONS];

    for r in 0..NUM_CONS {
        for s in 0..NUM_CONS {
            c[r][s] = (0..NUM_CONS).map(|t| a[r][t] * b[t][s]).sum();
        }
    }
    c
}

pub fn identity() -> Matrix5 {
    let mut m = [[0.0; NUM_CONS]; NUM_CONS];

    for (r, row) in m.iter_mut().enumerate() {
        row[r] = 1.0;
    }
    m
}
