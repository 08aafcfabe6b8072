use std::convert::TryFrom;
use std::ops::{Add, Div, Mul, Sub};
use serde::{Deserialize, Serialize};
use super::error::Error;
use super::geometry::Direction;




/// Number of conserved fields: density, three momenta, and total energy.
pub const NUM_CONS: usize = 5;




// ============================================================================
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Conserved(f64, f64, f64, f64, f64);

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Primitive(f64, f64, f64, f64, f64, f64);




/**
 * Averaged state at a face between two nodes: velocity, total specific
 * enthalpy, and sound speed. This is the state at which the flux Jacobian is
 * diagonalized.
 */
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct InterfaceState {
    pub u: f64,
    pub v: f64,
    pub w: f64,
    pub total_enthalpy: f64,
    pub sound_speed: f64,
}




/**
 * Selects how the interface state is built from the two straddling nodes.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Averager {
    Arithmetic,
    Roe,
}




// ============================================================================
impl Conserved {

    pub fn new(d: f64, s1: f64, s2: f64, s3: f64, e: f64) -> Self {
        Self(d, s1, s2, s3, e)
    }

    pub fn as_array(&self) -> [f64; NUM_CONS] {
        [self.0, self.1, self.2, self.3, self.4]
    }

    pub fn mass_density(&self) -> f64 {
        self.0
    }

    pub fn momentum_1(&self) -> f64 {
        self.1
    }

    pub fn momentum_2(&self) -> f64 {
        self.2
    }

    pub fn momentum_3(&self) -> f64 {
        self.3
    }

    pub fn energy_density(&self) -> f64 {
        self.4
    }

    pub fn momentum(&self, direction: Direction) -> f64 {
        match direction {
            Direction::X => self.momentum_1(),
            Direction::Y => self.momentum_2(),
            Direction::Z => self.momentum_3(),
        }
    }

    pub fn momentum_squared(&self) -> f64 {
        self.1 * self.1 + self.2 * self.2 + self.3 * self.3
    }

    pub fn velocity(&self, direction: Direction) -> f64 {
        self.momentum(direction) / self.mass_density()
    }

    /**
     * Internal energy per unit volume, total energy less the kinetic part.
     */
    pub fn internal_energy_density(&self) -> f64 {
        self.energy_density() - 0.5 * self.momentum_squared() / self.mass_density()
    }

    /**
     * Gas pressure from the ideal gas law. Undefined for non-positive density.
     */
    pub fn gas_pressure(&self, gamma_law_index: f64) -> f64 {
        self.internal_energy_density() * (gamma_law_index - 1.0)
    }

    /**
     * Temperature, given the specific heat at constant volume. Undefined for
     * non-positive density.
     */
    pub fn temperature(&self, cv: f64) -> f64 {
        self.internal_energy_density() / (self.mass_density() * cv)
    }

    /**
     * Check that the density and the specific internal energy are both
     * positive.
     */
    pub fn validate(&self) -> Result<(), Error> {
        let d = self.mass_density();
        let e = self.internal_energy_density() / d;

        if !(d > 0.0) || !(e > 0.0) {
            Err(Error::NonphysicalState {
                density: d,
                internal_energy: e,
            })
        } else {
            Ok(())
        }
    }

    pub fn to_primitive(&self, gamma_law_index: f64, gas_constant: f64) -> Result<Primitive, Error> {
        self.validate()?;

        let d = self.mass_density();
        let pg = self.gas_pressure(gamma_law_index);

        Ok(Primitive(
            d,
            self.momentum_1() / d,
            self.momentum_2() / d,
            self.momentum_3() / d,
            pg,
            pg / (d * gas_constant)))
    }

    /**
     * The physical (Euler) flux of this state through a face normal to the
     * given direction.
     */
    pub fn flux_vector(&self, direction: Direction, gamma_law_index: f64) -> Conserved {
        let pg = self.gas_pressure(gamma_law_index);
        let vn = self.velocity(direction);

        Conserved(
            self.0 * vn,
            self.1 * vn + pg * direction.along(Direction::X),
            self.2 * vn + pg * direction.along(Direction::Y),
            self.3 * vn + pg * direction.along(Direction::Z),
            self.4 * vn + pg * vn)
    }
}




// ============================================================================
impl Primitive {

    pub fn new(d: f64, v1: f64, v2: f64, v3: f64, p: f64, t: f64) -> Self {
        Self(d, v1, v2, v3, p, t)
    }

    pub fn as_array(&self) -> [f64; 6] {
        [self.0, self.1, self.2, self.3, self.4, self.5]
    }

    pub fn mass_density(&self) -> f64 {
        self.0
    }

    pub fn velocity_1(&self) -> f64 {
        self.1
    }

    pub fn velocity_2(&self) -> f64 {
        self.2
    }

    pub fn velocity_3(&self) -> f64 {
        self.3
    }

    pub fn gas_pressure(&self) -> f64 {
        self.4
    }

    pub fn temperature(&self) -> f64 {
        self.5
    }

    pub fn velocity(&self, direction: Direction) -> f64 {
        match direction {
            Direction::X => self.velocity_1(),
            Direction::Y => self.velocity_2(),
            Direction::Z => self.velocity_3(),
        }
    }

    pub fn velocity_squared(&self) -> f64 {
        self.1 * self.1 + self.2 * self.2 + self.3 * self.3
    }

    pub fn sound_speed_squared(&self, gamma_law_index: f64) -> f64 {
        gamma_law_index * self.gas_pressure() / self.mass_density()
    }

    pub fn max_signal_speed(&self, direction: Direction, gamma_law_index: f64) -> f64 {
        self.velocity(direction).abs() + self.sound_speed_squared(gamma_law_index).sqrt()
    }

    pub fn to_conserved(&self, gamma_law_index: f64) -> Conserved {
        let d   = self.mass_density();
        let p   = self.gas_pressure();
        let vsq = self.velocity_squared();

        Conserved(
            d,
            d * self.velocity_1(),
            d * self.velocity_2(),
            d * self.velocity_3(),
            d * vsq * 0.5 + p / (gamma_law_index - 1.0))
    }
}




// ============================================================================
impl InterfaceState {

    pub fn velocity(&self, direction: Direction) -> f64 {
        match direction {
            Direction::X => self.u,
            Direction::Y => self.v,
            Direction::Z => self.w,
        }
    }

    pub fn specific_kinetic_energy(&self) -> f64 {
        0.5 * (self.u * self.u + self.v * self.v + self.w * self.w)
    }
}




// ============================================================================
impl TryFrom<i64> for Averager {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Error> {
        match value {
            0 => Ok(Averager::Arithmetic),
            1 => Ok(Averager::Roe),
            _ => Err(Error::BadSelector { kind: "averager", value }),
        }
    }
}




// ============================================================================
impl Add<Conserved> for Conserved {
    type Output = Conserved;
    fn add(self, u: Self) -> Conserved {
        Conserved(self.0 + u.0, self.1 + u.1, self.2 + u.2, self.3 + u.3, self.4 + u.4)
    }
}

impl Sub<Conserved> for Conserved {
    type Output = Self;
    fn sub(self, u: Self) -> Self {
        Self(self.0 - u.0, self.1 - u.1, self.2 - u.2, self.3 - u.3, self.4 - u.4)
    }
}

impl Mul<f64> for Conserved {
    type Output = Self;
    fn mul(self, a: f64) -> Self {
        Self(self.0 * a, self.1 * a, self.2 * a, self.3 * a, self.4 * a)
    }
}

impl Div<f64> for Conserved {
    type Output = Self;
    fn div(self, a: f64) -> Self {
        Self(self.0 / a, self.1 / a, self.2 / a, self.3 / a, self.4 / a)
    }
}

impl From<[f64; NUM_CONS]> for Conserved {
    fn from(a: [f64; NUM_CONS]) -> Self {
        Self(a[0], a[1], a[2], a[3], a[4])
    }
}

impl From<Conserved> for [f64; NUM_CONS] {
    fn from(u: Conserved) -> Self {
        u.as_array()
    }
}




// ============================================================================
pub fn primitive_from_conservative(gamma_law_index: f64, gas_constant: f64, u: &Conserved) -> Result<Primitive, Error> {
    u.to_primitive(gamma_law_index, gas_constant)
}

pub fn conservative_from_primitive(gamma_law_index: f64, p: &Primitive) -> Conserved {
    p.to_conserved(gamma_law_index)
}

pub fn pressure(gamma_law_index: f64, u: &Conserved) -> f64 {
    u.gas_pressure(gamma_law_index)
}

pub fn temperature(cv: f64, u: &Conserved) -> f64 {
    u.temperature(cv)
}

pub fn convective_flux(direction: Direction, gamma_law_index: f64, u: &Conserved) -> Conserved {
    u.flux_vector(direction, gamma_law_index)
}




/**
 * Build the interface state between a left and right node. With the Roe
 * averager the velocity and total enthalpy are weighted by the square root of
 * the density ratio; the arithmetic averager weights both sides equally. The
 * sound speed is recovered from the averaged enthalpy and velocity.
 */
pub fn symmetric_average(averager: Averager, gamma_law_index: f64, ul: &Conserved, ur: &Conserved) -> InterfaceState {
    let gm1 = gamma_law_index - 1.0;

    let dl = ul.mass_density();
    let (u_l, v_l, w_l) = (ul.momentum_1() / dl, ul.momentum_2() / dl, ul.momentum_3() / dl);
    let hl = (ul.energy_density() / dl) * gamma_law_index - 0.5 * (u_l * u_l + v_l * v_l + w_l * w_l) * gm1;

    let dr = ur.mass_density();
    let (u_r, v_r, w_r) = (ur.momentum_1() / dr, ur.momentum_2() / dr, ur.momentum_3() / dr);
    let hr = (ur.energy_density() / dr) * gamma_law_index - 0.5 * (u_r * u_r + v_r * v_r + w_r * w_r) * gm1;

    let d = match averager {
        Averager::Arithmetic => 1.0,
        Averager::Roe => (dr / dl).sqrt(),
    };
    let mean = |xl: f64, xr: f64| (xl + d * xr) / (1.0 + d);

    let u = mean(u_l, u_r);
    let v = mean(v_l, v_r);
    let w = mean(w_l, w_r);
    let total_enthalpy = mean(hl, hr);
    let sound_speed = (gm1 * (total_enthalpy - 0.5 * (u * u + v * v + w * w))).sqrt();

    InterfaceState { u, v, w, total_enthalpy, sound_speed }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::*;
    use approx::assert_relative_eq;

    const GAMMA: f64 = 1.4;
    const GAS_R: f64 = 1.0 / (GAMMA * 0.5 * 0.5);

    fn sample_states() -> Vec<Conserved> {
        vec![
            Primitive::new(1.0, 0.0, 0.0, 0.0, 1.0 / GAMMA, 0.0).to_conserved(GAMMA),
            Primitive::new(0.125, 0.3, -0.2, 0.7, 0.1, 0.0).to_conserved(GAMMA),
            Primitive::new(4.5, -12.0, 3.0, 0.001, 250.0, 0.0).to_conserved(GAMMA),
            Primitive::new(1e-3, 1e-2, 5.0, -5.0, 2e-4, 0.0).to_conserved(GAMMA),
        ]
    }

    #[test]
    fn primitive_round_trip_recovers_conserved_state() {
        for u in sample_states() {
            let p = primitive_from_conservative(GAMMA, GAS_R, &u).unwrap();
            let v = conservative_from_primitive(GAMMA, &p);
            for (a, b) in u.as_array().iter().zip(v.as_array().iter()) {
                assert_relative_eq!(*a, *b, epsilon = 1e-12, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn temperature_follows_ideal_gas_law() {
        let cv = GAS_R / (GAMMA - 1.0);
        for u in sample_states() {
            let p = u.to_primitive(GAMMA, GAS_R).unwrap();
            assert_relative_eq!(p.temperature(), temperature(cv, &u), epsilon = 1e-12, max_relative = 1e-12);
            assert_relative_eq!(p.gas_pressure(), pressure(GAMMA, &u), epsilon = 1e-12, max_relative = 1e-12);
        }
    }

    #[test]
    fn nonphysical_states_are_rejected() {
        let negative_density = Conserved::new(-1.0, 0.0, 0.0, 0.0, 1.0);
        let negative_energy = Conserved::new(1.0, 2.0, 0.0, 0.0, 1.0);
        assert!(matches!(negative_density.to_primitive(GAMMA, GAS_R), Err(Error::NonphysicalState { .. })));
        assert!(matches!(negative_energy.to_primitive(GAMMA, GAS_R), Err(Error::NonphysicalState { .. })));
    }

    #[test]
    fn pressure_is_invariant_under_velocity_boost() {
        for u in sample_states() {
            let p = u.to_primitive(GAMMA, GAS_R).unwrap();
            let boosted = Primitive::new(
                p.mass_density(),
                p.velocity_1() + 3.0,
                p.velocity_2() - 1.5,
                p.velocity_3() + 0.25,
                p.gas_pressure(),
                p.temperature()).to_conserved(GAMMA);
            assert_relative_eq!(pressure(GAMMA, &u), pressure(GAMMA, &boosted), epsilon = 1e-10, max_relative = 1e-10);
        }
    }

    #[test]
    fn convective_flux_matches_physical_flux_rows() {
        for u in sample_states() {
            let p = u.to_primitive(GAMMA, GAS_R).unwrap();
            let (d, vx, vy, vz, pg) = (p.mass_density(), p.velocity_1(), p.velocity_2(), p.velocity_3(), p.gas_pressure());
            let e = u.energy_density();
            let expected = [
                [d * vx, d * vx * vx + pg, d * vx * vy, d * vx * vz, (e + pg) * vx],
                [d * vy, d * vy * vx, d * vy * vy + pg, d * vy * vz, (e + pg) * vy],
                [d * vz, d * vz * vx, d * vz * vy, d * vz * vz + pg, (e + pg) * vz],
            ];
            for axis in Direction::ALL.iter() {
                let f = convective_flux(*axis, GAMMA, &u).as_array();
                for (a, b) in f.iter().zip(expected[axis.index()].iter()) {
                    assert_relative_eq!(*a, *b, epsilon = 1e-12, max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn uniform_flow_flux_along_x() {
        let u = Primitive::new(1.0, 1.0, 0.0, 0.0, 1.0 / GAMMA, 0.0).to_conserved(GAMMA);
        let f = convective_flux(Direction::X, GAMMA, &u).as_array();
        let e = u.energy_density();
        assert_relative_eq!(f[0], 1.0, epsilon = 1e-14, max_relative = 1e-14);
        assert_relative_eq!(f[1], 1.0 + 1.0 / GAMMA, epsilon = 1e-14, max_relative = 1e-14);
        assert_eq!(f[2], 0.0);
        assert_eq!(f[3], 0.0);
        assert_relative_eq!(f[4], e + 1.0 / GAMMA, epsilon = 1e-14, max_relative = 1e-14);
    }

    #[test]
    fn arithmetic_average_of_identical_states_is_that_state() {
        for u in sample_states() {
            let p = u.to_primitive(GAMMA, GAS_R).unwrap();
            let a = symmetric_average(Averager::Arithmetic, GAMMA, &u, &u);
            let c = p.sound_speed_squared(GAMMA).sqrt();
            let h = (u.energy_density() + p.gas_pressure()) / p.mass_density();
            assert_relative_eq!(a.u, p.velocity_1(), epsilon = 1e-12, max_relative = 1e-12);
            assert_relative_eq!(a.v, p.velocity_2(), epsilon = 1e-12, max_relative = 1e-12);
            assert_relative_eq!(a.w, p.velocity_3(), epsilon = 1e-12, max_relative = 1e-12);
            assert_relative_eq!(a.total_enthalpy, h, epsilon = 1e-12, max_relative = 1e-12);
            assert_relative_eq!(a.sound_speed, c, epsilon = 1e-10, max_relative = 1e-10);
        }
    }

    #[test]
    fn roe_average_with_equal_densities_is_arithmetic() {
        let ul = Primitive::new(2.0, 0.3, -0.2, 0.1, 1.0, 0.0).to_conserved(GAMMA);
        let ur = Primitive::new(2.0, -0.7, 0.4, 0.9, 3.0, 0.0).to_conserved(GAMMA);
        let roe = symmetric_average(Averager::Roe, GAMMA, &ul, &ur);
        let ari = symmetric_average(Averager::Arithmetic, GAMMA, &ul, &ur);
        assert_relative_eq!(roe.u, ari.u, epsilon = 1e-14, max_relative = 1e-14);
        assert_relative_eq!(roe.v, ari.v, epsilon = 1e-14, max_relative = 1e-14);
        assert_relative_eq!(roe.w, ari.w, epsilon = 1e-14, max_relative = 1e-14);
        assert_relative_eq!(roe.total_enthalpy, ari.total_enthalpy, epsilon = 1e-14, max_relative = 1e-14);
        assert_relative_eq!(roe.sound_speed, ari.sound_speed, epsilon = 1e-14, max_relative = 1e-14);
    }

    #[test]
    fn averager_selector_out_of_range_is_an_error() {
        assert_eq!(Averager::try_from(0).unwrap(), Averager::Arithmetic);
        assert_eq!(Averager::try_from(1).unwrap(), Averager::Roe);
        assert!(matches!(Averager::try_from(2), Err(Error::BadSelector { .. })));
    }
}
