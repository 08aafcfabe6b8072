use std::convert::TryFrom;
use serde::{Deserialize, Serialize};
use super::error::Error;
use super::euler::NUM_CONS;




/// Smoothing parameter of the Steger-Warming splitting near sonic points.
pub const STEGER_WARMING_EPSILON: f64 = 1.0e-3;




/**
 * Selects how the eigenvalue spectrum is split into non-negative and
 * non-positive parts.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Splitter {
    LocalLaxFriedrichs,
    StegerWarming,
}




// ============================================================================
impl Splitter {

    /**
     * Split the eigenvalues into `(plus, minus)` with `plus + minus` equal to
     * the input.
     */
    pub fn split(&self, lambda: &[f64; NUM_CONS]) -> ([f64; NUM_CONS], [f64; NUM_CONS]) {
        match self {
            Splitter::LocalLaxFriedrichs => local_lax_friedrichs(lambda),
            Splitter::StegerWarming => steger_warming(lambda),
        }
    }
}

impl TryFrom<i64> for Splitter {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Error> {
        match value {
            0 => Ok(Splitter::LocalLaxFriedrichs),
            1 => Ok(Splitter::StegerWarming),
            _ => Err(Error::BadSelector { kind: "splitter", value }),
        }
    }
}




pub fn split_eigenvalues(splitter: Splitter, lambda: &[f64; NUM_CONS]) -> ([f64; NUM_CONS], [f64; NUM_CONS]) {
    splitter.split(lambda)
}




/**
 * The local maximum wavespeed is `|v| + c`, recovered from the middle and the
 * largest eigenvalue.
 */
fn local_lax_friedrichs(lambda: &[f64; NUM_CONS]) -> ([f64; NUM_CONS], [f64; NUM_CONS]) {
    let lambda_star = lambda[2].abs() + lambda[4] - lambda[2];
    let mut plus = [0.0; NUM_CONS];
    let mut minus = [0.0; NUM_CONS];

    for (n, l) in lambda.iter().enumerate() {
        plus[n] = 0.5 * (l + lambda_star);
        minus[n] = 0.5 * (l - lambda_star);
    }
    (plus, minus)
}

fn steger_warming(lambda: &[f64; NUM_CONS]) -> ([f64; NUM_CONS], [f64; NUM_CONS]) {
    let eps2 = STEGER_WARMING_EPSILON * STEGER_WARMING_EPSILON;
    let mut plus = [0.0; NUM_CONS];
    let mut minus = [0.0; NUM_CONS];

    for (n, l) in lambda.iter().enumerate() {
        let a = (l * l + eps2).sqrt();
        plus[n] = 0.5 * (l + a);
        minus[n] = 0.5 * (l - a);
    }
    (plus, minus)
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::*;
    use approx::assert_abs_diff_eq;

    fn spectra() -> Vec<[f64; NUM_CONS]> {
        let mut out = Vec::new();
        for &(v, c) in [(0.0, 1.0), (0.3, 1.2), (-2.0, 0.7), (5.0, 1.0), (-0.5, 3.0)].iter() {
            out.push([v - c, v, v, v, v + c]);
        }
        out
    }

    #[test]
    fn lax_friedrichs_split_is_consistent_and_signed() {
        for lambda in spectra() {
            let (plus, minus) = Splitter::LocalLaxFriedrichs.split(&lambda);
            for n in 0..NUM_CONS {
                assert_abs_diff_eq!(plus[n] + minus[n], lambda[n], epsilon = 1e-14);
                assert!(plus[n] >= -1e-14);
                assert!(minus[n] <= 1e-14);
            }
        }
    }

    #[test]
    fn steger_warming_split_is_consistent_and_signed() {
        for lambda in spectra() {
            let (plus, minus) = Splitter::StegerWarming.split(&lambda);
            for n in 0..NUM_CONS {
                assert_abs_diff_eq!(plus[n] + minus[n], lambda[n], epsilon = 2.0 * STEGER_WARMING_EPSILON);
                assert!(plus[n] >= 0.0);
                assert!(minus[n] <= 0.0);
            }
        }
    }

    #[test]
    fn lax_friedrichs_on_stationary_contact() {
        let c = 1.5;
        let (plus, minus) = split_eigenvalues(Splitter::LocalLaxFriedrichs, &[-c, 0.0, 0.0, 0.0, c]);
        assert_eq!(plus, [0.0, 0.5 * c, 0.5 * c, 0.5 * c, c]);
        assert_eq!(minus, [-c, -0.5 * c, -0.5 * c, -0.5 * c, 0.0]);
    }

    #[test]
    fn steger_warming_at_sonic_point() {
        let (plus, minus) = split_eigenvalues(Splitter::StegerWarming, &[0.0; NUM_CONS]);
        for n in 0..NUM_CONS {
            assert_abs_diff_eq!(plus[n], 0.5 * STEGER_WARMING_EPSILON, epsilon = 1e-15);
            assert_abs_diff_eq!(minus[n], -0.5 * STEGER_WARMING_EPSILON, epsilon = 1e-15);
        }
    }

    #[test]
    fn splitter_selector_out_of_range_is_an_error() {
        assert_eq!(Splitter::try_from(1).unwrap(), Splitter::StegerWarming);
        assert!(Splitter::try_from(-1).is_err());
    }
}
