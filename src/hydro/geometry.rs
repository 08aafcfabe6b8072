use std::ops::{Add, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};




/**
 * A 3D vector
 */
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vector3d(f64, f64, f64);




// ============================================================================
impl Vector3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3d(x, y, z)
    }

    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    pub fn z(&self) -> f64 {
        self.2
    }

    pub fn component(&self, direction: Direction) -> f64 {
        match direction {
            Direction::X => self.0,
            Direction::Y => self.1,
            Direction::Z => self.2,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.0, self.1, self.2]
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.0 * other.0 + self.1 * other.1 + self.2 * other.2
    }

    pub fn cross(&self, other: &Self) -> Self {
        Vector3d(
            self.1 * other.2 - self.2 * other.1,
            self.2 * other.0 - self.0 * other.2,
            self.0 * other.1 - self.1 * other.0)
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dist2(&self, other: &Self) -> f64 {
        let d = *self - *other;
        d.dot(&d)
    }

    pub fn dist(&self, other: &Self) -> f64 {
        self.dist2(other).sqrt()
    }

    /**
     * Return this vector divided by the given normalizer. Passing the norm
     * yields a unit vector; a zero normalizer produces non-finite components.
     */
    pub fn normalize_by(&self, normalizer: f64) -> Self {
        Vector3d(self.0 / normalizer, self.1 / normalizer, self.2 / normalizer)
    }

    pub fn normalized(&self) -> Self {
        self.normalize_by(self.norm())
    }
}




// ============================================================================
impl Add<Vector3d> for Vector3d {
    type Output = Self;
    fn add(self, v: Self) -> Self {
        Vector3d(self.0 + v.0, self.1 + v.1, self.2 + v.2)
    }
}

impl Sub<Vector3d> for Vector3d {
    type Output = Self;
    fn sub(self, v: Self) -> Self {
        Vector3d(self.0 - v.0, self.1 - v.1, self.2 - v.2)
    }
}

impl Mul<f64> for Vector3d {
    type Output = Self;
    fn mul(self, a: f64) -> Self {
        Vector3d(self.0 * a, self.1 * a, self.2 * a)
    }
}

impl Neg for Vector3d {
    type Output = Self;
    fn neg(self) -> Self {
        Vector3d(-self.0, -self.1, -self.2)
    }
}

impl From<[f64; 3]> for Vector3d {
    fn from(a: [f64; 3]) -> Self {
        Vector3d(a[0], a[1], a[2])
    }
}




/**
 * Enum to hold a unit vector in 3D space
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    X,
    Y,
    Z,
}




// ============================================================================
impl Direction {

    pub const ALL: [Direction; 3] = [Direction::X, Direction::Y, Direction::Z];

    pub fn along(&self, other: Direction) -> f64 {
        if *self == other {
            1.0
        } else {
            0.0
        }
    }

    /**
     * The position of this axis in (x, y, z) ordered arrays.
     */
    pub fn index(&self) -> usize {
        match self {
            Direction::X => 0,
            Direction::Y => 1,
            Direction::Z => 2,
        }
    }

    /**
     * Return the unit offset of a neighbor along this axis, in (k, j, i)
     * node address order.
     */
    pub fn offset(&self) -> (i64, i64, i64) {
        match self {
            Direction::X => (0, 0, 1),
            Direction::Y => (0, 1, 0),
            Direction::Z => (1, 0, 0),
        }
    }

    /**
     * The node `delta` layers away from `index` along this axis.
     */
    pub fn neighbor(&self, (k, j, i): (i64, i64, i64), delta: i64) -> (i64, i64, i64) {
        let (dk, dj, di) = self.offset();
        (k + dk * delta, j + dj * delta, i + di * delta)
    }

    /**
     * The two transverse axes, in cyclic order.
     */
    pub fn transverse(&self) -> (Direction, Direction) {
        match self {
            Direction::X => (Direction::Y, Direction::Z),
            Direction::Y => (Direction::Z, Direction::X),
            Direction::Z => (Direction::X, Direction::Y),
        }
    }
}




/**
 * Sign of a real number as an integer: 1, -1, or 0.
 */
pub fn sign(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}




/**
 * Build two unit tangents for the unit normal `n`, such that `(n, ta, tb)` is
 * a right-handed orthonormal triad. The axis skipped when forming `ta` is
 * picked by a comparison chain starting at z, then y, then x; each step moves
 * the mark to the axis with the strictly smaller magnitude.
 */
pub fn orthonormal_triad(n: &Vector3d) -> (Vector3d, Vector3d) {
    let mut mark = Direction::Z;

    if n.component(mark).abs() > n.y().abs() {
        mark = Direction::Y;
    }
    if n.component(mark).abs() > n.x().abs() {
        mark = Direction::X;
    }

    let ta = match mark {
        Direction::X => Vector3d(0.0, -n.z(), n.y()),
        Direction::Y => Vector3d(-n.z(), 0.0, n.x()),
        Direction::Z => Vector3d(-n.y(), n.x(), 0.0),
    };
    let ta = ta.normalized();
    let tb = n.cross(&ta);
    (ta, tb)
}
