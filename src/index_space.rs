use core::ops::Range;
use crate::hydro::geometry::Direction;




#[derive(Clone, Debug, PartialEq, Eq)]


/**
 * Represents a rectangular region in a discrete 3D index space. Indexes are
 * ordered `(k, j, i)`, so that `i` (the x axis) is the fastest-varying one.
 * Each range is half-open: the start is reachable and the end is one past the
 * last index.
 */
pub struct IndexSpace {
    dk: Range<i64>,
    dj: Range<i64>,
    di: Range<i64>,
}




/**
 * Describes a rectangular index space. The index type is signed 64-bit integer.
 */
impl IndexSpace {


    pub fn new(dk: Range<i64>, dj: Range<i64>, di: Range<i64>) -> Self {

        assert!(
            dk.start <= dk.end && dj.start <= dj.end && di.start <= di.end,
            "index space has negative volume");

        Self { dk, dj, di }
    }


    /**
     * Return the number of indexes on each axis, in `(k, j, i)` order.
     */
    pub fn dim(&self) -> (usize, usize, usize) {
        ((self.dk.end - self.dk.start) as usize,
         (self.dj.end - self.dj.start) as usize,
         (self.di.end - self.di.start) as usize)
    }


    /**
     * Return the number of elements in this index space.
     */
    pub fn len(&self) -> usize {
        let (l, m, n) = self.dim();
        l * m * n
    }


    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /**
     * Return the minimum index (inclusive).
     */
    pub fn start(&self) -> (i64, i64, i64) {
        (self.dk.start, self.dj.start, self.di.start)
    }


    /**
     * Return the maximum index (exclusive).
     */
    pub fn end(&self) -> (i64, i64, i64) {
        (self.dk.end, self.dj.end, self.di.end)
    }


    /**
     * Return the range of indexes along the given axis.
     */
    pub fn range(&self, axis: Direction) -> &Range<i64> {
        match axis {
            Direction::X => &self.di,
            Direction::Y => &self.dj,
            Direction::Z => &self.dk,
        }
    }


    /**
     * Determine whether this index space contains the given index.
     */
    pub fn contains(&self, index: (i64, i64, i64)) -> bool {
        self.dk.contains(&index.0) && self.dj.contains(&index.1) && self.di.contains(&index.2)
    }


    /**
     * Expand this index space by the given number of elements on each axis.
     */
    pub fn extend_all(&self, delta: i64) -> Self {
        Self::new(
            self.dk.start - delta .. self.dk.end + delta,
            self.dj.start - delta .. self.dj.end + delta,
            self.di.start - delta .. self.di.end + delta)
    }


    /**
     * Trim this index space by the given number of elements on each axis.
     */
    pub fn trim_all(&self, delta: i64) -> Self {
        self.extend_all(-delta)
    }


    /**
     * Extend just the lower elements of this index space by a certain amount
     * on the given axis.
     */
    pub fn extend_lower(&self, delta: i64, axis: Direction) -> Self {
        let mut space = self.clone();
        match axis {
            Direction::X => space.di.start -= delta,
            Direction::Y => space.dj.start -= delta,
            Direction::Z => space.dk.start -= delta,
        }
        Self::new(space.dk, space.dj, space.di)
    }


    /**
     * Return the linear offset for the given index, in a row-major memory
     * buffer aligned with the start of this index space.
     */
    pub fn row_major_offset(&self, index: (i64, i64, i64)) -> usize {
        let k = (index.0 - self.dk.start) as usize;
        let j = (index.1 - self.dj.start) as usize;
        let i = (index.2 - self.di.start) as usize;
        let (_, m, n) = self.dim();
        (k * m + j) * n + i
    }


    /**
     * Return an iterator which traverses the index space in row-major order
     * (C-like; the final index increases fastest).
     */
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64, i64)> + '_ {
        self.dk.clone().flat_map(move |k| {
            self.dj.clone().flat_map(move |j| self.di.clone().map(move |i| (k, j, i)))
        })
    }
}




// ============================================================================
impl From<IndexSpace> for (Range<i64>, Range<i64>, Range<i64>) {
    fn from(space: IndexSpace) -> Self {
        (space.dk, space.dj, space.di)
    }
}
