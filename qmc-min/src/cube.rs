// Copyright (c) The logic-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{borrow::Cow, fmt};

/// The maximum number of input variables supported.
pub const MAX_INPUTS: usize = 16;

/// A partially specified point of the Boolean space: a product term over the input variables.
///
/// `value` holds the defined bits and `mask` marks the free (don't care) positions. Input
/// variable 0 is the most significant bit of a row index, so for `n` inputs variable `i` lives
/// at bit `n - 1 - i`.
///
/// Value bits under the mask are always cleared, so two cubes describing the same set of
/// minterms compare equal. Cubes order by `(value, mask)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cube {
    value: u32,
    mask: u32,
}

impl Cube {
    /// Returns the cube covering exactly the minterm `x`.
    #[inline]
    pub const fn minterm(x: u32) -> Self {
        Self { value: x, mask: 0 }
    }

    #[inline]
    pub const fn new(value: u32, mask: u32) -> Self {
        Self {
            value: value & !mask,
            mask,
        }
    }

    /// Returns the cube covering every minterm of an `input_count`-variable space.
    #[inline]
    pub const fn universe(input_count: usize) -> Self {
        Self::new(0, input_mask(input_count))
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[inline]
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// The number of defined 1-bits.
    #[inline]
    pub fn weight(&self) -> u32 {
        self.value.count_ones()
    }

    /// The number of free variables.
    #[inline]
    pub fn free_count(&self) -> u32 {
        self.mask.count_ones()
    }

    /// The number of literals in this product term, for an `input_count`-variable space.
    #[inline]
    pub fn literal_count(&self, input_count: usize) -> u32 {
        (!self.mask & input_mask(input_count)).count_ones()
    }

    #[inline]
    pub fn is_universe(&self, input_count: usize) -> bool {
        self.mask == input_mask(input_count)
    }

    /// Returns true if the minterm `x` belongs to this cube.
    #[inline]
    pub fn covers(&self, x: u32) -> bool {
        (x ^ self.value) & !self.mask == 0
    }

    /// Returns true if every minterm of `other` belongs to this cube.
    #[inline]
    pub fn contains(&self, other: &Cube) -> bool {
        other.mask & self.mask == other.mask && self.covers(other.value)
    }

    #[inline]
    pub fn strictly_contains(&self, other: &Cube) -> bool {
        self != other && self.contains(other)
    }

    /// Merges two cubes that share a mask and differ in exactly one defined bit.
    ///
    /// The differing bit becomes free in the result.
    pub fn merge(&self, other: &Cube) -> Option<Cube> {
        if self.mask != other.mask {
            return None;
        }
        let diff = self.value ^ other.value;
        (diff.count_ones() == 1).then(|| Cube::new(self.value, self.mask | diff))
    }

    /// Iterates over the minterms covered by this cube, in ascending order.
    #[inline]
    pub fn minterms(&self) -> Minterms {
        Minterms {
            value: self.value,
            mask: self.mask,
            next: Some(0),
        }
    }

    #[inline]
    pub fn matrix_display(&self, input_count: usize) -> CubeMatrixDisplay<'_> {
        CubeMatrixDisplay::new(self, input_count)
    }
}

/// Returns a mask with the low `input_count` bits set.
#[inline]
pub(crate) const fn input_mask(input_count: usize) -> u32 {
    if input_count >= 32 {
        u32::MAX
    } else {
        (1 << input_count) - 1
    }
}

/// Iterator over the minterms of a cube, returned by [`Cube::minterms`].
#[derive(Clone, Debug)]
pub struct Minterms {
    value: u32,
    mask: u32,
    // The next subset of `mask` to emit.
    next: Option<u32>,
}

impl Iterator for Minterms {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let sub = self.next?;
        self.next = if sub == self.mask {
            None
        } else {
            // Next subset of the mask in increasing order.
            Some(sub.wrapping_sub(self.mask) & self.mask)
        };
        Some(self.value | sub)
    }
}

/// Displays a cube as a row of `0`, `1` and `-` characters, most significant variable first.
pub struct CubeMatrixDisplay<'a> {
    cube: &'a Cube,
    input_count: usize,
    separator: Cow<'a, str>,
}

impl<'a> CubeMatrixDisplay<'a> {
    pub fn new(cube: &'a Cube, input_count: usize) -> Self {
        Self {
            cube,
            input_count,
            separator: Cow::Borrowed(""),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for CubeMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for input_ix in 0..self.input_count {
            let bit = 1 << (self.input_count - 1 - input_ix);
            let ch = if self.cube.mask & bit != 0 {
                '-'
            } else if self.cube.value & bit != 0 {
                '1'
            } else {
                '0'
            };
            write!(f, "{}", ch)?;
            if input_ix < self.input_count - 1 {
                write!(f, "{}", self.separator)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers() {
        // 1-0 over three inputs: minterms 4 and 6.
        let cube = Cube::new(0b100, 0b010);
        assert!(cube.covers(0b100));
        assert!(cube.covers(0b110));
        assert!(!cube.covers(0b101));
        assert!(!cube.covers(0b000));
        assert_eq!(cube.literal_count(3), 2);
        assert_eq!(cube.weight(), 1);
    }

    #[test]
    fn test_new_clears_masked_bits() {
        assert_eq!(Cube::new(0b111, 0b010), Cube::new(0b101, 0b010));
        assert_eq!(Cube::new(0b111, 0b010).value(), 0b101);
    }

    #[test]
    fn test_merge() {
        let a = Cube::minterm(0b0101);
        let b = Cube::minterm(0b0111);
        assert_eq!(a.merge(&b), Some(Cube::new(0b0101, 0b0010)));
        assert_eq!(b.merge(&a), a.merge(&b));

        // Distance two.
        assert_eq!(a.merge(&Cube::minterm(0b0110)), None);
        // Same value, different masks.
        assert_eq!(
            Cube::new(0b0001, 0b0010).merge(&Cube::new(0b0000, 0b0100)),
            None
        );
        // Identical cubes do not merge.
        assert_eq!(a.merge(&a), None);
    }

    #[test]
    fn test_contains() {
        let big = Cube::new(0b000, 0b011);
        let small = Cube::new(0b001, 0b010);
        assert!(big.contains(&small));
        assert!(big.strictly_contains(&small));
        assert!(!small.contains(&big));
        assert!(big.contains(&big));
        assert!(!big.strictly_contains(&big));
        assert!(Cube::universe(3).contains(&Cube::minterm(0b101)));
        assert!(!Cube::new(0b100, 0b011).contains(&small));
    }

    #[test]
    fn test_minterms() {
        let cube = Cube::new(0b1000, 0b0101);
        assert_eq!(
            cube.minterms().collect::<Vec<_>>(),
            vec![0b1000, 0b1001, 0b1100, 0b1101]
        );
        assert_eq!(Cube::minterm(6).minterms().collect::<Vec<_>>(), vec![6]);
        assert_eq!(Cube::universe(3).minterms().count(), 8);
        for x in Cube::new(0b0010, 0b1001).minterms() {
            assert!(Cube::new(0b0010, 0b1001).covers(x));
        }
    }

    #[test]
    fn test_universe() {
        let universe = Cube::universe(4);
        assert!(universe.is_universe(4));
        assert_eq!(universe.literal_count(4), 0);
        assert!(!Cube::minterm(0).is_universe(4));
        assert!(Cube::universe(0).is_universe(0));
    }

    #[test]
    fn test_matrix_display() {
        let cube = Cube::new(0b100, 0b010);
        assert_eq!(cube.matrix_display(3).to_string(), "1-0");
        assert_eq!(
            cube.matrix_display(3).with_separator(" ").to_string(),
            "1 - 0"
        );
        assert_eq!(Cube::minterm(1).matrix_display(4).to_string(), "0001");
    }
}
