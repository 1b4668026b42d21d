//! Numeric element types the kernels are generic over.

use std::fmt::{Debug, Display};
use std::ops::{Add, Mul};

/// A scalar the kernels can sum and multiply.
///
/// Kernels go through [`add_elem`](Element::add_elem) and
/// [`mul_elem`](Element::mul_elem) rather than the operators: integer types wrap
/// on overflow, so every input size is valid.
pub trait Element:
    Copy + Default + PartialEq + Debug + Display + Checksum + Send + Sync + 'static
{
    /// Name shown in reports (`f64`, `i32`, ...).
    const NAME: &'static str;
    /// Whether results may differ in the last bits between summation orders.
    const INEXACT: bool;

    /// Value of an index, as produced by the sequential generators.
    fn from_index(i: usize) -> Self;

    fn to_f64(self) -> f64;

    /// `self + rhs`, wrapping for integers.
    fn add_elem(self, rhs: Self) -> Self;

    /// `self * rhs`, wrapping for integers.
    fn mul_elem(self, rhs: Self) -> Self;
}

macro_rules! impl_element {
    ($($t:ty => $inexact:expr, $add:ident, $mul:ident);* $(;)?) => {
        $(
            impl Element for $t {
                const NAME: &'static str = stringify!($t);
                const INEXACT: bool = $inexact;

                #[inline(always)]
                fn from_index(i: usize) -> Self {
                    i as $t
                }

                #[inline(always)]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline(always)]
                fn add_elem(self, rhs: Self) -> Self {
                    self.$add(rhs)
                }

                #[inline(always)]
                fn mul_elem(self, rhs: Self) -> Self {
                    self.$mul(rhs)
                }
            }

            impl Checksum for $t {
                fn checksum(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_element!(
    f32 => true, add, mul;
    f64 => true, add, mul;
    i32 => false, wrapping_add, wrapping_mul;
    i64 => false, wrapping_add, wrapping_mul;
    u32 => false, wrapping_add, wrapping_mul;
    u64 => false, wrapping_add, wrapping_mul;
);

/// Collapse a kernel result to one number for side-by-side comparison.
pub trait Checksum {
    fn checksum(&self) -> f64;
}

impl<T: Checksum> Checksum for Vec<T> {
    fn checksum(&self) -> f64 {
        self.iter().map(Checksum::checksum).sum()
    }
}

/// Element type selectable from the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElementType {
    F32,
    #[default]
    F64,
    I32,
    I64,
    U32,
    U64,
}

impl ElementType {
    pub fn name(self) -> &'static str {
        match self {
            ElementType::F32 => f32::NAME,
            ElementType::F64 => f64::NAME,
            ElementType::I32 => i32::NAME,
            ElementType::I64 => i64::NAME,
            ElementType::U32 => u32::NAME,
            ElementType::U64 => u64::NAME,
        }
    }
}

/// Compare a variant's result to the reference one.
///
/// Integers must match exactly; floats within a relative tolerance because
/// a different accumulation order changes the rounding.
pub fn close_enough<T: Element>(expected: T, got: T) -> bool {
    if !T::INEXACT {
        return expected == got;
    }
    let (e, g) = (expected.to_f64(), got.to_f64());
    let tolerance = if T::NAME == "f32" { 1e-4 } else { 1e-9 };
    (e - g).abs() <= tolerance * e.abs().max(1.0)
}
