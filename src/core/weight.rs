//! Edge weights and path distances.

use std::fmt;

mod ordered_float;

pub use ordered_float::OrderedFloat;

/// A numeric cost of traversing an edge.
///
/// Implemented for all primitive integers and for `f32`/`f64`. Weights are
/// compared during relaxation and summed along paths; a total order for the
/// priority queue is provided by the associated [`Weight::Ord`] type.
///
/// Path sums are computed with [`Weight::checked_add`]. A sum that does not
/// fit in the type is treated as no path at all.
pub trait Weight: PartialOrd + Clone + Sized {
    /// Totally ordered representation of the weight.
    type Ord: Ord + From<Self> + Into<Self>;

    fn zero() -> Self;

    /// Returns `true` if the weight is non-negative and finite, that is, usable
    /// as an edge cost in Dijkstra's algorithm.
    fn is_valid(&self) -> bool;

    /// Adds two weights, returning `None` if the sum is not representable.
    fn checked_add(&self, other: &Self) -> Option<Self>;
}

macro_rules! impl_int_weight {
    ($ty:ty) => {
        impl Weight for $ty {
            type Ord = Self;

            fn zero() -> Self {
                0
            }

            fn is_valid(&self) -> bool {
                *self >= Self::zero()
            }

            fn checked_add(&self, other: &Self) -> Option<Self> {
                <$ty>::checked_add(*self, *other)
            }
        }
    };
}

impl_int_weight!(i8);
impl_int_weight!(i16);
impl_int_weight!(i32);
impl_int_weight!(i64);
impl_int_weight!(u8);
impl_int_weight!(u16);
impl_int_weight!(u32);
impl_int_weight!(u64);
impl_int_weight!(isize);
impl_int_weight!(usize);

macro_rules! impl_float_weight {
    ($ty:ty) => {
        impl Weight for $ty {
            type Ord = OrderedFloat<Self>;

            fn zero() -> Self {
                <$ty>::default()
            }

            fn is_valid(&self) -> bool {
                self.is_finite() && *self >= Self::zero()
            }

            fn checked_add(&self, other: &Self) -> Option<Self> {
                let sum = *self + *other;
                sum.is_finite().then_some(sum)
            }
        }
    };
}

impl_float_weight!(f32);
impl_float_weight!(f64);

/// Distance of a vertex from the source of a search.
///
/// Vertices that have not been reached (yet) are at [infinite](Self::Infinite)
/// distance. The derived ordering places every finite distance before
/// infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance<W> {
    Finite(W),
    Infinite,
}

impl<W> Distance<W> {
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }

    /// Converts into `Option`, mapping infinity to `None`.
    pub fn finite(self) -> Option<W> {
        match self {
            Distance::Finite(dist) => Some(dist),
            Distance::Infinite => None,
        }
    }

    pub fn as_ref(&self) -> Distance<&W> {
        match self {
            Distance::Finite(dist) => Distance::Finite(dist),
            Distance::Infinite => Distance::Infinite,
        }
    }

    pub fn map<U, F>(self, f: F) -> Distance<U>
    where
        F: FnOnce(W) -> U,
    {
        match self {
            Distance::Finite(dist) => Distance::Finite(f(dist)),
            Distance::Infinite => Distance::Infinite,
        }
    }
}

impl<W> From<Option<W>> for Distance<W> {
    fn from(dist: Option<W>) -> Self {
        match dist {
            Some(dist) => Distance::Finite(dist),
            None => Distance::Infinite,
        }
    }
}

impl<W: fmt::Display> fmt::Display for Distance<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(dist) => dist.fmt(f),
            Distance::Infinite => f.write_str("∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_validity() {
        assert!(3i32.is_valid());
        assert!(0i32.is_valid());
        assert!(!(-1i32).is_valid());
        assert!(u8::MAX.is_valid());
    }

    #[test]
    fn float_validity() {
        assert!(0.5f64.is_valid());
        assert!(0.0f32.is_valid());
        assert!(!(-0.5f64).is_valid());
        assert!(!f64::NAN.is_valid());
        assert!(!f32::INFINITY.is_valid());
    }

    #[test]
    fn checked_sums() {
        assert_eq!(Weight::checked_add(&200u8, &55), Some(255));
        assert_eq!(Weight::checked_add(&200u8, &100), None);
        assert_eq!(Weight::checked_add(&i8::MAX, &1), None);
        assert_eq!(Weight::checked_add(&1.5f64, &2.0), Some(3.5));
        assert_eq!(Weight::checked_add(&f32::MAX, &f32::MAX), None);
    }

    #[test]
    fn infinity_is_greatest() {
        assert!(Distance::Finite(u64::MAX) < Distance::Infinite);
        assert!(Distance::Finite(1) < Distance::Finite(2));
        assert_eq!(Distance::<u32>::Infinite, Distance::Infinite);
    }

    #[test]
    fn display() {
        assert_eq!(Distance::Finite(13).to_string(), "13");
        assert_eq!(Distance::<u32>::Infinite.to_string(), "∞");
    }

    #[test]
    fn option_conversions() {
        assert_eq!(Distance::from(Some(4)).finite(), Some(4));
        assert_eq!(Distance::<i32>::from(None).finite(), None);
        assert_eq!(Distance::Finite(2).map(|d| d * 2), Distance::Finite(4));
    }
}
