use std::cmp::Ordering;

/// Float wrapper with a total order.
///
/// Edge weights are validated to be finite when inserted into a graph, so the
/// IEEE total order coincides with the usual numeric order for all values the
/// algorithms ever compare.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct OrderedFloat<T>(T);

macro_rules! impl_ord_eq {
    ($ty:ty) => {
        impl Ord for OrderedFloat<$ty> {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Eq for OrderedFloat<$ty> {}
    };
}

impl_ord_eq!(f32);
impl_ord_eq!(f64);

macro_rules! impl_conv {
    ($ty:ty) => {
        impl From<$ty> for OrderedFloat<$ty> {
            fn from(value: $ty) -> Self {
                Self(value)
            }
        }

        impl From<OrderedFloat<$ty>> for $ty {
            fn from(value: OrderedFloat<$ty>) -> Self {
                value.0
            }
        }
    };
}

impl_conv!(f32);
impl_conv!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_order() {
        let mut values = vec![
            OrderedFloat::from(2.5f64),
            OrderedFloat::from(0.0),
            OrderedFloat::from(1.25),
        ];
        values.sort();

        let values = values.into_iter().map(f64::from).collect::<Vec<_>>();
        assert_eq!(values, vec![0.0, 1.25, 2.5]);
    }
}
