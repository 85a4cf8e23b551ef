// src/frontier/weight.rs
// =============================================================================
// The weight types a WeightedQueue can be ordered by.
//
// f64 does not implement Ord (NaN breaks the total order), so instead of
// requiring Ord we use our own small trait with an explicit comparison.
// Floats compare with total_cmp, everything else with its natural order.
//
// A second trait, NeutralWeight, marks weight types that have a sensible
// "no preference" value. Only those get the single-argument add().
// =============================================================================

use std::cmp::Ordering;

/// A weight with a total order
pub trait Weight: Clone {
    fn compare(&self, other: &Self) -> Ordering;
}

/// A weight type with a neutral value, used when every item is equally important
pub trait NeutralWeight: Weight {
    fn neutral() -> Self;
}

impl Weight for f64 {
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Weight for f32 {
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl NeutralWeight for f64 {
    fn neutral() -> Self {
        1.0
    }
}

impl NeutralWeight for f32 {
    fn neutral() -> Self {
        1.0
    }
}

// Integers: natural order, neutral value 1
macro_rules! integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn compare(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }

            impl NeutralWeight for $t {
                fn neutral() -> Self {
                    1
                }
            }
        )*
    };
}

integer_weight!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Non-numeric weights: ordered, but there is no neutral value
impl Weight for char {
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Weight for String {
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Weight for &str {
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}
