use nalgebra::RealField;
use num_traits::ToPrimitive;

/// Trait for floating point types (f32, f64)
/// Mainly used to identify the type of the field in nalgebra
pub trait FloatingPoint: RealField + ToPrimitive + Copy {
    /// Convert a count or an index into the scalar type
    fn from_index(index: usize) -> Self {
        Self::from_usize(index).unwrap_or_else(Self::zero)
    }
}

impl FloatingPoint for f32 {}
impl FloatingPoint for f64 {}
