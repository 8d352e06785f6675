// Re-export parry for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Sine of the smallest corner angle a triangle may have before it counts as
/// degenerate (collinear corners, no usable normal). The test is relative to the
/// edge lengths, so it does not depend on the mesh's units or scale.
///
/// `AFFORDANCE_TOLERANCE` at build time or [`set_tolerance`] at runtime replaces the
/// precision default.
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-6
    }
}

/// The degeneracy threshold used by [`Triangle::new`](crate::triangle::Triangle::new).
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        option_env!("AFFORDANCE_TOLERANCE")
            .and_then(|value| Real::from_str(value).ok())
            .map_or_else(default_tolerance, |value| value.max(Real::EPSILON))
    })
}

/// Overrides the degeneracy threshold. Only the first call before any analysis has
/// an effect.
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// 1/√2, the horizontal and vertical component of the 45° support axis
#[cfg(feature = "f32")]
pub const FRAC_1_SQRT_2: Real = core::f32::consts::FRAC_1_SQRT_2;
/// 1/√2, the horizontal and vertical component of the 45° support axis
#[cfg(feature = "f64")]
pub const FRAC_1_SQRT_2: Real = core::f64::consts::FRAC_1_SQRT_2;
