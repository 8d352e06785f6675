//! Orientation tests that decide which affordance type a surface normal belongs to.
//!
//! A [`Predicate`] pairs one [`PredicateKind`] with the margins used to evaluate it.
//! Predicates are immutable: the `with_*` setters consume the value and hand back
//! a reconfigured copy.

use crate::float_types::{FRAC_1_SQRT_2, Real};
use nalgebra::{Unit, Vector3};
use std::borrow::Cow;
use tracing::warn;

/// Default margin for [`Predicate::requirement`].
pub const DEFAULT_MARGIN: Real = 0.3;
/// Default bound on the squared normal difference of neighbouring triangles.
pub const DEFAULT_NEIGHBOR_MARGIN: Real = 0.3;
/// Default minimum area of a committed affordance.
pub const DEFAULT_MIN_AREA: Real = 0.05;

/// The affordance types that can be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    /// Surface faces roughly along the world up axis: something can stand on it.
    Support,
    /// Surface stands roughly upright: something can lean against it.
    Lean,
    /// Surface is tilted roughly 45° from the world up axis.
    Support45,
}

impl PredicateKind {
    /// Name given to predicates of this kind when none is supplied.
    pub const fn default_name(self) -> &'static str {
        match self {
            PredicateKind::Support => "Support",
            PredicateKind::Lean => "Lean",
            PredicateKind::Support45 => "Support45",
        }
    }
}

/// One affordance type together with its evaluation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    kind: PredicateKind,
    world_up: Unit<Vector3<Real>>,
    margin: Real,
    neighbor_margin: Real,
    min_area: Real,
    name: Cow<'static, str>,
}

impl Predicate {
    /// Build a predicate with explicit parameters.
    ///
    /// Values are taken as given. Non-positive margins or a negative minimum area
    /// only produce a warning; such a predicate may never (or always) match.
    pub fn new(
        kind: PredicateKind,
        margin: Real,
        neighbor_margin: Real,
        min_area: Real,
        name: impl Into<Cow<'static, str>>,
    ) -> Self {
        let predicate = Self {
            kind,
            world_up: Vector3::z_axis(),
            margin,
            neighbor_margin,
            min_area,
            name: name.into(),
        };
        predicate.warn_if_suspicious();
        predicate
    }

    /// Support predicate with default parameters.
    pub fn support() -> Self {
        Self::with_defaults(PredicateKind::Support)
    }

    /// Lean predicate with default parameters.
    pub fn lean() -> Self {
        Self::with_defaults(PredicateKind::Lean)
    }

    /// 45° support predicate with default parameters.
    pub fn support45() -> Self {
        Self::with_defaults(PredicateKind::Support45)
    }

    /// Predicate of `kind` with the default margins, minimum area and name.
    pub fn with_defaults(kind: PredicateKind) -> Self {
        Self::new(
            kind,
            DEFAULT_MARGIN,
            DEFAULT_NEIGHBOR_MARGIN,
            DEFAULT_MIN_AREA,
            kind.default_name(),
        )
    }

    /// Returns a copy using `margin` for [`Predicate::requirement`].
    #[must_use]
    pub fn with_margin(mut self, margin: Real) -> Self {
        self.margin = margin;
        self.warn_if_suspicious();
        self
    }

    /// Returns a copy using `neighbor_margin` for [`Predicate::accepts_neighbor`].
    #[must_use]
    pub fn with_neighbor_margin(mut self, neighbor_margin: Real) -> Self {
        self.neighbor_margin = neighbor_margin;
        self.warn_if_suspicious();
        self
    }

    /// Returns a copy requiring `min_area` before a region is committed.
    #[must_use]
    pub fn with_min_area(mut self, min_area: Real) -> Self {
        self.min_area = min_area;
        self.warn_if_suspicious();
        self
    }

    /// Returns a renamed copy.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns a copy evaluated against another up direction than world +Z.
    #[must_use]
    pub fn with_world_up(mut self, world_up: Unit<Vector3<Real>>) -> Self {
        self.world_up = world_up;
        self
    }

    pub const fn kind(&self) -> PredicateKind {
        self.kind
    }

    pub const fn world_up(&self) -> &Unit<Vector3<Real>> {
        &self.world_up
    }

    pub const fn margin(&self) -> Real {
        self.margin
    }

    pub const fn neighbor_margin(&self) -> Real {
        self.neighbor_margin
    }

    pub const fn min_area(&self) -> Real {
        self.min_area
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a triangle with unit `normal` may belong to an affordance of this type.
    ///
    /// - **Support**: `‖up − n‖² < margin`
    /// - **Lean**: `|n · up| < margin`
    /// - **Support45**: the normal folded into the (horizontal, vertical) half-plane
    ///   must lie within squared distance `margin` of `(1/√2, 1/√2)`.
    pub fn requirement(&self, normal: &Vector3<Real>) -> bool {
        let up = self.world_up.as_ref();
        match self.kind {
            PredicateKind::Support => (up - normal).norm_squared() < self.margin,
            PredicateKind::Lean => normal.dot(up).abs() < self.margin,
            PredicateKind::Support45 => {
                let vertical = normal.dot(up);
                let horizontal = (normal - up * vertical).norm();
                let dh = FRAC_1_SQRT_2 - horizontal;
                let dv = FRAC_1_SQRT_2 - vertical;
                dh * dh + dv * dv < self.margin
            },
        }
    }

    /// Whether two neighbouring triangles are similar enough in orientation to be
    /// merged into the same region.
    pub fn accepts_neighbor(
        &self,
        reference_normal: &Vector3<Real>,
        candidate_normal: &Vector3<Real>,
    ) -> bool {
        (candidate_normal - reference_normal).norm_squared() < self.neighbor_margin
    }

    fn warn_if_suspicious(&self) {
        if self.margin <= 0.0 || self.neighbor_margin <= 0.0 || self.min_area < 0.0 {
            warn!(
                name = %self.name,
                margin = self.margin,
                neighbor_margin = self.neighbor_margin,
                min_area = self.min_area,
                "predicate configured with non-positive margin or negative minimum area"
            );
        }
    }
}
