//! Affordance extraction over a whole object.
//!
//! Every triangle that is not yet part of an affordance is tried as a seed. The
//! first predicate (in input order) whose requirement the seed satisfies grows a
//! region from it; if that region's area exceeds the predicate's minimum area it is
//! committed as an [`Affordance`] and its triangles are no longer available. Later
//! predicates are not tried for that seed, whether or not the region was committed.

use crate::adjacency::{Adjacency, AdjacencyMode};
use crate::errors::AffordanceResult;
use crate::float_types::Real;
use crate::object::CollisionObject;
use crate::predicate::Predicate;
use crate::region::{CandidatePool, Region, grow_region};
use crate::triangle::{Triangle, build_triangles};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Parameters for affordance extraction.
///
/// # Example
///
/// ```
/// use affordance::{AdjacencyMode, AnalysisParams};
///
/// let params = AnalysisParams::default()
///     .adjacency(AdjacencyMode::SharedVertex)
///     .max_region_triangles(500);
/// assert_eq!(params.adjacency, AdjacencyMode::SharedVertex);
/// assert_eq!(params.max_region_triangles, Some(500));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisParams {
    /// Which triangles count as neighbours while growing a region.
    pub adjacency: AdjacencyMode,

    /// Upper bound on the number of triangles in one region. `None` is unbounded.
    pub max_region_triangles: Option<usize>,
}

impl AnalysisParams {
    /// Set the adjacency mode.
    #[must_use]
    pub const fn adjacency(mut self, mode: AdjacencyMode) -> Self {
        self.adjacency = mode;
        self
    }

    /// Cap the number of triangles in one region.
    #[must_use]
    pub const fn max_region_triangles(mut self, count: usize) -> Self {
        self.max_region_triangles = Some(count);
        self
    }
}

/// A committed region of one affordance type on one object.
#[derive(Debug, Clone)]
pub struct Affordance {
    /// Indices into the object's mesh triangles, seed first.
    pub indices: Vec<usize>,
    /// Total area of the member triangles, in world units.
    pub area: Real,
    /// The analysed object.
    pub object: Arc<CollisionObject>,
}

impl Affordance {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, triangle: usize) -> bool {
        self.indices.contains(&triangle)
    }
}

/// Everything found on one object: one bucket of affordances per predicate, in the
/// order the predicates were given.
#[derive(Debug, Clone, Default)]
pub struct SemanticsData {
    names: Vec<String>,
    affordances: Vec<Vec<Affordance>>,
}

impl SemanticsData {
    fn with_slots(predicates: &[Predicate]) -> Self {
        Self {
            names: predicates.iter().map(|p| p.name().to_owned()).collect(),
            affordances: vec![Vec::new(); predicates.len()],
        }
    }

    /// Affordances found for the predicate at `slot`.
    pub fn get(&self, slot: usize) -> Option<&[Affordance]> {
        self.affordances.get(slot).map(Vec::as_slice)
    }

    /// Affordances of the first predicate named `name`.
    pub fn by_name(&self, name: &str) -> Option<&[Affordance]> {
        let slot = self.names.iter().position(|n| n == name)?;
        self.get(slot)
    }

    /// Number of predicate slots.
    pub fn len(&self) -> usize {
        self.affordances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.affordances.is_empty()
    }

    /// Number of affordances across every slot.
    pub fn total_affordances(&self) -> usize {
        self.affordances.iter().map(Vec::len).sum()
    }

    /// `(predicate name, affordances)` per slot, in predicate order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Affordance])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.affordances.iter().map(Vec::as_slice))
    }

    /// The per-slot buckets, indexed like the predicate list.
    pub fn buckets(&self) -> &[Vec<Affordance>] {
        &self.affordances
    }
}

/// Run affordance extraction on `object` with default [`AnalysisParams`].
///
/// ### Errors
/// [`AffordanceError::InvalidGeometryKind`](crate::errors::AffordanceError::InvalidGeometryKind)
/// when the object's shape is not a triangle mesh.
pub fn affordance_analysis(
    object: &Arc<CollisionObject>,
    predicates: &[Predicate],
) -> AffordanceResult<SemanticsData> {
    affordance_analysis_with(object, predicates, &AnalysisParams::default())
}

/// Run affordance extraction on `object`.
///
/// ### Errors
/// [`AffordanceError::InvalidGeometryKind`](crate::errors::AffordanceError::InvalidGeometryKind)
/// when the object's shape is not a triangle mesh.
pub fn affordance_analysis_with(
    object: &Arc<CollisionObject>,
    predicates: &[Predicate],
    params: &AnalysisParams,
) -> AffordanceResult<SemanticsData> {
    let trimesh = object.trimesh()?;
    let triangles = build_triangles(trimesh, object.pose());

    info!(
        triangles = triangles.len(),
        predicates = predicates.len(),
        adjacency = ?params.adjacency,
        "Starting affordance analysis"
    );

    let regions = classify_triangles(&triangles, predicates, params);

    let mut data = SemanticsData::with_slots(predicates);
    for (bucket, found) in data.affordances.iter_mut().zip(regions) {
        bucket.extend(found.into_iter().map(|region| Affordance {
            indices: region.indices,
            area: region.area,
            object: Arc::clone(object),
        }));
    }

    info!(
        affordances = data.total_affordances(),
        "Affordance analysis complete"
    );
    Ok(data)
}

/// Classify `triangles` into committed regions, one list per predicate.
///
/// This is the geometry-free core of [`affordance_analysis_with`]; the returned
/// outer vector is index-aligned with `predicates`. An empty triangle list or an
/// empty predicate list simply yields empty buckets.
pub fn classify_triangles(
    triangles: &[Triangle],
    predicates: &[Predicate],
    params: &AnalysisParams,
) -> Vec<Vec<Region>> {
    let mut buckets: Vec<Vec<Region>> = vec![Vec::new(); predicates.len()];
    if triangles.is_empty() || predicates.is_empty() {
        return buckets;
    }

    let degenerate = triangles.iter().filter(|t| t.is_degenerate()).count();
    if degenerate > 0 {
        warn!(degenerate, "Skipping degenerate triangles");
    }

    let adjacency = Adjacency::build(triangles, params.adjacency);
    let mut unclassified = CandidatePool::full(triangles.len());
    // Scratch pool for growth; equal to `unclassified` between seeds.
    let mut unseen = CandidatePool::full(triangles.len()).journaled();

    for (seed, tri) in triangles.iter().enumerate() {
        if !unclassified.contains(seed) || tri.is_degenerate() {
            continue;
        }
        let Some((slot, predicate)) = predicates
            .iter()
            .enumerate()
            .find(|(_, p)| p.requirement(&tri.normal))
        else {
            continue;
        };

        let region = grow_region(
            seed,
            predicate,
            triangles,
            &adjacency,
            &mut unseen,
            params.max_region_triangles,
        );

        if region.area > predicate.min_area() {
            debug!(
                predicate = predicate.name(),
                seed,
                triangles = region.indices.len(),
                area = region.area,
                "Committed affordance"
            );
            for &idx in &region.indices {
                unclassified.remove(idx);
            }
            buckets[slot].push(region);
        } else {
            debug!(
                predicate = predicate.name(),
                seed,
                area = region.area,
                min_area = predicate.min_area(),
                "Region below minimum area"
            );
        }
        unseen.rollback(|idx| unclassified.contains(idx));
    }

    buckets
}

/// Analyse several independent objects with the same predicates.
///
/// Results are in the same order as `objects`.
#[cfg(not(feature = "parallel"))]
pub fn analyse_objects(
    objects: &[Arc<CollisionObject>],
    predicates: &[Predicate],
    params: &AnalysisParams,
) -> Vec<AffordanceResult<SemanticsData>> {
    objects
        .iter()
        .map(|object| affordance_analysis_with(object, predicates, params))
        .collect()
}

/// Analyse several independent objects with the same predicates, in parallel.
///
/// Results are in the same order as `objects`.
#[cfg(feature = "parallel")]
pub fn analyse_objects(
    objects: &[Arc<CollisionObject>],
    predicates: &[Predicate],
    params: &AnalysisParams,
) -> Vec<AffordanceResult<SemanticsData>> {
    objects
        .par_iter()
        .map(|object| affordance_analysis_with(object, predicates, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangle::TrianglePoints;
    use nalgebra::Point3;

    fn quad(z: Real, base: u32) -> [Triangle; 2] {
        [
            Triangle::new(
                [base, base + 1, base + 2],
                TrianglePoints::new(
                    Point3::new(0.0, 0.0, z),
                    Point3::new(1.0, 0.0, z),
                    Point3::new(1.0, 1.0, z),
                ),
            ),
            Triangle::new(
                [base, base + 2, base + 3],
                TrianglePoints::new(
                    Point3::new(0.0, 0.0, z),
                    Point3::new(1.0, 1.0, z),
                    Point3::new(0.0, 1.0, z),
                ),
            ),
        ]
    }

    #[test]
    fn empty_inputs_give_empty_buckets() {
        let params = AnalysisParams::default();
        let buckets = classify_triangles(&[], &[Predicate::support(), Predicate::lean()], &params);
        assert_eq!(buckets.len(), 2);
        assert!(buckets.iter().all(Vec::is_empty));

        assert!(classify_triangles(&quad(0.0, 0), &[], &params).is_empty());
    }

    #[test]
    fn disconnected_patches_become_separate_affordances() {
        let mut tris = quad(0.0, 0).to_vec();
        tris.extend(quad(3.0, 10));
        let params = AnalysisParams::default();
        let buckets = classify_triangles(&tris, &[Predicate::support()], &params);

        assert_eq!(buckets[0].len(), 2);
        assert_eq!(buckets[0][0].indices, vec![0, 1]);
        assert_eq!(buckets[0][1].indices, vec![2, 3]);
    }

    #[test]
    fn failed_region_does_not_consume_triangles() {
        let tris = quad(0.0, 0);
        let too_big = Predicate::support().with_min_area(5.0);
        let buckets = classify_triangles(&tris, &[too_big], &AnalysisParams::default());
        assert!(buckets[0].is_empty());
    }

    #[test]
    fn triangles_rejected_by_a_failed_attempt_remain_available() {
        let floor = TrianglePoints::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let wall = TrianglePoints::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        );
        // 1 and 2 each share an edge with 0 and with each other.
        let tris = [
            Triangle::new([0, 1, 2], floor),
            Triangle::new([1, 2, 3], wall),
            Triangle::new([0, 1, 3], wall),
        ];
        let predicates = [
            Predicate::support().with_min_area(1.0),
            Predicate::lean().with_min_area(0.75),
        ];
        let buckets = classify_triangles(&tris, &predicates, &AnalysisParams::default());

        // Seed 0 discards both walls while failing its own area test; the walls
        // must still merge when seed 1 grows.
        assert!(buckets[0].is_empty());
        assert_eq!(buckets[1].len(), 1);
        assert_eq!(buckets[1][0].indices, vec![1, 2]);
    }

    #[test]
    fn many_failing_seeds_leave_later_regions_intact() {
        // Isolated flat triangles too small to commit, followed by one large quad.
        let mut tris: Vec<Triangle> = (0..1000u32)
            .map(|i| {
                let x = 10.0 * i as Real;
                Triangle::new(
                    [3 * i, 3 * i + 1, 3 * i + 2],
                    TrianglePoints::new(
                        Point3::new(x, 0.0, 0.0),
                        Point3::new(x + 0.1, 0.0, 0.0),
                        Point3::new(x, 0.1, 0.0),
                    ),
                )
            })
            .collect();
        tris.extend(quad(0.0, 10_000));
        let params = AnalysisParams::default();
        let buckets = classify_triangles(&tris, &[Predicate::support()], &params);

        assert_eq!(buckets[0].len(), 1);
        assert_eq!(buckets[0][0].indices, vec![1000, 1001]);
    }

    #[test]
    fn degenerate_triangles_are_never_classified() {
        let mut tris = quad(0.0, 0).to_vec();
        tris.push(Triangle::new(
            [0, 1, 4],
            TrianglePoints::new(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ),
        ));
        let buckets = classify_triangles(
            &tris,
            &[Predicate::lean().with_min_area(0.0)],
            &AnalysisParams::default(),
        );
        assert!(buckets[0].is_empty());
    }
}
