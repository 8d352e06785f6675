//! Region growing: merge connected triangles that satisfy one predicate.
//!
//! Growth is a depth-first traversal driven by an explicit stack, so very large
//! meshes do not grow the call stack. Neighbours are visited in ascending index
//! order and the traversal descends into a neighbour as soon as it is accepted,
//! which makes region membership deterministic for a given mesh and pose.

use crate::adjacency::Adjacency;
use crate::float_types::Real;
use crate::predicate::Predicate;
use crate::triangle::Triangle;

/// Dense set of triangle indices still available to region growing.
///
/// A journaled pool remembers every index it loses so that an abandoned attempt can
/// be undone with [`CandidatePool::rollback`] in time proportional to what the
/// attempt touched, rather than by copying the whole pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePool {
    open: Vec<bool>,
    remaining: usize,
    journal: Option<Vec<usize>>,
}

impl CandidatePool {
    /// A pool containing every index in `0..len`.
    pub fn full(len: usize) -> Self {
        Self { open: vec![true; len], remaining: len, journal: None }
    }

    /// Returns this pool with removal journaling switched on.
    #[must_use]
    pub fn journaled(mut self) -> Self {
        self.journal = Some(Vec::new());
        self
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    /// Removes `index`; returns whether it was present.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.open.get_mut(index) {
            Some(slot) if *slot => {
                *slot = false;
                self.remaining -= 1;
                if let Some(journal) = &mut self.journal {
                    journal.push(index);
                }
                true
            },
            _ => false,
        }
    }

    /// Puts back every journaled index for which `restore` holds and clears the
    /// journal. Indices for which it does not hold stay removed.
    pub fn rollback(&mut self, mut restore: impl FnMut(usize) -> bool) {
        let Some(journal) = &mut self.journal else {
            return;
        };
        for index in journal.drain(..) {
            if restore(index) && !self.open[index] {
                self.open[index] = true;
                self.remaining += 1;
            }
        }
    }

    pub const fn len(&self) -> usize {
        self.remaining
    }

    pub const fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Indices still in the pool, ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.open
            .iter()
            .enumerate()
            .filter_map(|(i, &open)| open.then_some(i))
    }
}

/// A connected set of triangles grown from one seed.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Seed first, then triangles in the order they were accepted.
    pub indices: Vec<usize>,
    /// Sum of the member triangles' areas.
    pub area: Real,
}

/// Grows a region from `seed` under `predicate`.
///
/// The seed is taken out of `pool` unconditionally. A neighbour that fails
/// [`Predicate::requirement`] is dropped from the pool for good; one that passes it
/// but deviates too far from the triangle it was reached from
/// ([`Predicate::accepts_neighbor`]) stays in the pool and may still join through
/// another member. `max_triangles` stops growth once the region holds that many
/// triangles.
///
/// The caller is expected to have checked the seed itself against `predicate`.
pub fn grow_region(
    seed: usize,
    predicate: &Predicate,
    triangles: &[Triangle],
    adjacency: &Adjacency,
    pool: &mut CandidatePool,
    max_triangles: Option<usize>,
) -> Region {
    pool.remove(seed);
    let mut region = Region {
        indices: vec![seed],
        area: triangles.get(seed).map_or(0.0, |t| t.area),
    };

    // (triangle being expanded, position in its neighbour list)
    let mut stack: Vec<(usize, usize)> = vec![(seed, 0)];

    while let Some(frame) = stack.last_mut() {
        let (current, cursor) = *frame;
        let Some(&candidate) = adjacency.neighbors(current).get(cursor) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        if !pool.contains(candidate) {
            continue;
        }
        let tri = &triangles[candidate];
        if tri.is_degenerate() || !predicate.requirement(&tri.normal) {
            pool.remove(candidate);
            continue;
        }
        if !predicate.accepts_neighbor(&triangles[current].normal, &tri.normal) {
            continue;
        }
        if max_triangles.is_some_and(|max| region.indices.len() >= max) {
            break;
        }

        pool.remove(candidate);
        region.area += tri.area;
        region.indices.push(candidate);
        stack.push((candidate, 0));
    }

    region
}
