//! Triangle neighbourhoods, built once per analysis from the mesh index triples.

use crate::triangle::Triangle;
use hashbrown::HashMap;

/// Which triangles count as neighbours during region growing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AdjacencyMode {
    /// Triangles sharing an edge (two vertex indices).
    #[default]
    SharedEdge,
    /// Triangles sharing at least one vertex index. Looser than `SharedEdge`:
    /// fans around a vertex merge even when they only touch at a corner.
    SharedVertex,
}

/// Neighbour lists for every triangle, each sorted ascending and free of
/// duplicates and self references.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    neighbors: Vec<Vec<usize>>,
}

impl Adjacency {
    pub fn build(triangles: &[Triangle], mode: AdjacencyMode) -> Self {
        let neighbors = match mode {
            AdjacencyMode::SharedEdge => shared_edge_neighbors(triangles),
            AdjacencyMode::SharedVertex => shared_vertex_neighbors(triangles),
        };
        Self { neighbors }
    }

    /// Neighbours of triangle `index`, ascending.
    #[inline]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

fn shared_edge_neighbors(triangles: &[Triangle]) -> Vec<Vec<usize>> {
    let mut edge_to_triangles: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
    for (tri_idx, tri) in triangles.iter().enumerate() {
        let [a, b, c] = tri.indices;
        for edge in [normalize_edge(a, b), normalize_edge(b, c), normalize_edge(c, a)] {
            edge_to_triangles.entry(edge).or_default().push(tri_idx);
        }
    }

    let mut neighbors = vec![Vec::new(); triangles.len()];
    for sharing in edge_to_triangles.values() {
        for &t in sharing {
            neighbors[t].extend(sharing.iter().copied().filter(|&n| n != t));
        }
    }
    finish(neighbors)
}

fn shared_vertex_neighbors(triangles: &[Triangle]) -> Vec<Vec<usize>> {
    let mut vertex_to_triangles: HashMap<u32, Vec<usize>> = HashMap::new();
    for (tri_idx, tri) in triangles.iter().enumerate() {
        for v in tri.indices {
            vertex_to_triangles.entry(v).or_default().push(tri_idx);
        }
    }

    let mut neighbors = vec![Vec::new(); triangles.len()];
    for (tri_idx, tri) in triangles.iter().enumerate() {
        for v in tri.indices {
            if let Some(sharing) = vertex_to_triangles.get(&v) {
                neighbors[tri_idx].extend(sharing.iter().copied().filter(|&n| n != tri_idx));
            }
        }
    }
    finish(neighbors)
}

fn finish(mut neighbors: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }
    neighbors
}

/// Normalize an edge so the smaller vertex index comes first.
const fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}
