//! Crossing records and split-vertex materialization.

// Vertex counts are bounded by u32 indices
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use mesh_types::{Edge, Vertex};
use tracing::debug;

use crate::error::{RetessError, RetessResult};

/// Edges crossed by the isosurface, each with its interpolation parameter.
///
/// Keys are canonical edges, so `{a, b}` and `{b, a}` address the same
/// record. The parameter `alpha` weights the **lower-id** endpoint: the
/// crossing point is `alpha * p(lo) + (1 - alpha) * p(hi)`.
///
/// # Example
///
/// ```
/// use mesh_retess::CrossingSet;
///
/// let mut crossings = CrossingSet::new();
/// crossings.insert(3, 1, 0.25)?;
/// assert_eq!(crossings.get(1, 3), Some(0.25));
/// assert_eq!(crossings.len(), 1);
/// # Ok::<(), mesh_retess::RetessError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrossingSet {
    records: HashMap<Edge, f64>,
}

impl CrossingSet {
    /// Create an empty crossing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a crossing on edge `{a, b}`.
    ///
    /// Re-inserting the same edge with the same parameter is a no-op.
    ///
    /// # Errors
    ///
    /// - [`RetessError::InvalidInterpolation`] if `alpha` is not strictly
    ///   inside `(0, 1)`, or `a == b`
    /// - [`RetessError::ConflictingCrossing`] if the edge already carries a
    ///   different parameter
    pub fn insert(&mut self, a: u32, b: u32, alpha: f64) -> RetessResult<()> {
        let edge = Edge::new(a, b);
        if edge.is_degenerate() || !(alpha > 0.0 && alpha < 1.0) {
            return Err(RetessError::InvalidInterpolation { edge, alpha });
        }
        match self.records.get(&edge) {
            Some(&first) if first.to_bits() != alpha.to_bits() => {
                Err(RetessError::ConflictingCrossing {
                    edge,
                    first,
                    second: alpha,
                })
            }
            Some(_) => Ok(()),
            None => {
                self.records.insert(edge, alpha);
                Ok(())
            }
        }
    }

    /// Parameter recorded on edge `{a, b}`, if any.
    #[must_use]
    pub fn get(&self, a: u32, b: u32) -> Option<f64> {
        self.records.get(&Edge::new(a, b)).copied()
    }

    /// Check whether edge `{a, b}` is crossed.
    #[must_use]
    pub fn contains(&self, a: u32, b: u32) -> bool {
        self.records.contains_key(&Edge::new(a, b))
    }

    /// Number of crossed edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no edge is crossed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, sorted by edge.
    ///
    /// The order is deterministic and independent of insertion order.
    #[must_use]
    pub fn sorted(&self) -> Vec<(Edge, f64)> {
        let mut records: Vec<(Edge, f64)> = self.records.iter().map(|(&e, &a)| (e, a)).collect();
        records.sort_unstable_by_key(|&(edge, _)| edge);
        records
    }
}

/// Mapping from crossed edge to the id of the vertex materialized on it.
///
/// Built once, before any cell is decomposed, and read-only afterwards, so
/// every cell incident to an edge resolves the same split vertex.
#[derive(Debug, Clone, Default)]
pub struct SplitVertices {
    ids: HashMap<Edge, u32>,
}

impl SplitVertices {
    /// Materialize one new vertex per crossing.
    ///
    /// Walks the crossings in edge order and assigns ids
    /// `vertices.len()`, `vertices.len() + 1`, ... Each new vertex sits at
    /// the interpolated position and carries `iso_value` as its field value.
    /// Returns the map together with the new vertices, in id order.
    ///
    /// # Errors
    ///
    /// - [`RetessError::VertexOutOfRange`] if a crossing names a vertex not
    ///   in `vertices`
    /// - [`RetessError::IndexOverflow`] if the ids no longer fit in `u32`
    /// - [`RetessError::NonFiniteSplitVertex`] if an endpoint position or
    ///   `iso_value` is not finite
    pub fn materialize(
        vertices: &[Vertex],
        crossings: &CrossingSet,
        iso_value: f64,
    ) -> RetessResult<(Self, Vec<Vertex>)> {
        let base = vertices.len();
        let total = base + crossings.len();
        if u32::try_from(total).is_err() {
            return Err(RetessError::IndexOverflow(total));
        }

        let mut ids = HashMap::with_capacity(crossings.len());
        let mut created = Vec::with_capacity(crossings.len());

        for (edge, alpha) in crossings.sorted() {
            let lo = lookup(vertices, edge.v0)?;
            let hi = lookup(vertices, edge.v1)?;

            let mut vertex = lo.blend(hi, alpha);
            vertex.value = iso_value;
            if !vertex.is_finite() {
                return Err(RetessError::NonFiniteSplitVertex { edge });
            }

            ids.insert(edge, (base + created.len()) as u32);
            created.push(vertex);
        }

        debug!(
            split_vertices = created.len(),
            first_id = base,
            "Materialized split vertices"
        );

        Ok((Self { ids }, created))
    }

    /// Id of the split vertex on edge `{a, b}`, if that edge is crossed.
    #[must_use]
    pub fn get(&self, a: u32, b: u32) -> Option<u32> {
        self.ids.get(&Edge::new(a, b)).copied()
    }

    /// Number of split vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if no vertex was materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn lookup(vertices: &[Vertex], id: u32) -> RetessResult<&Vertex> {
    vertices
        .get(id as usize)
        .ok_or(RetessError::VertexOutOfRange {
            vertex: id,
            count: vertices.len(),
        })
}
