use thiserror::Error;

/// Indices are 16-bit, so a mesh can address at most this many vertices.
pub const MAX_VERTICES: usize = 65535;

/// Primitive kind for an indexed mesh.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Primitive {
    #[default]
    Quads,
    Triangles,
}

/// Mesh validation failures.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("too many vertices ({count}, limit {MAX_VERTICES})")]
    TooManyVertices { count: usize },

    #[error("index {index} out of range ({valid} valid vertices)")]
    IndexOutOfRange { index: i64, valid: usize },
}

/// An indexed 2D mesh: flat x/y vertex pairs, optional u/v texcoord pairs,
/// and a 16-bit index list.
///
/// Construct through [`Geometry::from_parts`]; the invariants below then
/// hold for the lifetime of the value:
/// - vertex and texcoord lists (when both present) describe the same count
/// - every index is smaller than the vertex count
/// - the vertex count does not exceed [`MAX_VERTICES`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    verts: Vec<f32>,
    coords: Vec<f32>,
    indices: Vec<u16>,
    primitive: Primitive,
}

impl Geometry {
    /// Builds a validated mesh from raw lists.
    ///
    /// The effective vertex count is `verts.len() / 2`, except that a
    /// non-empty, shorter texcoord list governs instead. Both lists are
    /// truncated to the effective count.
    pub fn from_parts(
        indices: &[i64],
        verts: &[f32],
        coords: &[f32],
        primitive: Primitive,
    ) -> Result<Geometry, GeometryError> {
        let mut valid = verts.len() / 2;
        if !coords.is_empty() && coords.len() < verts.len() {
            valid = coords.len() / 2;
        }
        if valid > MAX_VERTICES {
            return Err(GeometryError::TooManyVertices { count: valid });
        }

        let mut out_indices = Vec::with_capacity(indices.len());
        for &index in indices {
            if index < 0 || index as usize >= valid {
                return Err(GeometryError::IndexOutOfRange { index, valid });
            }
            out_indices.push(index as u16);
        }

        let mut out_coords = Vec::new();
        if !coords.is_empty() {
            out_coords.extend_from_slice(&coords[..(valid * 2).min(coords.len())]);
        }

        Ok(Geometry {
            verts: verts[..valid * 2].to_vec(),
            coords: out_coords,
            indices: out_indices,
            primitive,
        })
    }

    #[inline]
    pub fn vertices(&self) -> &[f32] {
        &self.verts
    }

    /// Texcoord pairs; empty when the mesh is untextured.
    #[inline]
    pub fn texcoords(&self) -> &[f32] {
        &self.coords
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    #[inline]
    pub fn primitive(&self) -> Primitive {
        self.primitive
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.verts.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_quad_mesh() {
        let verts = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let g = Geometry::from_parts(&[0, 1, 2, 3], &verts, &[], Primitive::Quads).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.indices(), &[0, 1, 2, 3]);
        assert!(g.texcoords().is_empty());
        assert!(!g.is_empty());
    }

    #[test]
    fn index_at_vertex_count_is_rejected() {
        let verts = [0.0, 0.0, 1.0, 0.0];
        let err = Geometry::from_parts(&[0, 2], &verts, &[], Primitive::Triangles).unwrap_err();
        assert!(matches!(err, GeometryError::IndexOutOfRange { index: 2, valid: 2 }));
    }

    #[test]
    fn negative_index_is_rejected() {
        let verts = [0.0, 0.0, 1.0, 0.0];
        let err = Geometry::from_parts(&[-1], &verts, &[], Primitive::Triangles).unwrap_err();
        assert!(matches!(err, GeometryError::IndexOutOfRange { index: -1, .. }));
    }

    #[test]
    fn vertex_count_cap() {
        let verts = vec![0.0f32; (MAX_VERTICES + 1) * 2];
        let err = Geometry::from_parts(&[], &verts, &[], Primitive::Quads).unwrap_err();
        assert!(matches!(err, GeometryError::TooManyVertices { .. }));

        let verts = vec![0.0f32; MAX_VERTICES * 2];
        assert!(Geometry::from_parts(&[], &verts, &[], Primitive::Quads).is_ok());
    }

    #[test]
    fn shorter_texcoord_list_governs_vertex_count() {
        let verts = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0]; // 3 vertices
        let coords = [0.0, 0.0, 1.0, 0.0]; // 2 pairs
        let g = Geometry::from_parts(&[0, 1], &verts, &coords, Primitive::Triangles).unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.texcoords().len(), 4);

        // Index 2 was valid against the vertex list but not the governed count.
        let err =
            Geometry::from_parts(&[2], &verts, &coords, Primitive::Triangles).unwrap_err();
        assert!(matches!(err, GeometryError::IndexOutOfRange { index: 2, valid: 2 }));
    }

    #[test]
    fn longer_texcoord_list_is_truncated() {
        let verts = [0.0, 0.0, 1.0, 0.0]; // 2 vertices
        let coords = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0]; // 3 pairs
        let g = Geometry::from_parts(&[0, 1], &verts, &coords, Primitive::Triangles).unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.texcoords().len(), 4);
    }

    #[test]
    fn empty_index_list_is_empty_mesh() {
        let g = Geometry::from_parts(&[], &[0.0, 0.0], &[], Primitive::Quads).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.vertex_count(), 1);
    }
}
