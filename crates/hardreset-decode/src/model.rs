//! The assembled model handed to scene builders.

use crate::error::{DecodeError, DecodeResult};
use crate::{Chunk, Geometry, Mesh, Rhm, Vertex};

/// A fully decoded `.meta` / `.rhm` pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub meshes: Vec<Mesh>,
    /// All vertices; a vertex ID is its position in this list.
    pub vertices: Vec<Vertex>,
    /// All triangle indices, shared by every chunk.
    pub indices: Vec<u16>,
    /// Opaque trailing value of the `.rhm`.
    pub checksum: i32,
}

impl Model {
    /// Combine a decoded header with the payload decoded from its counts.
    #[must_use]
    pub fn assemble(geometry: Geometry, rhm: Rhm) -> Self {
        debug_assert_eq!(geometry.num_vertices, rhm.vertices.len());
        debug_assert_eq!(geometry.num_indices, rhm.indices.len());
        Self {
            meshes: geometry.meshes,
            vertices: rhm.vertices,
            indices: rhm.indices,
            checksum: rhm.checksum,
        }
    }

    /// Iterate over every chunk together with the mesh it belongs to.
    pub fn chunks(&self) -> impl Iterator<Item = (&Mesh, &Chunk)> {
        self.meshes
            .iter()
            .flat_map(|mesh| mesh.chunks.iter().map(move |chunk| (mesh, chunk)))
    }

    /// The part of the index array a chunk refers to, if it is in bounds.
    #[must_use]
    pub fn chunk_indices(&self, chunk: &Chunk) -> Option<&[u16]> {
        self.indices.get(chunk.index_range())
    }

    /// Sum of `PrimCount` over all chunks.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.chunks()
            .map(|(_, chunk)| chunk.prim_count as usize)
            .sum()
    }

    /// Check that every chunk range lies inside the index array and every
    /// index names an existing vertex.
    ///
    /// Decoding does not do this on its own; scene builders that index
    /// directly should call it first.
    pub fn validate_ranges(&self) -> DecodeResult<()> {
        for (mesh_index, mesh) in self.meshes.iter().enumerate() {
            for (chunk_index, chunk) in mesh.chunks.iter().enumerate() {
                let range = chunk.index_range();
                if range.end > self.indices.len() {
                    return Err(DecodeError::ChunkOutOfRange {
                        mesh: mesh_index,
                        chunk: chunk_index,
                        start: range.start,
                        end: range.end,
                        len: self.indices.len(),
                    });
                }
            }
        }

        if let Some((position, &value)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &v)| usize::from(v) >= self.vertices.len())
        {
            return Err(DecodeError::IndexOutOfRange {
                position,
                value,
                vertices: self.vertices.len(),
            });
        }
        Ok(())
    }
}
