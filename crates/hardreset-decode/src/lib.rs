//! Decode Hard Reset `.meta` / `.rhm` model pairs.
//!
//! A model is stored as two files sharing a base name: a textual `.meta`
//! header describing meshes, chunks and element counts, and a binary `.rhm`
//! payload holding the raw vertex records and 16-bit triangle indices. This
//! crate provides pure synchronous decoding for both halves; opening files is
//! left to the caller.
//!
//! # Key functions
//!
//! - [`read_geometry`] / [`parse_meta`]: Decode the `[Geometry]` header and
//!   every `[Mesh]` and `[Chunk]` section below it
//! - [`decode_rhm`]: Decode the vertex records, index array and checksum
//! - [`Model::assemble`]: Combine both halves into one [`Model`]

use std::ops::Range;

use glam::Vec3;

mod error;
mod reader;
mod section;

pub mod chunk;
pub mod geometry;
pub mod mesh;
pub mod model;
pub mod rhm;
pub mod values;

#[cfg(test)]
mod test_log;

pub use chunk::read_chunk;
pub use error::{DecodeError, DecodeResult, Region, ValueKind};
pub use geometry::{parse_meta, read_geometry};
pub use mesh::read_mesh;
pub use model::Model;
pub use reader::LineReader;
pub use rhm::decode_rhm;
pub use section::{SectionKind, UnhandledKeys};

/// Size of one vertex record in an `.rhm` file.
pub const VERTEX_STRIDE: usize = 32;

/// Leading bytes of a vertex record that hold the position.
pub const VERTEX_POSITION_BYTES: usize = 12;

/// Largest vertex count a 16-bit index can fully address.
pub const MAX_INDEXABLE_VERTICES: usize = 1 << 16;

/// Index entries consumed by one primitive.
pub const INDICES_PER_TRIANGLE: usize = 3;

/// One vertex record from an `.rhm` file.
///
/// Only the position is understood. The remaining bytes of the record
/// (probably normal, UV and colour data) are kept untouched in `extra`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub extra: [u8; VERTEX_STRIDE - VERTEX_POSITION_BYTES],
}

/// A contiguous run of triangle indices with its material references.
///
/// Corresponds to one renderable submesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// First entry of the flat index array used by this chunk.
    pub start_index: u32,
    /// Number of triangles in this chunk.
    pub prim_count: u32,
    /// Carried through, meaning unknown.
    pub base_index: Option<i64>,
    /// Diffuse texture path.
    pub diffuse: Option<String>,
    /// Specular texture path.
    pub specular: Option<String>,
    /// Normal map texture path.
    pub normal: Option<String>,
    /// Vertex colour, `[1, 1, 1]` unless the chunk says otherwise.
    pub v_color: Vec3,
    /// Physics material name.
    pub material: Option<String>,
}

impl Chunk {
    /// The entries of the flat index array covered by this chunk.
    #[must_use]
    pub fn index_range(&self) -> Range<usize> {
        let start = self.start_index as usize;
        start..start + self.prim_count as usize * INDICES_PER_TRIANGLE
    }
}

/// A named group of chunks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub name: Option<String>,
    /// Meaning unknown; `0` when the file does not say.
    pub child_num: i64,
    pub chunks: Vec<Chunk>,
}

/// The decoded `.meta` header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geometry {
    /// Number of vertex records the `.rhm` must contain.
    pub num_vertices: usize,
    /// Number of 16-bit indices the `.rhm` must contain.
    pub num_indices: usize,
    pub meshes: Vec<Mesh>,
}

/// The decoded `.rhm` payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rhm {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    /// Trailing value of unknown derivation. Never validated.
    pub checksum: i32,
}
