//! `[Geometry]` header decoding, the entry point for `.meta` files.

use std::io::BufRead;

use crate::Geometry;
use crate::error::{DecodeError, DecodeResult};
use crate::mesh::read_mesh;
use crate::reader::LineReader;
use crate::section::{RawValue, Section, SectionKind, UnhandledKeys, read_section};

#[derive(Default)]
struct GeometryFields {
    meshes: Option<usize>,
    vertices: Option<usize>,
    indices: Option<usize>,
}

impl Section for GeometryFields {
    const KIND: SectionKind = SectionKind::Geometry;

    fn apply(&mut self, value: RawValue<'_>) -> DecodeResult<bool> {
        match value.key {
            "Meshes" => self.meshes = Some(value.unsigned()?),
            "Vertices" => self.vertices = Some(value.unsigned()?),
            "Indices" => self.indices = Some(value.unsigned()?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Decode a complete `.meta` stream: the `[Geometry]` header and all of its
/// meshes.
///
/// A header without `Meshes` decodes to zero meshes. Anything left in the
/// stream after the last declared mesh is ignored.
pub fn read_geometry<R: BufRead>(
    source: R,
    unhandled: &mut UnhandledKeys,
) -> DecodeResult<Geometry> {
    let mut reader = LineReader::new(source);
    let fields: GeometryFields = read_section(&mut reader, unhandled)?;

    let missing = |key| DecodeError::MissingField {
        section: SectionKind::Geometry,
        key,
    };
    let num_vertices = fields.vertices.ok_or_else(|| missing("Vertices"))?;
    let num_indices = fields.indices.ok_or_else(|| missing("Indices"))?;
    let mesh_count = fields.meshes.unwrap_or_else(|| {
        tracing::warn!("No Meshes count in [Geometry] header, assuming 0");
        0
    });

    let mut meshes = Vec::new();
    for index in 0..mesh_count {
        let mesh = read_mesh(&mut reader, unhandled).map_err(|e| DecodeError::Mesh {
            index,
            source: Box::new(e),
        })?;
        meshes.push(mesh);
    }

    match reader.skip_blank() {
        Ok(false) => {}
        Ok(true) => tracing::warn!(
            "Ignoring content after last mesh, starting at line {}",
            reader.line_number() + 1
        ),
        Err(e) => tracing::warn!("Ignoring unreadable content after last mesh: {e}"),
    }

    tracing::info!(
        "Read header: {} mesh(es), {} vertices, {} indices",
        meshes.len(),
        num_vertices,
        num_indices
    );
    Ok(Geometry {
        num_vertices,
        num_indices,
        meshes,
    })
}

/// Decode `.meta` text already held in memory.
pub fn parse_meta(text: &str, unhandled: &mut UnhandledKeys) -> DecodeResult<Geometry> {
    read_geometry(text.as_bytes(), unhandled)
}
