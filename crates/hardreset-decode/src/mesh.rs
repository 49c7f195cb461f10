//! `[Mesh]` section decoding.

use std::io::BufRead;

use crate::Mesh;
use crate::chunk::read_chunk;
use crate::error::{DecodeError, DecodeResult};
use crate::reader::LineReader;
use crate::section::{RawValue, Section, SectionKind, UnhandledKeys, read_section};

#[derive(Default)]
struct MeshFields {
    chunk_count: Option<usize>,
    name: Option<String>,
    child_num: Option<i64>,
}

impl Section for MeshFields {
    const KIND: SectionKind = SectionKind::Mesh;

    fn apply(&mut self, value: RawValue<'_>) -> DecodeResult<bool> {
        match value.key {
            "ChunkCount" => self.chunk_count = Some(value.unsigned()?),
            "ChunkStart" => {
                // Only files whose chunks start at 0 are understood.
                let start = value.int()?;
                if start != 0 {
                    return Err(DecodeError::NonZeroChunkStart(start));
                }
            }
            "Name" => self.name = Some(value.string()?),
            "ChildNum" => self.child_num = Some(value.int()?),
            "Bounds" => {}
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Decode one `[Mesh]` section followed by its `ChunkCount` chunks.
pub fn read_mesh<R: BufRead>(
    reader: &mut LineReader<R>,
    unhandled: &mut UnhandledKeys,
) -> DecodeResult<Mesh> {
    let fields: MeshFields = read_section(reader, unhandled)?;
    let chunk_count = fields.chunk_count.ok_or(DecodeError::MissingField {
        section: SectionKind::Mesh,
        key: "ChunkCount",
    })?;

    let mut chunks = Vec::new();
    for index in 0..chunk_count {
        let chunk = read_chunk(reader, unhandled).map_err(|e| DecodeError::Chunk {
            index,
            source: Box::new(e),
        })?;
        chunks.push(chunk);
    }
    tracing::debug!(
        "Read mesh {:?} with {} chunk(s)",
        fields.name.as_deref().unwrap_or(""),
        chunks.len()
    );

    Ok(Mesh {
        name: fields.name,
        child_num: fields.child_num.unwrap_or(0),
        chunks,
    })
}
