//! `[Chunk]` section decoding.

use std::io::BufRead;

use glam::Vec3;

use crate::Chunk;
use crate::error::{DecodeError, DecodeResult};
use crate::reader::LineReader;
use crate::section::{RawValue, Section, SectionKind, UnhandledKeys, read_section};

#[derive(Default)]
struct ChunkFields {
    start_index: Option<u32>,
    prim_count: Option<u32>,
    base_index: Option<i64>,
    diffuse: Option<String>,
    specular: Option<String>,
    normal: Option<String>,
    v_color: Option<Vec3>,
    material: Option<String>,
}

impl Section for ChunkFields {
    const KIND: SectionKind = SectionKind::Chunk;

    fn apply(&mut self, value: RawValue<'_>) -> DecodeResult<bool> {
        match value.key {
            "StartIndex" => self.start_index = Some(value.unsigned()?),
            "PrimCount" => self.prim_count = Some(value.unsigned()?),
            "BaseIndex" => self.base_index = Some(value.int()?),
            "Diffuse" => self.diffuse = Some(value.string()?),
            "Specular" => self.specular = Some(value.string()?),
            "Normal" => self.normal = Some(value.string()?),
            "vColor" => self.v_color = Some(value.vec3()?),
            "Material" => self.material = Some(value.string()?),
            "Bounds" => {}
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Decode one `[Chunk]` section.
///
/// `StartIndex` and `PrimCount` are required.
pub fn read_chunk<R: BufRead>(
    reader: &mut LineReader<R>,
    unhandled: &mut UnhandledKeys,
) -> DecodeResult<Chunk> {
    let fields: ChunkFields = read_section(reader, unhandled)?;
    let missing = |key| DecodeError::MissingField {
        section: SectionKind::Chunk,
        key,
    };

    Ok(Chunk {
        start_index: fields.start_index.ok_or_else(|| missing("StartIndex"))?,
        prim_count: fields.prim_count.ok_or_else(|| missing("PrimCount"))?,
        base_index: fields.base_index,
        diffuse: fields.diffuse,
        specular: fields.specular,
        normal: fields.normal,
        v_color: fields.v_color.unwrap_or(Vec3::ONE),
        material: fields.material,
    })
}
