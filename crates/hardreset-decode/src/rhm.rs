//! `.rhm` payload decoding.
//!
//! # Format
//!
//! No header or magic number. All values are little-endian.
//!
//! - `num_vertices` × 32-byte vertex record (3 × f32 position, 20 unknown bytes)
//! - `num_indices` × u16 index
//! - i32 checksum (algorithm unknown)
//!
//! The file must end right after the checksum.

use crate::error::{DecodeError, DecodeResult, Region};
use crate::{MAX_INDEXABLE_VERTICES, Rhm, VERTEX_POSITION_BYTES, VERTEX_STRIDE, Vertex};

/// Decode an `.rhm` payload holding the counts declared by its `.meta` header.
pub fn decode_rhm(data: &[u8], num_vertices: usize, num_indices: usize) -> DecodeResult<Rhm> {
    if num_vertices > MAX_INDEXABLE_VERTICES {
        tracing::warn!(
            "More than {MAX_INDEXABLE_VERTICES} vertices ({num_vertices}), some cannot be indexed"
        );
    }

    let (vertex_bytes, rest) = split_region(data, num_vertices.checked_mul(VERTEX_STRIDE))
        .ok_or(DecodeError::Truncated {
            region: Region::Vertices {
                index: data.len() / VERTEX_STRIDE,
            },
        })?;
    let vertices: Vec<Vertex> = vertex_bytes
        .chunks_exact(VERTEX_STRIDE)
        .map(decode_vertex)
        .collect();
    tracing::info!("Read {} vertices", vertices.len());

    let (index_bytes, rest) = split_region(rest, num_indices.checked_mul(2)).ok_or(
        DecodeError::Truncated {
            region: Region::Indices,
        },
    )?;
    let indices: Vec<u16> = index_bytes
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect();
    tracing::info!("Read {} indices", indices.len());

    let (checksum_bytes, _) = split_region(rest, Some(4)).ok_or(DecodeError::Truncated {
        region: Region::Checksum,
    })?;
    let checksum = i32::from_le_bytes([
        checksum_bytes[0],
        checksum_bytes[1],
        checksum_bytes[2],
        checksum_bytes[3],
    ]);
    tracing::debug!("Checksum (?): {checksum}");

    // Every region fit, so the expected size cannot overflow here.
    let expected = expected_len(num_vertices, num_indices).unwrap_or(usize::MAX);
    if data.len() > expected {
        return Err(DecodeError::TrailingBytes {
            count: data.len() - expected,
        });
    }

    Ok(Rhm {
        vertices,
        indices,
        checksum,
    })
}

/// Total size of an `.rhm` holding the given counts, or `None` on overflow.
#[must_use]
pub fn expected_len(num_vertices: usize, num_indices: usize) -> Option<usize> {
    num_vertices
        .checked_mul(VERTEX_STRIDE)?
        .checked_add(num_indices.checked_mul(2)?)?
        .checked_add(4)
}

fn split_region(data: &[u8], len: Option<usize>) -> Option<(&[u8], &[u8])> {
    let len = len?;
    (len <= data.len()).then(|| data.split_at(len))
}

fn decode_vertex(record: &[u8]) -> Vertex {
    let component = |i: usize| {
        let at = i * 4;
        f32::from_le_bytes([record[at], record[at + 1], record[at + 2], record[at + 3]])
    };
    let mut extra = [0; VERTEX_STRIDE - VERTEX_POSITION_BYTES];
    extra.copy_from_slice(&record[VERTEX_POSITION_BYTES..]);
    Vertex {
        position: glam::Vec3::new(component(0), component(1), component(2)),
        extra,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use proptest::prelude::*;

    use super::*;
    use crate::test_log::capture;

    fn encode(positions: &[Vec3], indices: &[u16], checksum: i32) -> Vec<u8> {
        let mut data = Vec::new();
        for (i, p) in positions.iter().enumerate() {
            for c in p.to_array() {
                data.extend_from_slice(&c.to_le_bytes());
            }
            #[allow(clippy::cast_possible_truncation)]
            data.extend(std::iter::repeat_n(i as u8, VERTEX_STRIDE - VERTEX_POSITION_BYTES));
        }
        for index in indices {
            data.extend_from_slice(&index.to_le_bytes());
        }
        data.extend_from_slice(&checksum.to_le_bytes());
        data
    }

    fn triangle() -> Vec<u8> {
        encode(&[Vec3::ZERO, Vec3::X, Vec3::Y], &[0, 1, 2], -17)
    }

    #[test]
    fn decodes_triangle() {
        let rhm = decode_rhm(&triangle(), 3, 3).unwrap();
        assert_eq!(rhm.vertices.len(), 3);
        assert_eq!(rhm.vertices[1].position, Vec3::X);
        assert_eq!(rhm.vertices[2].extra, [2; 20]);
        assert_eq!(rhm.indices, vec![0, 1, 2]);
        assert_eq!(rhm.checksum, -17);
        assert_eq!(expected_len(3, 3), Some(triangle().len()));
    }

    #[test]
    fn empty_payload_is_just_a_checksum() {
        let rhm = decode_rhm(&7i32.to_le_bytes(), 0, 0).unwrap();
        assert!(rhm.vertices.is_empty());
        assert!(rhm.indices.is_empty());
        assert_eq!(rhm.checksum, 7);
    }

    #[test]
    fn truncated_regions() {
        let data = triangle();
        let err = decode_rhm(&data[..40], 3, 3).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                region: Region::Vertices { index: 1 }
            }
        ));
        let err = decode_rhm(&data[..97], 3, 3).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { region: Region::Indices }));
        let err = decode_rhm(&data[..data.len() - 1], 3, 3).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { region: Region::Checksum }));
    }

    #[test]
    fn trailing_byte() {
        let mut data = triangle();
        data.push(0);
        let err = decode_rhm(&data, 3, 3).unwrap_err();
        assert!(matches!(err, DecodeError::TrailingBytes { count: 1 }));
        assert_eq!(err.to_string(), "rhm data is 1 byte(s) longer than expected");
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let err = decode_rhm(&triangle(), usize::MAX, 3).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { region: Region::Vertices { .. } }));
        let err = decode_rhm(&triangle(), 3, usize::MAX).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { region: Region::Indices }));
    }

    #[test]
    fn many_vertices_only_warn() {
        let count = MAX_INDEXABLE_VERTICES + 1;
        let positions = vec![Vec3::ONE; count];
        let data = encode(&positions, &[0, 1, 2], 0);
        let (decoded, logs) = capture(|| decode_rhm(&data, count, 3));
        assert_eq!(decoded.unwrap().vertices.len(), count);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("More than 65536 vertices (65537), some cannot be indexed"));
    }

    #[test]
    fn indexable_vertex_count_does_not_warn() {
        let count = MAX_INDEXABLE_VERTICES;
        let data = encode(&vec![Vec3::ONE; count], &[], 0);
        let (decoded, logs) = capture(|| decode_rhm(&data, count, 0));
        assert!(decoded.is_ok());
        assert!(!logs.contains("cannot be indexed"));
    }

    proptest! {
        #[test]
        fn any_truncation_fails_in_the_right_region(
            vertices in 0usize..6,
            indices in 0usize..12,
            cut in any::<prop::sample::Index>(),
        ) {
            let positions = vec![Vec3::new(1.0, 2.0, 3.0); vertices];
            let index_values: Vec<u16> = (0u16..).take(indices).collect();
            let data = encode(&positions, &index_values, 42);
            let len = cut.index(data.len());

            let err = decode_rhm(&data[..len], vertices, indices).unwrap_err();
            let vertex_end = vertices * VERTEX_STRIDE;
            let index_end = vertex_end + indices * 2;
            let region = match err {
                DecodeError::Truncated { region } => region,
                other => return Err(TestCaseError::fail(format!("unexpected error: {other}"))),
            };
            let expected = if len < vertex_end {
                Region::Vertices { index: len / VERTEX_STRIDE }
            } else if len < index_end {
                Region::Indices
            } else {
                Region::Checksum
            };
            prop_assert_eq!(region, expected);
        }

        #[test]
        fn exact_size_succeeds_one_more_byte_fails(vertices in 0usize..6, indices in 0usize..12) {
            let positions = vec![Vec3::NEG_Z; vertices];
            let index_values = vec![0u16; indices];
            let mut data = encode(&positions, &index_values, 1);
            prop_assert!(decode_rhm(&data, vertices, indices).is_ok());
            data.push(0xff);
            let is_overrun = matches!(
                decode_rhm(&data, vertices, indices),
                Err(DecodeError::TrailingBytes { count: 1 })
            );
            prop_assert!(is_overrun);
        }
    }
}
