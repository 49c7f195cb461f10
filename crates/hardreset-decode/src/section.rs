//! The `[Tag]` + `key = value` protocol shared by every `.meta` section.
//!
//! Each section starts with a literal tag line, followed by key/value lines up
//! to the next line starting with `[` (or the end of the stream). Blank lines
//! are skipped. What a key means is up to the [`Section`] implementation; keys
//! it does not recognize are reported once through [`UnhandledKeys`].

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::BufRead;

use glam::Vec3;

use crate::error::{DecodeError, DecodeResult, ValueKind};
use crate::reader::LineReader;
use crate::values::{parse_int, split_key_value, unwrap_string, unwrap_vec3};

/// The three section levels of a `.meta` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Geometry,
    Mesh,
    Chunk,
}

impl SectionKind {
    /// The literal tag line that opens this section.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Geometry => "[Geometry]",
            Self::Mesh => "[Mesh]",
            Self::Chunk => "[Chunk]",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Keys that were seen but not understood, so each is only reported once.
///
/// Owned by the caller and threaded through every decode, so separate loaders
/// keep separate diagnostics. Never affects decoded data.
#[derive(Debug, Default)]
pub struct UnhandledKeys {
    seen: HashMap<SectionKind, HashSet<String>>,
}

impl UnhandledKeys {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` for `section`, logging it the first time it shows up.
    ///
    /// Returns `true` if the key had not been seen before.
    pub fn note(&mut self, section: SectionKind, key: &str) -> bool {
        if self.contains(section, key) {
            return false;
        }
        tracing::info!("Unhandled {section} key \"{key}\"");
        self.seen.entry(section).or_default().insert(key.to_owned())
    }

    #[must_use]
    pub fn contains(&self, section: SectionKind, key: &str) -> bool {
        self.seen.get(&section).is_some_and(|keys| keys.contains(key))
    }

    /// Total number of distinct keys recorded across all sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.values().map(HashSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// The right-hand side of one `key = value` line, with enough context to
/// report a malformed literal.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawValue<'a> {
    pub key: &'a str,
    pub raw: &'a str,
    pub line: usize,
}

impl RawValue<'_> {
    fn invalid(&self, kind: ValueKind) -> DecodeError {
        DecodeError::InvalidValue {
            line: self.line,
            key: self.key.to_owned(),
            kind,
            value: self.raw.trim().to_owned(),
        }
    }

    pub fn int(&self) -> DecodeResult<i64> {
        parse_int(self.raw).ok_or_else(|| self.invalid(ValueKind::Integer))
    }

    /// An integer that must not be negative, such as a count or an index.
    pub fn unsigned<T: TryFrom<i64>>(&self) -> DecodeResult<T> {
        let value = self.int()?;
        if value < 0 {
            return Err(DecodeError::NegativeValue {
                line: self.line,
                key: self.key.to_owned(),
                value,
            });
        }
        T::try_from(value).map_err(|_| self.invalid(ValueKind::Integer))
    }

    pub fn string(&self) -> DecodeResult<String> {
        unwrap_string(self.raw)
            .map(str::to_owned)
            .ok_or_else(|| self.invalid(ValueKind::String))
    }

    pub fn vec3(&self) -> DecodeResult<Vec3> {
        unwrap_vec3(self.raw).ok_or_else(|| self.invalid(ValueKind::Vector))
    }
}

/// One level of the `.meta` hierarchy.
pub(crate) trait Section: Default {
    const KIND: SectionKind;

    /// Store one key/value pair. Returns `Ok(false)` for keys this section
    /// does not know about.
    fn apply(&mut self, value: RawValue<'_>) -> DecodeResult<bool>;
}

/// Read the tag line and key/value body of one section.
///
/// Stops in front of the next `[` line, leaving child sections unread.
pub(crate) fn read_section<S: Section, R: BufRead>(
    reader: &mut LineReader<R>,
    unhandled: &mut UnhandledKeys,
) -> DecodeResult<S> {
    let expected = S::KIND.tag();
    match reader.read_line()? {
        Some(line) if line == expected => {}
        found => return Err(DecodeError::UnexpectedHeader { expected, found }),
    }

    let mut section = S::default();
    while !reader.at_section_boundary()? {
        let Some(line) = reader.read_line()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let number = reader.line_number();
        let (key, raw) =
            split_key_value(&line).ok_or(DecodeError::MissingEquals { line: number })?;
        let value = RawValue {
            key,
            raw,
            line: number,
        };
        if !section.apply(value)? {
            unhandled.note(S::KIND, key);
        }
    }
    Ok(section)
}
