//! Load Hard Reset models from `.meta` / `.rhm` file pairs.
//!
//! This crate opens the two files, runs them through [`hardreset_decode`] and
//! returns the combined [`Model`]. Turning the model into scene objects is up
//! to the caller.
//!
//! # Example
//!
//! ```no_run
//! let model = hardreset::load_model("models/enemy_crawler.meta")?;
//! for (mesh, chunk) in model.chunks() {
//!     println!("{:?}: {} triangles", mesh.name, chunk.prim_count);
//! }
//! # Ok::<(), hardreset::Error>(())
//! ```

mod error;

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

pub use error::{Error, Result};
pub use hardreset_decode::{
    Chunk, DecodeError, Geometry, Mesh, Model, Region, Rhm, SectionKind, UnhandledKeys, Vertex,
};

/// Extension of the text header file.
pub const META_EXTENSION: &str = "meta";

/// Extension of the binary payload file next to it.
pub const RHM_EXTENSION: &str = "rhm";

/// Loads model pairs, remembering which unknown keys it has already
/// reported.
#[derive(Debug, Default)]
pub struct Loader {
    unhandled: UnhandledKeys,
}

impl Loader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys seen so far that the decoder does not understand.
    #[must_use]
    pub fn unhandled_keys(&self) -> &UnhandledKeys {
        &self.unhandled
    }

    /// Load the model described by `path` and its sibling `.rhm` file.
    ///
    /// `path` must end in `.meta`.
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<Model> {
        let meta_path = path.as_ref();
        if meta_path.extension().and_then(OsStr::to_str) != Some(META_EXTENSION) {
            return Err(Error::NotMetaFile(meta_path.to_path_buf()));
        }

        let geometry = self.load_meta(meta_path)?;
        let rhm_path = meta_path.with_extension(RHM_EXTENSION);
        let rhm = load_rhm(&rhm_path, geometry.num_vertices, geometry.num_indices)?;

        let model = Model::assemble(geometry, rhm);
        tracing::info!(
            "Loaded {}: {} mesh(es), {} chunk(s), {} vertices",
            meta_path.display(),
            model.meshes.len(),
            model.chunks().count(),
            model.vertices.len()
        );
        Ok(model)
    }

    /// Decode just the `.meta` header at `path`.
    pub fn load_meta(&mut self, path: &Path) -> Result<Geometry> {
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        hardreset_decode::read_geometry(BufReader::new(file), &mut self.unhandled).map_err(
            |source| Error::Decode {
                path: path.to_path_buf(),
                source,
            },
        )
    }
}

/// Decode the `.rhm` payload at `path` using counts from its header.
pub fn load_rhm(path: &Path, num_vertices: usize, num_indices: usize) -> Result<Rhm> {
    let data = fs::read(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    hardreset_decode::decode_rhm(&data, num_vertices, num_indices).map_err(|source| {
        Error::Decode {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Load a model with a fresh [`Loader`].
pub fn load_model(path: impl AsRef<Path>) -> Result<Model> {
    Loader::new().load_model(path)
}
