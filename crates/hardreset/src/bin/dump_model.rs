//! Print a JSON summary of a decoded model for inspecting game content.
//!
//! Run: `cargo run -p hardreset --features test-tools --bin dump_model -- <file.meta> [--vertices N]`
//!
//! `--vertices N` includes the first N vertex positions (default 8).

use std::env;
use std::process;

use serde_json::json;
use tracing_subscriber::EnvFilter;

const DEFAULT_VERTEX_PREVIEW: usize = 8;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = args.first() else {
        eprintln!("usage: dump_model <file.meta> [--vertices N]");
        process::exit(2);
    };
    let preview = match parse_preview(&args[1..]) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    let mut loader = hardreset::Loader::new();
    let model = match loader.load_model(path) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            process::exit(1);
        }
    };

    let summary = summarize(&model, loader.unhandled_keys().len(), preview);
    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Failed to serialize summary: {e}");
            process::exit(1);
        }
    }
}

fn parse_preview(args: &[String]) -> Result<usize, String> {
    match args {
        [] => Ok(DEFAULT_VERTEX_PREVIEW),
        [flag, n] if flag == "--vertices" => n
            .parse()
            .map_err(|e| format!("invalid vertex count {n:?}: {e}")),
        other => Err(format!("unexpected arguments: {other:?}")),
    }
}

fn summarize(model: &hardreset::Model, unhandled_keys: usize, preview: usize) -> serde_json::Value {
    let meshes: Vec<_> = model
        .meshes
        .iter()
        .map(|mesh| {
            let chunks: Vec<_> = mesh
                .chunks
                .iter()
                .map(|chunk| {
                    let range = chunk.index_range();
                    json!({
                        "start_index": chunk.start_index,
                        "prim_count": chunk.prim_count,
                        "base_index": chunk.base_index,
                        "index_range": [range.start, range.end],
                        "in_bounds": model.chunk_indices(chunk).is_some(),
                        "diffuse": chunk.diffuse,
                        "specular": chunk.specular,
                        "normal": chunk.normal,
                        "v_color": chunk.v_color.to_array(),
                        "material": chunk.material,
                    })
                })
                .collect();
            json!({
                "name": mesh.name,
                "child_num": mesh.child_num,
                "chunks": chunks,
            })
        })
        .collect();

    let first_vertices: Vec<_> = model
        .vertices
        .iter()
        .take(preview)
        .map(|v| v.position.to_array())
        .collect();

    json!({
        "mesh_count": model.meshes.len(),
        "vertex_count": model.vertices.len(),
        "index_count": model.indices.len(),
        "triangle_count": model.triangle_count(),
        "checksum": model.checksum,
        "ranges_valid": model.validate_ranges().is_ok(),
        "unhandled_keys": unhandled_keys,
        "meshes": meshes,
        "first_vertices": first_vertices,
        "first_indices": model.indices.iter().take(preview * 3).collect::<Vec<_>>(),
    })
}
