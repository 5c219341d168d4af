// main.rs
//
// Minimal tiling pipeline: load an OBJ mesh, subdivide it into volumetric
// tiles, write one OBJ (plus MTL sidecar) per leaf.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use meshtile::{Mesh, TilingMode, tile};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (input, out_dir, depth) = match args.as_slice() {
        [input, out_dir] => (input, out_dir, 2),
        [input, out_dir, depth] => match depth.parse() {
            Ok(depth) => (input, out_dir, depth),
            Err(_) => {
                eprintln!("invalid depth: '{depth}'");
                return ExitCode::FAILURE;
            },
        },
        _ => {
            eprintln!("usage: meshtile <input.obj> <output-dir> [depth]");
            return ExitCode::FAILURE;
        },
    };

    match run(Path::new(input), Path::new(out_dir), depth) {
        Ok(count) => {
            println!("wrote {count} tiles to {out_dir}");
            ExitCode::SUCCESS
        },
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        },
    }
}

fn run(input: &Path, out_dir: &Path, depth: u32) -> Result<usize, Box<dyn Error>> {
    let mesh = Mesh::load_obj(input)?;
    println!(
        "loaded {}: {} vertices, {} triangles",
        input.display(),
        mesh.vertices.len(),
        mesh.triangles.len()
    );

    fs::create_dir_all(out_dir)?;

    let tiles = tile(&mesh, depth, TilingMode::Volumetric)?;
    println!(
        "depth {depth}: {} leaves, {} triangles clipped",
        tiles.leaves.len(),
        tiles.straddle_count
    );

    let count = tiles.leaves.len();
    for (index, mut leaf) in tiles.leaves.into_iter().enumerate() {
        leaf.name = format!("tile_{index}");
        leaf.write_obj(out_dir.join(format!("tile_{index}.obj")))?;
    }

    Ok(count)
}
