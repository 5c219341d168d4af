//! Wavefront OBJ reading and writing.
//!
//! Only the triangle-mesh subset of OBJ is supported: `v`, `vt`, `f` with
//! exactly three corners, `usemtl` and `mtllib`. Normals are read and
//! dropped (splitting does not preserve them). Free-form curve and surface
//! directives are rejected outright rather than skipped, so a file that
//! needs them never loads half-way.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use hashbrown::HashMap;
use log::debug;
use nalgebra::{Point2, Point3};

use crate::errors::MeshError;
use crate::float_types::Real;
use crate::material::Material;
use crate::mesh::{DEFAULT_NAME, Mesh, Triangle, TriangleTexture};

/// Free-form geometry directives outside the supported subset.
const UNSUPPORTED_DIRECTIVES: [&str; 15] = [
    "l", "cstype", "deg", "bmat", "step", "curv", "curv2", "surf", "parm", "trim", "end",
    "hole", "scrv", "sp", "con",
];

impl Mesh {
    /// Load a mesh from a Wavefront OBJ file.
    ///
    /// `mtllib` references are resolved next to `path` and their materials
    /// registered in file order; `usemtl` of an unregistered name is fatal,
    /// as is any malformed or unsupported line. On error no partial mesh is
    /// returned.
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, MeshError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let mut vertices: Vec<Point3<Real>> = Vec::new();
        let mut texture_vertices: Vec<Point2<Real>> = Vec::new();
        let mut triangles: Vec<Triangle> = Vec::new();
        let mut materials: Vec<Material> = Vec::new();
        let mut material_ids: HashMap<String, usize> = HashMap::new();
        let mut current_material: Option<usize> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut tokens = trimmed.split_whitespace();
            let Some(keyword) = tokens.next() else {
                continue;
            };
            let args: Vec<&str> = tokens.collect();

            match keyword {
                "v" => {
                    if args.len() < 3 {
                        return Err(malformed(line_no, trimmed));
                    }
                    vertices.push(Point3::new(
                        parse_real(args[0], line_no)?,
                        parse_real(args[1], line_no)?,
                        parse_real(args[2], line_no)?,
                    ));
                },
                "vt" => {
                    if args.len() < 2 {
                        return Err(malformed(line_no, trimmed));
                    }
                    texture_vertices.push(Point2::new(
                        parse_real(args[0], line_no)?,
                        parse_real(args[1], line_no)?,
                    ));
                },
                // Normals are recognized but not tracked.
                "vn" => {},
                "usemtl" => {
                    let [name] = args.as_slice() else {
                        return Err(malformed(line_no, trimmed));
                    };
                    let id = material_ids.get(*name).copied().ok_or_else(|| {
                        MeshError::UnknownMaterial {
                            line_no,
                            name: (*name).to_string(),
                        }
                    })?;
                    current_material = Some(id);
                },
                "f" => {
                    triangles.push(parse_face(
                        &args,
                        trimmed,
                        line_no,
                        &vertices,
                        &texture_vertices,
                        current_material,
                    )?);
                },
                "mtllib" => {
                    let [mtl_file] = args.as_slice() else {
                        return Err(malformed(line_no, trimmed));
                    };
                    let mtl_path = path.parent().unwrap_or(Path::new("")).join(mtl_file);
                    for material in Material::read_mtl(&mtl_path)? {
                        material_ids.insert(material.name.clone(), materials.len());
                        materials.push(material);
                    }
                },
                _ if UNSUPPORTED_DIRECTIVES.contains(&keyword) => {
                    return Err(MeshError::UnsupportedDirective {
                        line_no,
                        directive: trimmed.to_string(),
                    });
                },
                // Grouping, smoothing and object names carry no geometry.
                _ => {},
            }
        }

        debug!(
            "loaded '{}': {} vertices, {} texture vertices, {} triangles, {} materials",
            path.display(),
            vertices.len(),
            texture_vertices.len(),
            triangles.len(),
            materials.len()
        );

        Ok(Mesh::new(
            vertices,
            texture_vertices,
            triangles,
            Arc::new(materials),
        ))
    }

    /// Write this mesh as an OBJ file plus a sibling MTL file.
    ///
    /// Faces are grouped by material with the material-less group first and
    /// a `usemtl` line between groups. Coordinates use Rust's shortest
    /// round-trip `f64` formatting, which is locale-independent.
    pub fn write_obj(&self, path: impl AsRef<Path>) -> Result<(), MeshError> {
        let path = path.as_ref();
        let mtl_path = path.with_extension("mtl");

        let mut out = BufWriter::new(File::create(path)?);

        writeln!(
            out,
            "mtllib {}",
            mtl_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        )?;
        let name = if self.name.trim().is_empty() {
            DEFAULT_NAME
        } else {
            &self.name
        };
        writeln!(out, "o {name}")?;

        for v in &self.vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for vt in &self.texture_vertices {
            writeln!(out, "vt {} {}", vt.x, vt.y)?;
        }

        // Option<usize> orders None first, which is exactly the required
        // group order.
        let mut groups: BTreeMap<Option<usize>, Vec<&Triangle>> = BTreeMap::new();
        for tri in &self.triangles {
            groups.entry(tri.material).or_default().push(tri);
        }

        for (material, tris) in groups {
            if let Some(id) = material {
                writeln!(out, "usemtl {}", self.materials[id].name)?;
            }
            for tri in tris {
                match &tri.texture {
                    Some(tex) => writeln!(
                        out,
                        "f {}/{} {}/{} {}/{}",
                        tri.indices[0] + 1,
                        tex.indices[0] + 1,
                        tri.indices[1] + 1,
                        tex.indices[1] + 1,
                        tri.indices[2] + 1,
                        tex.indices[2] + 1,
                    )?,
                    None => writeln!(
                        out,
                        "f {} {} {}",
                        tri.indices[0] + 1,
                        tri.indices[1] + 1,
                        tri.indices[2] + 1,
                    )?,
                }
            }
        }
        out.flush()?;

        let mut mtl_out = BufWriter::new(File::create(&mtl_path)?);
        for material in self.materials.iter() {
            write!(mtl_out, "{}", material.to_mtl())?;
        }
        mtl_out.flush()?;

        Ok(())
    }
}

fn malformed(line_no: usize, line: &str) -> MeshError {
    MeshError::MalformedLine {
        line_no,
        line: line.to_string(),
    }
}

fn parse_real(token: &str, line_no: usize) -> Result<Real, MeshError> {
    token
        .parse()
        .map_err(|source| MeshError::ParseFloat { line_no, source })
}

fn parse_index(token: &str, line_no: usize, len: usize) -> Result<usize, MeshError> {
    let raw: i64 = token
        .parse()
        .map_err(|source| MeshError::ParseInt { line_no, source })?;
    // 1-based in the file; zero and negative (relative) references are
    // outside the supported subset.
    if raw < 1 || raw as usize > len {
        return Err(MeshError::IndexOutOfRange {
            line_no,
            index: raw.max(0) as usize,
            len,
        });
    }
    Ok(raw as usize - 1)
}

/// Parse one `f` line into a triangle, denormalizing corner data.
fn parse_face(
    args: &[&str],
    line: &str,
    line_no: usize,
    vertices: &[Point3<Real>],
    texture_vertices: &[Point2<Real>],
    material: Option<usize>,
) -> Result<Triangle, MeshError> {
    let [a, b, c] = args else {
        return Err(MeshError::InvalidFace {
            line_no,
            line: line.to_string(),
        });
    };

    let mut corner_indices = [0usize; 3];
    let mut corner_textures = [None; 3];

    for (corner, token) in [a, b, c].into_iter().enumerate() {
        let mut parts = token.split('/');
        let vertex_part = parts.next().unwrap_or_default();
        let texture_part = parts.next();
        let _normal_part = parts.next();
        if parts.next().is_some() {
            return Err(MeshError::InvalidFace {
                line_no,
                line: line.to_string(),
            });
        }

        corner_indices[corner] = parse_index(vertex_part, line_no, vertices.len())?;
        if let Some(texture_token) = texture_part {
            corner_textures[corner] =
                Some(parse_index(texture_token, line_no, texture_vertices.len())?);
        }
    }

    let texture = match corner_textures {
        [Some(ta), Some(tb), Some(tc)] => Some(TriangleTexture {
            indices: [ta, tb, tc],
            coords: [
                texture_vertices[ta],
                texture_vertices[tb],
                texture_vertices[tc],
            ],
        }),
        [None, None, None] => None,
        // A corner mix of textured and untextured breaks the all-or-nothing
        // texture rule.
        _ => {
            return Err(MeshError::InvalidFace {
                line_no,
                line: line.to_string(),
            });
        },
    };

    Ok(Triangle {
        indices: corner_indices,
        positions: [
            vertices[corner_indices[0]],
            vertices[corner_indices[1]],
            vertices[corner_indices[2]],
        ],
        texture,
        material,
    })
}
