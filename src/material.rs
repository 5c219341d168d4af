//! Mesh materials and the MTL sidecar format.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::MeshError;

/// A named material, optionally referencing a texture image.
///
/// Immutable once loaded; split meshes share their parent's material list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub name: String,
    /// `map_Kd` texture file, relative to the MTL location.
    pub diffuse_map: Option<String>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Material {
            name: name.into(),
            diffuse_map: None,
        }
    }

    /// Read all materials of an MTL file, in declaration order.
    ///
    /// Only `newmtl` and `map_Kd` carry information the tiling pipeline
    /// needs; shading coefficients are skipped.
    pub fn read_mtl(path: &Path) -> Result<Vec<Material>, MeshError> {
        let reader = BufReader::new(File::open(path)?);
        let mut materials: Vec<Material> = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = line_no + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut tokens = trimmed.split_whitespace();
            let Some(keyword) = tokens.next() else {
                continue;
            };

            match keyword {
                "newmtl" => {
                    let Some(name) = tokens.next() else {
                        return Err(MeshError::MalformedLine {
                            line_no,
                            line: trimmed.to_string(),
                        });
                    };
                    materials.push(Material::new(name));
                },
                "map_Kd" => {
                    let Some(file) = tokens.next() else {
                        return Err(MeshError::MalformedLine {
                            line_no,
                            line: trimmed.to_string(),
                        });
                    };
                    let Some(current) = materials.last_mut() else {
                        return Err(MeshError::MalformedLine {
                            line_no,
                            line: trimmed.to_string(),
                        });
                    };
                    current.diffuse_map = Some(file.to_string());
                },
                _ => {},
            }
        }

        Ok(materials)
    }

    /// MTL fragment declaring this material.
    pub fn to_mtl(&self) -> String {
        let mut out = format!("newmtl {}\n", self.name);
        if let Some(map) = &self.diffuse_map {
            out.push_str("map_Kd ");
            out.push_str(map);
            out.push('\n');
        }
        out
    }
}
