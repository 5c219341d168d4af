//! Mesh file import and export (Wavefront OBJ with MTL sidecars).

mod obj;
