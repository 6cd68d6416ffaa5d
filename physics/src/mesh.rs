//! Maze mesh import: triangulated, re-centered vertex/index buffers.
//!
//! The OBJ parser (`tobj`) hands back flat position and index arrays. This module
//! merges every object in the file into one buffer and re-centers it so that:
//! - the X/Z footprint is centered on the origin,
//! - the lowest vertex sits at Y = 0.
//!
//! Degenerate content is tolerated: triangles pointing past the vertex array are
//! dropped, and an empty file yields an empty buffer.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::MeshLoadError;
use crate::types::{Point3, Vec3};

/// Axis-aligned bounds of a set of vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshBounds {
    pub min: Point3,
    pub max: Point3,
}

impl MeshBounds {
    /// Bounds of `points`, or `None` when there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let bounds = iter.fold(
            MeshBounds {
                min: first,
                max: first,
            },
            |acc, p| MeshBounds {
                min: acc.min.inf(p),
                max: acc.max.sup(p),
            },
        );
        Some(bounds)
    }

    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Triangulated maze geometry in maze-local (native, re-centered) space.
#[derive(Clone, Debug, Default)]
pub struct MeshBuffer {
    positions: Vec<Point3>,
    indices: Vec<[u32; 3]>,
}

impl MeshBuffer {
    /// Build a buffer from raw parser output and re-center it.
    ///
    /// Triangles with an index outside `positions` are skipped.
    pub fn from_raw(positions: Vec<Point3>, indices: impl IntoIterator<Item = [u32; 3]>) -> Self {
        let vertex_count = positions.len();
        let indices: Vec<[u32; 3]> = indices
            .into_iter()
            .filter(|tri| tri.iter().all(|&i| (i as usize) < vertex_count))
            .collect();

        let mut mesh = Self { positions, indices };
        mesh.recenter();
        mesh
    }

    /// Parse an OBJ stream, triangulating any polygonal faces.
    ///
    /// Material libraries are not resolved; only positions and face indices are read.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, MeshLoadError> {
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        };
        let (models, _materials) =
            tobj::load_obj_buf(reader, &options, |_| Err(tobj::LoadError::OpenFileFailed))?;

        let mut positions = Vec::new();
        let mut indices = Vec::new();
        for model in models {
            let mesh = model.mesh;
            let base = positions.len() as u32;

            positions.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Point3::new(p[0], p[1], p[2])),
            );
            indices.extend(
                mesh.indices
                    .chunks_exact(3)
                    .map(|t| [base + t[0], base + t[1], base + t[2]]),
            );
        }

        let mesh = Self::from_raw(positions, indices);
        log::debug!(
            "Loaded maze mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Open and parse an OBJ file.
    pub fn from_obj_path(path: impl AsRef<Path>) -> Result<Self, MeshLoadError> {
        let file = File::open(path.as_ref())?;
        Self::from_obj_reader(&mut BufReader::new(file))
    }

    /// Shift every vertex so the X/Z center is at the origin and min Y is 0.
    fn recenter(&mut self) {
        let Some(bounds) = MeshBounds::from_points(&self.positions) else {
            return;
        };
        let center = bounds.center();
        let offset = Vec3::new(center.x, bounds.min.y, center.z);
        for p in &mut self.positions {
            *p -= offset;
        }
    }

    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// True when there is nothing to collide with.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn bounds(&self) -> Option<MeshBounds> {
        MeshBounds::from_points(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn assert_recentered(mesh: &MeshBuffer) {
        let b = mesh.bounds().expect("non-empty mesh");
        let c = b.center();
        assert!(c.x.abs() < 1.0e-4, "x center {}", c.x);
        assert!(c.z.abs() < 1.0e-4, "z center {}", c.z);
        assert!(b.min.y.abs() < 1.0e-4, "min y {}", b.min.y);
    }

    #[test]
    fn recenters_offset_mesh() {
        let positions = vec![
            Point3::new(100.0, 50.0, -20.0),
            Point3::new(592.0, 50.0, -20.0),
            Point3::new(592.0, 170.0, 472.0),
            Point3::new(100.0, 170.0, 472.0),
        ];
        let mesh = MeshBuffer::from_raw(positions, [[0, 1, 2], [0, 2, 3]]);
        assert_recentered(&mesh);

        let extent = mesh.bounds().unwrap().extent();
        assert!((extent.x - 492.0).abs() < 1.0e-3);
        assert!((extent.y - 120.0).abs() < 1.0e-3);
        assert!((extent.z - 492.0).abs() < 1.0e-3);
    }

    #[test]
    fn recenters_asymmetric_point_cloud() {
        let positions = vec![
            Point3::new(-3.0, -7.5, 2.0),
            Point3::new(11.0, 4.0, 9.0),
            Point3::new(0.5, 1.0, -6.0),
            Point3::new(2.0, 0.0, 3.0),
        ];
        let mesh = MeshBuffer::from_raw(positions, [[0, 1, 2], [1, 2, 3]]);
        assert_recentered(&mesh);
    }

    #[test]
    fn drops_out_of_range_triangles() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let mesh = MeshBuffer::from_raw(positions, [[0, 1, 2], [0, 1, 7]]);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn empty_input_is_tolerated() {
        let mesh = MeshBuffer::from_raw(Vec::new(), []);
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());
    }

    #[test]
    fn obj_quads_are_triangulated_and_recentered() {
        let obj = "\
o floor
v 10 5 10
v 20 5 10
v 20 5 20
v 10 5 20
f 1 2 3 4
o wall
v 10 5 10
v 20 5 10
v 20 9 10
v 10 9 10
f 5 6 7 8
";
        let mesh = MeshBuffer::from_obj_reader(&mut Cursor::new(obj)).unwrap();
        assert_eq!(mesh.triangle_count(), 4);
        assert!(
            mesh.indices()
                .iter()
                .flatten()
                .all(|&i| (i as usize) < mesh.vertex_count())
        );
        assert_recentered(&mesh);
        assert!((mesh.bounds().unwrap().max.y - 4.0).abs() < 1.0e-5);
    }

    #[test]
    fn obj_without_faces_yields_empty_buffer() {
        let obj = "v 0 0 0\nv 1 0 0\n";
        let mesh = MeshBuffer::from_obj_reader(&mut Cursor::new(obj)).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = MeshBuffer::from_obj_path("/nonexistent/maze.obj").unwrap_err();
        assert!(matches!(err, MeshLoadError::Io(_)));
    }
}
