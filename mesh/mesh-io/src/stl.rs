//! Binary STL (Stereolithography) support.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (free text, zero padded)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! All numbers are little-endian. A file with `n` triangles is exactly
//! `84 + 50 * n` bytes.

// Truncation: f64 to f32 is intentional for STL format which uses f32
#![allow(clippy::cast_possible_truncation)]

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::{MeshTopology, Point3, SoupNormals, TriangleSoup, Vector3};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const STL_TRIANGLE_SIZE: usize = 50;

/// Header text used when the caller has nothing better.
pub const DEFAULT_STL_HEADER: &str = "Binary STL exported by lithoforge";

/// Header plus triangle count field.
const PREAMBLE_SIZE: usize = STL_HEADER_SIZE + 4;

/// Exact encoded size of a binary STL holding `triangles` triangles.
///
/// # Example
///
/// ```
/// assert_eq!(mesh_io::stl_binary_size(2), 184);
/// ```
#[must_use]
pub const fn stl_binary_size(triangles: usize) -> usize {
    PREAMBLE_SIZE + STL_TRIANGLE_SIZE * triangles
}

/// Encode a soup as a binary STL byte buffer.
///
/// `header` is copied into the 80-byte header field, truncated if longer
/// and zero padded if shorter.
///
/// Facet normals come from [`SoupNormals::PerFace`] when present. Otherwise
/// (no normals, or per-vertex normals) each facet normal is the normalized
/// cross product of the triangle edges, or the zero vector for a
/// degenerate triangle.
///
/// # Errors
///
/// Returns an error, before anything is encoded, if the soup is malformed:
/// - [`IoError::MalformedSoup`] if the position count is not a multiple of 3
/// - [`IoError::NormalCountMismatch`] if the normals do not match the mode
/// - [`IoError::TooManyTriangles`] if the count does not fit in a `u32`
///
/// # Example
///
/// ```
/// use mesh_io::encode_stl_binary;
/// use mesh_types::{Point3, TriangleSoup};
///
/// let soup = TriangleSoup::from_positions(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ]);
/// let bytes = encode_stl_binary(&soup, "one triangle")?;
/// assert_eq!(bytes.len(), 84 + 50);
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn encode_stl_binary(soup: &TriangleSoup, header: &str) -> IoResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(stl_binary_size(soup.triangle_count()));
    write_stl_binary(soup, header, &mut bytes)?;
    Ok(bytes)
}

/// Stream a soup as binary STL into `writer`.
///
/// See [`encode_stl_binary`] for the layout and normal rules.
///
/// # Errors
///
/// Returns a validation error before the first byte is written, or
/// [`IoError::Io`] if the writer fails.
pub fn write_stl_binary<W: Write>(soup: &TriangleSoup, header: &str, mut writer: W) -> IoResult<()> {
    let face_count = validate_soup(soup)?;

    writer.write_all(&header_bytes(header))?;
    writer.write_all(&face_count.to_le_bytes())?;

    let per_face = match &soup.normals {
        SoupNormals::PerFace(normals) => Some(normals),
        SoupNormals::None | SoupNormals::PerVertex(_) => None,
    };

    for (index, triangle) in soup.triangles().enumerate() {
        let normal = per_face
            .and_then(|n| n.get(index).copied())
            .unwrap_or_else(|| triangle.facet_normal());

        write_vector(&mut writer, &normal)?;
        for corner in [triangle.v0, triangle.v1, triangle.v2] {
            write_vector(&mut writer, &corner.coords)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Save a soup as a binary STL file.
///
/// The file is written to a temporary file in the destination directory and
/// renamed over `path` only once it is complete, so an interrupted export
/// never leaves a partial file under the final name.
///
/// # Errors
///
/// Returns a validation error (nothing is created), or [`IoError::Io`] if
/// the temporary file cannot be written or moved into place.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{save_stl, DEFAULT_STL_HEADER};
/// use mesh_types::TriangleSoup;
///
/// let soup = TriangleSoup::new();
/// save_stl(&soup, "relief.stl", DEFAULT_STL_HEADER).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(soup: &TriangleSoup, path: P, header: &str) -> IoResult<()> {
    let path = path.as_ref();
    validate_soup(soup)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_stl_binary(soup, header, &mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    debug!(temp = %temp.path().display(), "STL written to temporary file");

    temp.persist(path).map_err(|e| IoError::Io(e.error))?;

    info!(
        path = %path.display(),
        triangles = soup.triangle_count(),
        bytes = stl_binary_size(soup.triangle_count()),
        "Saved STL"
    );
    Ok(())
}

/// Decode a binary STL buffer into a soup with per-face normals.
///
/// Bytes after the last announced triangle are ignored.
///
/// # Errors
///
/// Returns [`IoError::InvalidHeader`] if the buffer is shorter than the
/// 84-byte preamble, and [`IoError::InvalidFaceCount`] if it holds fewer
/// triangle records than announced.
///
/// # Example
///
/// ```
/// use mesh_io::{decode_stl_binary, encode_stl_binary};
/// use mesh_types::{Point3, TriangleSoup};
///
/// let soup = TriangleSoup::from_positions(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ]);
/// let decoded = decode_stl_binary(&encode_stl_binary(&soup, "")?)?;
/// assert_eq!(decoded.positions, soup.positions);
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn decode_stl_binary(bytes: &[u8]) -> IoResult<TriangleSoup> {
    let Some((preamble, body)) = bytes.split_first_chunk::<PREAMBLE_SIZE>() else {
        return Err(IoError::InvalidHeader {
            expected: PREAMBLE_SIZE,
            got: bytes.len(),
        });
    };

    let [.., c0, c1, c2, c3] = *preamble;
    let face_count = u32::from_le_bytes([c0, c1, c2, c3]);

    let available = body.len() / STL_TRIANGLE_SIZE;
    if available < face_count as usize {
        return Err(IoError::InvalidFaceCount {
            expected: face_count,
            got: u32::try_from(available).unwrap_or(u32::MAX),
        });
    }

    let count = face_count as usize;
    let mut positions = Vec::with_capacity(count * 3);
    let mut normals = Vec::with_capacity(count);

    for record in body.chunks_exact(STL_TRIANGLE_SIZE).take(count) {
        normals.push(read_vector(&record[0..12]));
        for offset in [12, 24, 36] {
            positions.push(Point3::from(read_vector(&record[offset..offset + 12])));
        }
    }

    Ok(TriangleSoup {
        positions,
        normals: SoupNormals::PerFace(normals),
    })
}

/// Load a binary STL file into a soup with per-face normals.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist, or any error
/// from [`decode_stl_binary`].
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<TriangleSoup> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    let soup = decode_stl_binary(&bytes)?;
    debug!(path = %path.display(), triangles = soup.triangle_count(), "Loaded STL");
    Ok(soup)
}

/// Check the soup contract and return the triangle count as written.
fn validate_soup(soup: &TriangleSoup) -> IoResult<u32> {
    let positions = soup.positions.len();
    if positions % 3 != 0 {
        return Err(IoError::MalformedSoup { positions });
    }

    let triangles = positions / 3;
    let expected = match &soup.normals {
        SoupNormals::None => None,
        SoupNormals::PerFace(_) => Some(triangles),
        SoupNormals::PerVertex(_) => Some(positions),
    };
    if let Some(expected) = expected
        && soup.normals.len() != expected
    {
        return Err(IoError::NormalCountMismatch {
            expected,
            got: soup.normals.len(),
        });
    }

    u32::try_from(triangles).map_err(|_| IoError::TooManyTriangles { count: triangles })
}

fn header_bytes(text: &str) -> [u8; STL_HEADER_SIZE] {
    let mut header = [0u8; STL_HEADER_SIZE];
    let len = text.len().min(STL_HEADER_SIZE);
    header[..len].copy_from_slice(&text.as_bytes()[..len]);
    header
}

fn write_vector<W: Write>(writer: &mut W, v: &Vector3<f64>) -> IoResult<()> {
    writer.write_all(&(v.x as f32).to_le_bytes())?;
    writer.write_all(&(v.y as f32).to_le_bytes())?;
    writer.write_all(&(v.z as f32).to_le_bytes())?;
    Ok(())
}

/// Read 3 little-endian f32s from a 12-byte slice.
fn read_vector(buf: &[u8]) -> Vector3<f64> {
    let mut xyz = [0.0; 3];
    for (out, chunk) in xyz.iter_mut().zip(buf.chunks_exact(4)) {
        *out = f64::from(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    Vector3::from(xyz)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> [Point3<f64>; 3] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    fn two_triangles() -> TriangleSoup {
        let mut soup = TriangleSoup::new();
        soup.push_triangle(unit_triangle());
        soup.push_triangle([
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        soup
    }

    fn f32_at(bytes: &[u8], offset: usize) -> f32 {
        f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn two_triangles_take_184_bytes() {
        let bytes = encode_stl_binary(&two_triangles(), DEFAULT_STL_HEADER).unwrap();
        assert_eq!(bytes.len(), 184);
        assert_eq!(u32::from_le_bytes(bytes[80..84].try_into().unwrap()), 2);
    }

    #[test]
    fn empty_soup_is_just_the_preamble() {
        let bytes = encode_stl_binary(&TriangleSoup::new(), "").unwrap();
        assert_eq!(bytes.len(), 84);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn header_is_zero_padded() {
        let bytes = encode_stl_binary(&TriangleSoup::new(), "hello").unwrap();
        assert_eq!(&bytes[..5], b"hello");
        assert!(bytes[5..80].iter().all(|&b| b == 0));
    }

    #[test]
    fn long_header_is_truncated() {
        let text = "x".repeat(200);
        let bytes = encode_stl_binary(&two_triangles(), &text).unwrap();
        assert_eq!(bytes.len(), 184);
        assert!(bytes[..80].iter().all(|&b| b == b'x'));
    }

    #[test]
    fn computed_normal_follows_winding() {
        let bytes = encode_stl_binary(&two_triangles(), "").unwrap();
        assert_eq!(f32_at(&bytes, 84), 0.0);
        assert_eq!(f32_at(&bytes, 88), 0.0);
        assert_eq!(f32_at(&bytes, 92), 1.0);
        // Attribute byte count.
        assert_eq!(&bytes[132..134], &[0, 0]);
    }

    #[test]
    fn degenerate_triangle_gets_zero_normal() {
        let p = Point3::new(2.0, 2.0, 2.0);
        let soup = TriangleSoup::from_positions(vec![p, p, p]);
        let bytes = encode_stl_binary(&soup, "").unwrap();
        for offset in [84, 88, 92] {
            assert_eq!(f32_at(&bytes, offset), 0.0);
        }
    }

    #[test]
    fn per_face_normals_are_written_as_given() {
        let mut soup = TriangleSoup::from_positions(unit_triangle().to_vec());
        soup.normals = SoupNormals::PerFace(vec![Vector3::new(0.0, 1.0, 0.0)]);
        let bytes = encode_stl_binary(&soup, "").unwrap();
        assert_eq!(f32_at(&bytes, 88), 1.0);
        assert_eq!(f32_at(&bytes, 92), 0.0);
    }

    #[test]
    fn per_vertex_normals_are_replaced_by_facet_normal() {
        let mut soup = TriangleSoup::from_positions(unit_triangle().to_vec());
        soup.normals = SoupNormals::PerVertex(vec![Vector3::x(); 3]);
        let bytes = encode_stl_binary(&soup, "").unwrap();
        assert_eq!(f32_at(&bytes, 84), 0.0);
        assert_eq!(f32_at(&bytes, 92), 1.0);
    }

    #[test]
    fn malformed_soup_writes_nothing() {
        let mut soup = TriangleSoup::from_positions(unit_triangle().to_vec());
        soup.positions.push(Point3::origin());

        let mut sink = Vec::new();
        let err = write_stl_binary(&soup, "", &mut sink);
        assert!(matches!(err, Err(IoError::MalformedSoup { positions: 4 })));
        assert!(sink.is_empty());
    }

    #[test]
    fn normal_mismatch_is_rejected() {
        let mut soup = two_triangles();
        soup.normals = SoupNormals::PerFace(vec![Vector3::z()]);
        assert!(matches!(
            encode_stl_binary(&soup, ""),
            Err(IoError::NormalCountMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn decode_reads_back_positions_and_normals() {
        let soup = two_triangles();
        let decoded = decode_stl_binary(&encode_stl_binary(&soup, "t").unwrap()).unwrap();

        assert_eq!(decoded.triangle_count(), 2);
        assert!(decoded.is_well_formed());
        for (got, want) in decoded.positions.iter().zip(&soup.positions) {
            assert_relative_eq!(*got, *want, epsilon = 1e-6);
        }
        let SoupNormals::PerFace(normals) = &decoded.normals else {
            panic!("expected per-face normals");
        };
        assert_relative_eq!(normals[1], Vector3::z(), epsilon = 1e-6);
    }

    #[test]
    fn decode_rejects_short_buffers() {
        assert!(matches!(
            decode_stl_binary(&[0u8; 40]),
            Err(IoError::InvalidHeader {
                expected: 84,
                got: 40
            })
        ));

        let mut bytes = encode_stl_binary(&two_triangles(), "").unwrap();
        bytes.truncate(84 + 50 + 10);
        assert!(matches!(
            decode_stl_binary(&bytes),
            Err(IoError::InvalidFaceCount {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relief.stl");

        save_stl(&two_triangles(), &path, DEFAULT_STL_HEADER).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 184);

        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded.triangle_count(), 2);

        // Only the final file remains.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relief.stl");
        fs::write(&path, b"old contents").unwrap();

        save_stl(&two_triangles(), &path, "").unwrap();
        assert_eq!(fs::read(&path).unwrap().len(), 184);
    }

    #[test]
    fn failed_save_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relief.stl");
        let soup = TriangleSoup::from_positions(vec![Point3::origin(); 2]);

        assert!(save_stl(&soup, &path, "").is_err());
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_stl("nonexistent_file_12345.stl");
        let Err(IoError::FileNotFound { path }) = result else {
            panic!("expected FileNotFound");
        };
        assert!(path.to_string_lossy().contains("nonexistent"));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("relief.stl");
        assert!(matches!(
            save_stl(&two_triangles(), &path, ""),
            Err(IoError::Io(_))
        ));
    }
}
