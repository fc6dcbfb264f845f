//! Property-based tests for binary STL encoding.
//!
//! Run with: cargo test -p mesh-io -- proptest

#![allow(clippy::unwrap_used)]

use mesh_io::{decode_stl_binary, encode_stl_binary};
use mesh_types::{Point3, SoupNormals, TriangleSoup, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-1000.0..1000.0f64).prop_map(Point3::from)
}

/// Generate a well-formed soup with any of the three normal modes.
fn arb_soup() -> impl Strategy<Value = TriangleSoup> {
    (0usize..64).prop_flat_map(|n| {
        (prop::collection::vec(arb_point(), n * 3), 0u8..3).prop_map(move |(positions, mode)| {
            let normals = match mode {
                0 => SoupNormals::None,
                1 => SoupNormals::PerFace(vec![Vector3::z(); n]),
                _ => SoupNormals::PerVertex(vec![Vector3::x(); n * 3]),
            };
            TriangleSoup { positions, normals }
        })
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Encoded length is always 84 + 50n.
    #[test]
    fn encoded_size_law(soup in arb_soup(), header in ".{0,120}") {
        let bytes = encode_stl_binary(&soup, &header).unwrap();
        prop_assert_eq!(bytes.len(), 84 + 50 * soup.triangle_count());
    }

    /// Decoding an encoded soup recovers the triangle count and f32 positions.
    #[test]
    fn decode_recovers_triangles(soup in arb_soup()) {
        let decoded = decode_stl_binary(&encode_stl_binary(&soup, "").unwrap()).unwrap();
        prop_assert_eq!(decoded.triangle_count(), soup.triangle_count());
        for (got, want) in decoded.positions.iter().zip(&soup.positions) {
            prop_assert!((got - want).norm() < 1e-3);
        }
    }

    /// Any soup whose position count is not a multiple of three is rejected.
    #[test]
    fn partial_triangles_are_rejected(points in prop::collection::vec(arb_point(), 1..40)) {
        prop_assume!(points.len() % 3 != 0);
        let soup = TriangleSoup::from_positions(points);
        prop_assert!(encode_stl_binary(&soup, "").is_err());
    }
}
