use crate::geom::V2;

/// Maps native scan geometry (e.g. millimetres on the fundus) into raster pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    // Row-major 3x3 matrix.
    m: [[f64; 3]; 3],
}

impl Mat3 {
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Constructs a homogeneous 3x3 matrix from a 2D affine transform.
    ///
    /// The expected 6-element layout is `[a, b, c, d, e, f]` such that:
    ///
    /// - `x' = a*x + c*y + e`
    /// - `y' = b*x + d*y + f`
    pub fn from_affine2(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            m: [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]],
        }
    }

    /// Parses a 6-element affine layout (see `from_affine2`).
    ///
    /// Returns `None` if there are fewer than 6 elements.
    pub fn from_affine_slice(xform: &[f64]) -> Option<Self> {
        if xform.len() < 6 {
            return None;
        }
        Some(Self::from_affine2(
            xform[0], xform[1], xform[2], xform[3], xform[4], xform[5],
        ))
    }

    #[inline]
    pub fn transform_point2(&self, x: f64, y: f64) -> (f64, f64) {
        let x2 = self.m[0][0] * x + self.m[0][1] * y + self.m[0][2];
        let y2 = self.m[1][0] * x + self.m[1][1] * y + self.m[1][2];
        (x2, y2)
    }

    #[inline]
    pub fn apply(&self, p: V2) -> V2 {
        let (x, y) = self.transform_point2(p.x, p.y);
        V2::new(x, y)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affine_layout_matches_documentation() {
        let m = Mat3::from_affine_slice(&[2.0, 0.5, 0.25, 3.0, 10.0, 20.0]).unwrap();
        // x' = 2*1 + 0.25*2 + 10, y' = 0.5*1 + 3*2 + 20
        assert_eq!(m.transform_point2(1.0, 2.0), (12.5, 26.5));
        assert!(Mat3::from_affine_slice(&[1.0, 0.0]).is_none());
    }

    #[test]
    fn scale_and_offset_maps_mm_to_pixels() {
        let m = Mat3::from_affine2(100.0, 0.0, 0.0, 50.0, 5.0, 0.0);
        assert_eq!(m.apply(V2::new(1.5, 2.0)), V2::new(155.0, 100.0));
        assert_eq!(Mat3::default().apply(V2::new(3.0, 4.0)), V2::new(3.0, 4.0));
    }
}
