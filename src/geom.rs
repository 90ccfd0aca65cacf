/// A real-valued point in raster pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct V2 {
    pub x: f64,
    pub y: f64,
}

impl V2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dist_sq(self, other: V2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn dist(self, other: V2) -> f64 {
        self.dist_sq(other).sqrt()
    }

    /// `self * (1 - v) + other * v`
    #[inline]
    pub fn lerp(self, other: V2, v: f64) -> V2 {
        V2::new(
            self.x * (1.0 - v) + other.x * v,
            self.y * (1.0 - v) + other.y * v,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// The pixel this point falls into, truncating toward zero.
    /// Negative, non-finite and out-of-raster points have no pixel.
    #[inline]
    pub fn to_pixel(self, w: usize, h: usize) -> Option<(usize, usize)> {
        if !(self.x >= 0.0 && self.y >= 0.0) {
            return None;
        }
        let x = self.x as usize;
        let y = self.y as usize;
        if x < w && y < h { Some((x, y)) } else { None }
    }
}

impl From<[f64; 2]> for V2 {
    fn from(xy: [f64; 2]) -> Self {
        V2::new(xy[0], xy[1])
    }
}
