/// Flat row-major raster with `N_CH` interleaved channels per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Im<T, const N_CH: usize> {
    pub w: usize,
    pub h: usize,
    pub s: usize, // stride in elements (w * N_CH)
    pub arr: Vec<T>,
}

// Constructor
// -----------------------------------------------------------------------------
impl<T: Copy + Default, const N_CH: usize> Im<T, N_CH> {
    pub fn new(w: usize, h: usize) -> Self {
        let s = w * N_CH;
        let arr = vec![T::default(); s * h];
        Self { w, h, s, arr }
    }

    /// Resets every element to `T::default()` without reallocating.
    pub fn clear(&mut self) {
        self.arr.fill(T::default());
    }
}

// Bounds-checked access
// -----------------------------------------------------------------------------
impl<T, const N_CH: usize> Im<T, N_CH> {
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h, "({x},{y}) outside {}x{}", self.w, self.h);
        y * self.s + x * N_CH
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, ch: usize) -> Option<&T> {
        if x >= self.w || y >= self.h || ch >= N_CH {
            return None;
        }
        self.arr.get(y * self.s + x * N_CH + ch)
    }

    /// All channels of row `y`.
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.s;
        let end = start + self.w * N_CH;
        &mut self.arr[start..end]
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

pub type RGBAIm = Im<u8, 4>;
pub type MaskIm = Im<u8, 1>;
pub type Lum8Im = Im<u8, 1>;

pub const MASK_SET: u8 = 255;

impl MaskIm {
    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.arr[y * self.s + x] != 0
    }

    /// Sets every pixel of `self` that is set in `other`.
    pub fn union_with(&mut self, other: &MaskIm) {
        assert_eq!(self.w, other.w, "width mismatch");
        assert_eq!(self.h, other.h, "height mismatch");
        for (dst, &src) in self.arr.iter_mut().zip(other.arr.iter()) {
            if src != 0 {
                *dst = MASK_SET;
            }
        }
    }

    pub fn count_set(&self) -> usize {
        self.arr.iter().filter(|&&v| v != 0).count()
    }
}
