use super::core::Im;
use image::ImageResult;
use std::path::Path;

fn dim_mismatch_err() -> image::ImageError {
    image::ImageError::Parameter(image::error::ParameterError::from_kind(
        image::error::ParameterErrorKind::DimensionMismatch,
    ))
}

// PNG I/O
// -----------------------------------------------------------------------------
impl Im<u8, 1> {
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let img = image::GrayImage::from_raw(self.w as u32, self.h as u32, self.arr.clone())
            .ok_or_else(dim_mismatch_err)?;

        img.save_with_format(path, image::ImageFormat::Png)
    }
}

impl Im<u8, 4> {
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let img = image::RgbaImage::from_raw(self.w as u32, self.h as u32, self.arr.clone())
            .ok_or_else(dim_mismatch_err)?;

        img.save_with_format(path, image::ImageFormat::Png)
    }
}

// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::im::Lum8Im;

    #[test]
    fn lum8_png_round_trip_keeps_pixels() {
        let mut im = Lum8Im::new(4, 3);
        for (i, v) in im.arr.iter_mut().enumerate() {
            *v = (i * 20) as u8;
        }

        let path = std::env::temp_dir().join(format!("scanmap_lum8_{}.png", std::process::id()));
        im.save_png(&path).unwrap();
        let back = image::open(&path).unwrap().into_luma8();
        let _ = std::fs::remove_file(&path);

        assert_eq!((back.width(), back.height()), (4, 3));
        assert_eq!(back.into_raw(), im.arr);
    }
}
