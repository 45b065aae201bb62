/// Borrowed single-channel 8-bit view. Rows are `stride` bytes apart.
#[derive(Clone, Copy, Debug)]
pub struct IntensityImage<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> IntensityImage<'a> {
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the view.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.w || y >= self.h {
            return None;
        }
        self.data.get(y * self.stride + x).copied()
    }

    /// Row `y`, or an empty slice when the buffer is shorter than declared.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        self.data.get(start..start + self.w).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}
