pub mod io;
pub mod u8;

pub use self::io::{GrayImageU8, ImageLoadError, load_intensity_image, luminance_from_rgb};
pub use self::u8::IntensityImage;
