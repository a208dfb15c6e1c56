//! ascii-wallpaper library crate.
//!
//! Converts decoded raster images into grids of glyphs, optionally colored.
//! See [`ascii`] for the engine and [`convert`] for the end-to-end pipeline.
//!
//! ```
//! use ascii_wallpaper::{convert, ConversionConfig, RasterImage};
//!
//! let image = RasterImage::filled(8, 8, [255, 255, 255]).unwrap();
//! let config = ConversionConfig {
//!     width: Some(4),
//!     height: Some(2),
//!     ..Default::default()
//! };
//! let result = convert(&image, &config).unwrap();
//! assert_eq!(result.grid.to_plain_text(), "    \n    ");
//! ```

pub mod ascii;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod perf;
pub mod raster;

pub use convert::{convert, Conversion, ConversionConfig, Converter, GlyphMetrics};
pub use error::{ConfigError, ConvertError, ValidationError};
pub use raster::{PixelFormat, RasterImage};
