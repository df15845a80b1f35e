use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid drawing surface: {width}x{height} pixels")]
    InvalidSurface { width: u32, height: u32 },
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a usable TrueType font: {0}")]
    InvalidFont(String),
}
