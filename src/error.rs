use thiserror::Error;

/// Errors raised while turning a chosen file into a background image
#[derive(Error, Debug)]
pub enum PickError {
    #[error("Failed to read image file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Not a supported image file: {0}")]
    Unsupported(String),
    #[error("Browser file chooser failed: {0}")]
    Browser(String),
}

/// Errors raised while rasterizing the composed region
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Capture region is empty ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },
    #[error("Invalid capture options: {0}")]
    InvalidOptions(String),
}

/// Errors raised while persisting a capture
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Permission to write to the media store was not granted")]
    PermissionDenied,
    #[error("Failed to encode capture: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} export is not available on this platform")]
    Unsupported(&'static str),
    #[error("Browser refused the download: {0}")]
    Browser(String),
    #[error("Export was dropped before it finished")]
    Cancelled,
}

/// Anything that can go wrong during a save, from capture through export
#[derive(Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
