//! Errors from loading textures and playing the music track
//!
//! Every variant is recoverable: a texture falls back to a flat color and
//! the music toggle stays off.

use std::fmt;
use std::io;

/// Why a texture or the music track could not be used
#[derive(Debug)]
pub enum AssetError {
    /// No file exists at the expected path
    NotFound(String),
    /// Reading the file failed
    Io(io::Error),
    /// The file was read but is not a supported image or audio format
    Decode(String),
    /// No audio device, or the device refused the stream
    Output(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound(path) => write!(f, "Asset not found: {}", path),
            AssetError::Io(err) => write!(f, "Asset IO error: {}", err),
            AssetError::Decode(msg) => write!(f, "Cannot decode asset: {}", msg),
            AssetError::Output(msg) => write!(f, "Audio output unavailable: {}", msg),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        AssetError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_names_the_asset() {
        let msg = AssetError::NotFound("assets/textures/earth.jpg".to_string()).to_string();
        assert_eq!(msg, "Asset not found: assets/textures/earth.jpg");

        let msg = AssetError::Decode("saturn_ring.png: bad PNG header".to_string()).to_string();
        assert!(msg.starts_with("Cannot decode asset"));
        assert!(msg.contains("saturn_ring.png"));
    }

    #[test]
    fn test_output_error() {
        let err = AssetError::Output("no default output device".to_string());
        assert_eq!(err.to_string(), "Audio output unavailable: no default output device");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_error_is_source() {
        let err = AssetError::from(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"));
        assert!(err.to_string().contains("access denied"));
        let source = err.source().and_then(|s| s.downcast_ref::<io::Error>());
        assert_eq!(source.map(|e| e.kind()), Some(io::ErrorKind::PermissionDenied));
    }
}
