//! Background image reference resolution
//!
//! Remote URLs and data URIs are used verbatim. A local file can be inlined
//! as a base64 data URI so the page has no external dependencies.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while embedding a background file
#[derive(Error, Debug)]
pub enum BackgroundError {
    #[error("Failed to read background image '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether a reference points somewhere other than the local filesystem
pub fn is_remote(reference: &str) -> bool {
    let lower = reference.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:")
}

/// MIME type guessed from a file extension
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Encode raw image bytes as a data URI
pub fn data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Produce the `href` for the background image
///
/// When `embed` is set and the reference is a local path, the file is read
/// (relative to `base_dir` if given) and returned as a data URI.
pub fn resolve(
    reference: &str,
    base_dir: Option<&Path>,
    embed: bool,
) -> Result<String, BackgroundError> {
    if !embed || is_remote(reference) {
        return Ok(reference.to_string());
    }

    let path = match base_dir {
        Some(dir) => dir.join(reference),
        None => PathBuf::from(reference),
    };
    let bytes = std::fs::read(&path).map_err(|source| BackgroundError::Read {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "embedding background image");
    Ok(data_uri(&bytes, mime_type(&path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_references_pass_through() {
        for reference in [
            "https://example.org/bg.jpg",
            "HTTP://example.org/bg.jpg",
            "data:image/png;base64,AAAA",
        ] {
            assert_eq!(resolve(reference, None, true).unwrap(), reference);
        }
    }

    #[test]
    fn test_local_reference_untouched_without_embed() {
        assert_eq!(
            resolve("images/missing.jpg", None, false).unwrap(),
            "images/missing.jpg"
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = resolve("definitely/not/here.png", None, true).unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.png"));
    }

    #[test]
    fn test_embeds_local_file() {
        let dir = std::env::temp_dir().join("zone-overlay-background-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("bg.png"), b"abc").unwrap();

        let href = resolve("bg.png", Some(&dir), true).unwrap();
        assert_eq!(href, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_type(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(mime_type(Path::new("a")), "application/octet-stream");
    }
}
