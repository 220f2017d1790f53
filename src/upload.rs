//! Profile picture uploads: accepted file kinds, data URLs and file reading.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// File kinds accepted as profile pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
    Svg,
    Pdf,
}

impl FileKind {
    pub const ACCEPTED: [FileKind; 7] = [
        FileKind::Jpeg,
        FileKind::Png,
        FileKind::Gif,
        FileKind::WebP,
        FileKind::Bmp,
        FileKind::Svg,
        FileKind::Pdf,
    ];

    pub fn mime(self) -> &'static str {
        match self {
            FileKind::Jpeg => "image/jpeg",
            FileKind::Png => "image/png",
            FileKind::Gif => "image/gif",
            FileKind::WebP => "image/webp",
            FileKind::Bmp => "image/bmp",
            FileKind::Svg => "image/svg+xml",
            FileKind::Pdf => "application/pdf",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Jpeg => &["jpg", "jpeg"],
            FileKind::Png => &["png"],
            FileKind::Gif => &["gif"],
            FileKind::WebP => &["webp"],
            FileKind::Bmp => &["bmp"],
            FileKind::Svg => &["svg"],
            FileKind::Pdf => &["pdf"],
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ACCEPTED.into_iter().find(|kind| {
            kind.extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
    }

    /// PDFs are listed with a fixed icon rather than their content.
    pub fn shows_placeholder(self) -> bool {
        self == FileKind::Pdf
    }

    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(FileKind::Jpeg),
            ImageFormat::Png => Some(FileKind::Png),
            ImageFormat::Gif => Some(FileKind::Gif),
            ImageFormat::WebP => Some(FileKind::WebP),
            ImageFormat::Bmp => Some(FileKind::Bmp),
            _ => None,
        }
    }
}

/// Every extension offered in the file dialog.
pub fn accepted_extensions() -> Vec<&'static str> {
    FileKind::ACCEPTED
        .iter()
        .flat_map(|kind| kind.extensions().iter().copied())
        .collect()
}

/// Errors that can occur while turning a file into a profile picture.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("'{name}' is not a supported picture type ({mime})")]
    Unsupported { name: String, mime: String },
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed data URL: {0}")]
    InvalidDataUrl(String),
}

/// Identifies the file kind from its content.
pub fn sniff(bytes: &[u8]) -> Result<FileKind, Option<&'static str>> {
    if bytes.starts_with(b"%PDF-") {
        return Ok(FileKind::Pdf);
    }
    if looks_like_svg(bytes) {
        return Ok(FileKind::Svg);
    }
    match image::guess_format(bytes) {
        Ok(format) => FileKind::from_image_format(format).ok_or(Some(format.to_mime_type())),
        Err(_) => Err(None),
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(1024)]);
    let mut text = head.trim_start_matches('\u{feff}').trim_start();

    // Skip the prolog: XML declaration, processing instructions, comments
    // and a doctype, which may carry an internal subset in brackets.
    loop {
        let rest = if text.starts_with("<?") {
            text.split_once("?>")
        } else if text.starts_with("<!--") {
            text.split_once("-->")
        } else if text.starts_with("<!") {
            let has_subset = text.find('[').is_some_and(|open| {
                text.find('>').is_none_or(|close| open < close)
            });
            if has_subset {
                text.split_once("]>")
            } else {
                text.split_once('>')
            }
        } else {
            break;
        };

        match rest {
            Some((_, rest)) => text = rest.trim_start(),
            None => return false,
        }
    }

    text.starts_with("<svg")
}

/// A picture that can be shown in the gallery or the preview overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Picture {
    /// A hosted image referenced by URL.
    Remote(String),
    /// A local file embedded as a data URL.
    Uploaded {
        name: String,
        kind: FileKind,
        data_url: String,
    },
}

impl Picture {
    /// URI identifying the picture, a URL or a data URL.
    pub fn uri(&self) -> &str {
        match self {
            Picture::Remote(url) => url,
            Picture::Uploaded { data_url, .. } => data_url,
        }
    }

    pub fn kind(&self) -> Option<FileKind> {
        match self {
            Picture::Remote(_) => None,
            Picture::Uploaded { kind, .. } => Some(*kind),
        }
    }

    pub fn shows_placeholder(&self) -> bool {
        self.kind().is_some_and(FileKind::shows_placeholder)
    }
}

/// Validates `bytes` and wraps them as an uploaded picture.
pub fn picture_from_bytes(name: &str, bytes: &[u8]) -> Result<Picture, UploadError> {
    match sniff(bytes) {
        Ok(kind) => Ok(Picture::Uploaded {
            name: name.to_string(),
            kind,
            data_url: encode_data_url(kind, bytes),
        }),
        Err(detected) => {
            let mime = detected
                .map(str::to_string)
                .or_else(|| mime_from_name(name))
                .unwrap_or_else(|| "application/octet-stream".to_string());
            Err(UploadError::Unsupported {
                name: name.to_string(),
                mime,
            })
        }
    }
}

/// Reads a file from disk and turns it into an uploaded picture.
pub fn read_picture(path: &Path) -> Result<Picture, UploadError> {
    let bytes = std::fs::read(path).map_err(|source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    picture_from_bytes(&name, &bytes)
}

fn mime_from_name(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    FileKind::from_extension(ext).map(|kind| kind.mime().to_string())
}

pub fn encode_data_url(kind: FileKind, bytes: &[u8]) -> String {
    format!(
        "{DATA_URL_PREFIX}{}{BASE64_MARKER}{}",
        kind.mime(),
        STANDARD.encode(bytes)
    )
}

/// Splits a base64 data URL into its MIME type and decoded payload.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), UploadError> {
    let rest = url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| UploadError::InvalidDataUrl("missing 'data:' prefix".to_string()))?;
    let (mime, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or_else(|| UploadError::InvalidDataUrl("not base64 encoded".to_string()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|err| UploadError::InvalidDataUrl(err.to_string()))?;
    Ok((mime.to_string(), bytes))
}
