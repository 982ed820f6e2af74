//! # Media Naming and Validation
//!
//! Uploaded files get a collision-resistant object name:
//!
//! ```text
//! <prefix>-<unix millis>-<random base36>.<ext>
//! ```
//!
//! Most tables store the object as `/uploads/<name>`; news stores the bare
//! name. Header logos live in a separate bucket under `header/`.

use rand::Rng;
use shared_types::ValidationError;

/// Largest accepted logo upload.
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

/// Content types accepted for logos.
pub const LOGO_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/svg+xml",
    "image/webp",
];

/// Prefix of stored media paths in the uploads bucket.
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Folder of header logos in the images bucket.
pub const LOGO_FOLDER: &str = "header";

const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".webm", ".ogg", ".mov"];
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 11;

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Text after the last `.` of the file name, or the whole name.
    pub fn extension(&self) -> &str {
        extension_of(&self.file_name)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

fn extension_of(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(_, ext)| ext)
}

/// Media categories and their object name prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    ProjectThumbnail,
    ProjectBanner,
    ProjectGallery,
    News,
    IntroBanner,
    AboutSlider,
    AboutGallery,
}

impl MediaKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            MediaKind::ProjectThumbnail => "project-thumbnail",
            MediaKind::ProjectBanner => "project-banner",
            MediaKind::ProjectGallery => "project-gallery",
            MediaKind::News => "news",
            MediaKind::IntroBanner => "introbanner",
            MediaKind::AboutSlider => "about-slider",
            MediaKind::AboutGallery => "about-gallery",
        }
    }
}

/// Generated object name inside the uploads bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaName(String);

impl MediaName {
    /// `<prefix>-<millis>-<random>.<ext of original>`
    pub fn generate<R: Rng + ?Sized>(prefix: &str, original: &str, millis: i64, rng: &mut R) -> Self {
        Self(format!(
            "{}-{}-{}.{}",
            prefix,
            millis,
            random_suffix(rng),
            extension_of(original)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `/uploads/<name>`, the form stored in most tables.
    pub fn stored_path(&self) -> String {
        format!("{}{}", UPLOADS_PREFIX, self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Random base36 text of fixed length.
pub fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect()
}

/// Trailing segment of a path or URL.
pub fn file_name_from_path(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Object name for a stored media reference, which may be `/uploads/<name>`,
/// a full public URL or a bare name.
pub fn object_name(stored: &str) -> &str {
    match stored.split_once(UPLOADS_PREFIX) {
        Some((_, name)) => name,
        None => file_name_from_path(stored),
    }
}

/// Whether a stored media path points at a video.
pub fn is_video_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Object path of a new header logo.
pub fn logo_object_path(original: &str, millis: i64) -> String {
    format!("{}/logo-{}.{}", LOGO_FOLDER, millis, extension_of(original))
}

/// Object path of the logo behind a stored public URL.
pub fn logo_object_path_from_url(url: &str) -> String {
    format!("{}/{}", LOGO_FOLDER, file_name_from_path(url))
}

/// Public URL of an object in a public bucket.
pub fn public_object_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        path.trim_start_matches('/')
    )
}

/// Check a logo against the size and type limits.
pub fn validate_logo(file: &MediaFile) -> Result<(), ValidationError> {
    if file.size() > MAX_LOGO_BYTES {
        return Err(ValidationError::new("logo", "must be 5MB or smaller"));
    }
    if !LOGO_CONTENT_TYPES.contains(&file.content_type.as_str()) {
        return Err(ValidationError::new(
            "logo",
            "must be a JPEG, PNG, SVG or WebP image",
        ));
    }
    Ok(())
}
