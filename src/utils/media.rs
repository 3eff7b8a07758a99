use std::path::Path;

use uuid::Uuid;

use crate::config::COMPANY_IMAGE_DIR;
use crate::dto::company_dto::Upload;
use crate::error::Result;

pub const LOGO_INVALID: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

const SIGNATURES: &[(&str, &[u8])] = &[
    ("png", b"\x89PNG\r\n\x1a\n"),
    ("jpg", b"\xff\xd8\xff"),
    ("jpeg", b"\xff\xd8\xff"),
    ("gif", b"GIF8"),
    ("webp", b"RIFF"),
];

/// Returns the normalised extension when the file name and the leading bytes
/// agree on an accepted image type.
pub fn image_extension(upload: &Upload) -> Option<&'static str> {
    let ext = Path::new(&upload.file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    let (ext, magic) = SIGNATURES.iter().find(|(known, _)| *known == ext)?;
    if !upload.bytes.starts_with(magic) {
        return None;
    }
    if *ext == "webp" && upload.bytes.get(8..12) != Some(b"WEBP".as_slice()) {
        return None;
    }
    Some(*ext)
}

/// Writes a logo under `<media_root>/company_images/` and returns the path
/// relative to the media root.
pub async fn save_logo(media_root: &str, upload: &Upload, ext: &str) -> Result<String> {
    let dir = Path::new(media_root).join(COMPANY_IMAGE_DIR);
    tokio::fs::create_dir_all(&dir).await?;
    let file_name = format!("{}.{}", Uuid::new_v4(), ext);
    tokio::fs::write(dir.join(&file_name), &upload.bytes).await?;
    Ok(format!("{}/{}", COMPANY_IMAGE_DIR, file_name))
}

/// Best-effort removal of a logo written by [`save_logo`].
pub async fn remove_logo(media_root: &str, relative: &str) {
    let path = Path::new(media_root).join(relative);
    if let Err(err) = tokio::fs::remove_file(&path).await {
        tracing::warn!(path = %path.display(), error = %err, "failed to remove logo");
    }
}
