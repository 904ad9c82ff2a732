//! Song-list file uploads: media-type gate and text decoding.

use std::path::Path;

use anyhow::Context;

use crate::error::AssistError;

/// Media type a file would be declared with, judged by its extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("txt" | "text") => "text/plain",
        Some("csv") => "text/csv",
        Some("md" | "markdown") => "text/markdown",
        Some("html" | "htm") => "text/html",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("m3u" | "m3u8") => "audio/x-mpegurl",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Gate an upload on its media type before anything is read.
/// Returns the file name to display on success.
pub fn check_upload(path: &Path, accepted_media_type: &str) -> Result<String, AssistError> {
    let media_type = media_type_for_path(path);
    let file_name = file_name_of(path);
    if media_type == accepted_media_type {
        Ok(file_name)
    } else {
        Err(AssistError::RejectedUpload {
            file_name,
            media_type: media_type.to_string(),
        })
    }
}

/// Decode file bytes as UTF-8, replacing invalid sequences.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or_else(|| text.into_owned())
}

pub async fn read_text_file(path: &Path) -> anyhow::Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", file_name_of(path)))?;
    Ok(decode_text(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn txt_files_are_plain_text() {
        assert_eq!(media_type_for_path(Path::new("songs.txt")), "text/plain");
        assert_eq!(media_type_for_path(Path::new("/x/SONGS.TXT")), "text/plain");
        assert_eq!(media_type_for_path(Path::new("cover.png")), "image/png");
        assert_eq!(
            media_type_for_path(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn png_is_rejected() {
        let err = check_upload(Path::new("/tmp/cover.png"), "text/plain").unwrap_err();
        assert_eq!(
            err,
            AssistError::RejectedUpload {
                file_name: "cover.png".into(),
                media_type: "image/png".into(),
            }
        );
    }

    #[test]
    fn txt_is_accepted_with_name() {
        let name = check_upload(&PathBuf::from("/home/me/playlist.txt"), "text/plain").unwrap();
        assert_eq!(name, "playlist.txt");
    }

    #[test]
    fn decode_replaces_invalid_utf8_and_strips_bom() {
        assert_eq!(decode_text(b"\xef\xbb\xbfSong - Artist"), "Song - Artist");
        assert_eq!(decode_text(b"ok \xff"), "ok \u{fffd}");
    }

    #[tokio::test]
    async fn read_missing_file_names_it() {
        let err = read_text_file(Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("here.txt"));
    }
}
