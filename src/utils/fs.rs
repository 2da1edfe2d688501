use std::path::{Path, PathBuf};
use tokio::fs;
use crate::core::{FileCandidate, OutputImage};
use crate::utils::CompressorResult;
use crate::utils::formats::format_from_extension;

/// Returns the file name component of `path`, or the whole string if there is none
pub fn extract_filename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// MIME type advertised for a file on disk, derived from its extension.
///
/// Files with unknown extensions get `application/octet-stream` so the
/// selection filter can reject them as unsupported.
pub fn advertised_mime_type(path: &Path) -> &'static str {
    path.to_str()
        .and_then(|p| format_from_extension(p).ok())
        .map(|format| format.mime_type())
        .unwrap_or("application/octet-stream")
}

/// Reads a file into a candidate for the selection store
pub async fn read_candidate(path: impl AsRef<Path>) -> CompressorResult<FileCandidate> {
    let path = path.as_ref();
    let bytes = fs::read(path).await?;
    let name = extract_filename(&path.to_string_lossy()).to_string();

    Ok(FileCandidate::new(name, advertised_mime_type(path), bytes))
}

/// Writes an output under its suggested download name, creating `dir` if needed
pub async fn write_output(output: &OutputImage, dir: impl AsRef<Path>) -> CompressorResult<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).await?;
    let target = dir.join(output.suggested_filename());
    fs::write(&target, &output.bytes).await?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ImageFormat;

    #[test]
    fn filename_is_last_path_component() {
        assert_eq!(extract_filename("/photos/2024/beach.jpg"), "beach.jpg");
        assert_eq!(extract_filename("beach.jpg"), "beach.jpg");
    }

    #[test]
    fn unknown_extensions_advertise_octet_stream() {
        assert_eq!(advertised_mime_type(Path::new("a.PNG")), "image/png");
        assert_eq!(advertised_mime_type(Path::new("a.txt")), "application/octet-stream");
        assert_eq!(advertised_mime_type(Path::new("Makefile")), "application/octet-stream");
    }

    #[tokio::test]
    async fn candidate_carries_name_type_and_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.webp");
        std::fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let candidate = read_candidate(&path).await.unwrap();
        assert_eq!(candidate.name, "shot.webp");
        assert_eq!(candidate.mime_type, "image/webp");
        assert_eq!(candidate.size_bytes, 4);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_candidate(dir.path().join("nope.png")).await.unwrap_err();
        assert!(matches!(err, crate::utils::CompressorError::IO(_)));
    }

    #[tokio::test]
    async fn output_lands_under_compressed_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let output = OutputImage::new("pic.png", ImageFormat::PNG, (1, 1), 10, vec![9, 9]);

        let written = write_output(&output, &out_dir).await.unwrap();
        assert_eq!(written, out_dir.join("compressed_pic.png"));
        assert_eq!(std::fs::read(written).unwrap(), vec![9, 9]);
    }
}
