//! Path and filename helpers

use std::path::Path;

/// Source containers accepted by the scan
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp4", "mov", "avi", "mkv", "wmv"];

/// Get lowercase file extension from path
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Whether the path has one of the supported video extensions (case-insensitive)
pub fn is_supported_video(path: &Path) -> bool {
    get_extension(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Whether the path ends in `.mp4` (case-insensitive)
pub fn is_mp4(path: &Path) -> bool {
    get_extension(path).as_deref() == Some("mp4")
}

/// Word characters, dashes, dots and spaces only
pub fn is_valid_output_filename(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | ' '))
}

/// File name component as an owned string
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions_case_insensitive() {
        assert!(is_supported_video(Path::new("/in/a.MP4")));
        assert!(is_supported_video(Path::new("/in/a.mov")));
        assert!(is_supported_video(Path::new("/in/a.Wmv")));
        assert!(!is_supported_video(Path::new("/in/a.txt")));
        assert!(!is_supported_video(Path::new("/in/mp4")));
    }

    #[test]
    fn test_is_mp4() {
        assert!(is_mp4(Path::new("x.mp4")));
        assert!(is_mp4(Path::new("x.MP4")));
        assert!(!is_mp4(Path::new("x.mov")));
        assert!(!is_mp4(Path::new("videos.txt")));
    }

    #[test]
    fn test_output_filename_validation() {
        assert!(is_valid_output_filename("home_videos.mp4"));
        assert!(is_valid_output_filename("Summer 2020 - trip.mp4"));
        assert!(!is_valid_output_filename("a/b.mp4"));
        assert!(!is_valid_output_filename("what?.mp4"));
        assert!(!is_valid_output_filename(""));
    }
}
