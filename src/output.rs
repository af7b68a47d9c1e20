//! Output path resolution

use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

/// Timestamp layout used in generated file names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// `<prefix>-YYYY-MM-DD-HH-MM-SS.pdf`
pub fn timestamped_file_name<Tz>(prefix: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}-{}.pdf", prefix, now.format(TIMESTAMP_FORMAT))
}

/// Decide where the cropped document is written.
///
/// An explicit output wins; `in_place` reuses the input path; otherwise a
/// timestamped file is placed next to the input.
pub fn resolve_output_path<Tz>(
    input: &Path,
    output: Option<&Path>,
    in_place: bool,
    prefix: &str,
    now: &DateTime<Tz>,
) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if let Some(output) = output {
        return output.to_path_buf();
    }
    if in_place {
        return input.to_path_buf();
    }
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join(timestamped_file_name(prefix, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap()
    }

    #[test]
    fn test_timestamped_file_name() {
        assert_eq!(
            timestamped_file_name("pdf-crop", &fixed_time()),
            "pdf-crop-2024-03-09-07-05-42.pdf"
        );
    }

    #[test]
    fn test_explicit_output_wins() {
        let path = resolve_output_path(
            Path::new("/docs/in.pdf"),
            Some(Path::new("/out/cropped.pdf")),
            true,
            "pdf-crop",
            &fixed_time(),
        );
        assert_eq!(path, PathBuf::from("/out/cropped.pdf"));
    }

    #[test]
    fn test_in_place() {
        let path = resolve_output_path(
            Path::new("/docs/in.pdf"),
            None,
            true,
            "pdf-crop",
            &fixed_time(),
        );
        assert_eq!(path, PathBuf::from("/docs/in.pdf"));
    }

    #[test]
    fn test_default_is_next_to_input() {
        let path = resolve_output_path(
            Path::new("/docs/in.pdf"),
            None,
            false,
            "trimmed",
            &fixed_time(),
        );
        assert_eq!(path, PathBuf::from("/docs/trimmed-2024-03-09-07-05-42.pdf"));
    }

    #[test]
    fn test_bare_file_name_stays_relative() {
        let path = resolve_output_path(Path::new("in.pdf"), None, false, "pdf-crop", &fixed_time());
        assert_eq!(path, PathBuf::from("pdf-crop-2024-03-09-07-05-42.pdf"));
    }
}
