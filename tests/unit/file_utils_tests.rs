/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use subnorm::app_config::OutputFormat;
use subnorm::file_utils::FileManager;
use subnorm::subtitle_processor::SubtitleFormat;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "present.srt", "x")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));
    Ok(())
}

#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.srt"));
}

#[test]
fn test_generate_output_path_withJson_shouldReplaceExtension() {
    let output_path = FileManager::generate_output_path(Path::new("/tmp/input/episode.vtt"), OutputFormat::Json);
    assert_eq!(output_path, Path::new("/tmp/input/episode.json"));
}

#[test]
fn test_generate_output_path_withSrt_shouldNotOverwriteInput() {
    let input = Path::new("/tmp/input/episode.srt");
    let output_path = FileManager::generate_output_path(input, OutputFormat::Srt);
    assert_eq!(output_path, Path::new("/tmp/input/episode.normalized.srt"));
    assert_ne!(output_path, input);
}

#[test]
fn test_find_subtitle_files_withMixedDirectory_shouldReturnSortedSubtitles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.vtt", common::SAMPLE_VTT)?;
    common::create_test_file(temp_dir.path(), "a.srt", common::SAMPLE_SRT)?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a subtitle")?;
    common::create_test_file(temp_dir.path(), "nested/c.ass", common::SAMPLE_ASS)?;

    let files = FileManager::find_subtitle_files(temp_dir.path())?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.srt", "b.vtt", "nested/c.ass"]);
    Ok(())
}

#[test]
fn test_detect_format_shouldFollowExtension() {
    assert_eq!(FileManager::detect_format("x.ass"), Some(SubtitleFormat::Ass));
    assert_eq!(FileManager::detect_format("x.txt"), None);
}

#[test]
fn test_read_to_string_withByteOrderMark_shouldStripIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("\u{feff}{}", common::SAMPLE_SRT);
    let path = common::create_test_file(temp_dir.path(), "bom.srt", &content)?;

    let read = FileManager::read_to_string(&path)?;
    assert_eq!(read, common::SAMPLE_SRT);
    Ok(())
}

#[test]
fn test_write_to_file_withMissingParent_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out/deeper/result.json");

    FileManager::write_to_file(&path, "[]")?;
    assert_eq!(std::fs::read_to_string(&path)?, "[]");
    Ok(())
}
