use std::path::{Path, PathBuf};

use chrono::Local;
use log::{info, warn};
use walkdir::WalkDir;

use crate::config::config::validate_input_path;
use crate::error::{ConvertError, ConvertResult};
use crate::models::conversion::ConversionResult;
use crate::models::file::SourceFile;

/// 目錄中的一般檔案（不含隱藏檔），依檔名排序
pub fn collect_dir_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("無法讀取目錄項目：{}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .map(|entry| entry.into_path())
        .collect()
}

pub fn collect_sources(inputs: &[String]) -> ConvertResult<Vec<SourceFile>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = validate_input_path(input)?;
        if path.is_dir() {
            for file in collect_dir_files(path) {
                files.push(SourceFile::from_path(&file)?);
            }
        } else {
            files.push(SourceFile::from_path(path)?);
        }
    }
    if files.is_empty() {
        return Err(ConvertError::config("沒有可轉換的檔案"));
    }
    info!("共收集 {} 個來源檔案", files.len());
    Ok(files)
}

pub async fn write_output(path: &str, result: &ConversionResult) -> ConvertResult<()> {
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, &result.data).await?;
    info!("已寫入 GIF：{}（{} 位元組）", path.display(), result.size());
    Ok(())
}

pub fn default_output_name() -> String {
    format!("anytogif-{}.gif", Local::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_expand_to_sorted_visible_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", ".DS_Store"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let inputs = vec![dir.path().to_string_lossy().to_string()];
        let files = collect_sources(&inputs).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
        assert_eq!(files[0].mime, "image/png");
    }

    #[test]
    fn empty_directory_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = vec![dir.path().to_string_lossy().to_string()];
        assert!(matches!(collect_sources(&inputs), Err(ConvertError::Config(_))));
    }

    #[tokio::test]
    async fn output_is_written_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out/result.gif");
        let result = ConversionResult::gif(b"GIF89a".to_vec());
        write_output(&target.to_string_lossy(), &result).await.unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"GIF89a");
    }
}
