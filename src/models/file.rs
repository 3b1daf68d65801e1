use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::utils::utils::format_size_mb;

/// 來源檔案的位元組來源
#[derive(Clone, Debug)]
pub enum FileSource {
    Memory(Arc<[u8]>),
    Path(PathBuf),
}

/// 使用者選擇的單一來源檔案
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub source: FileSource,
}

impl SourceFile {
    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        let data: Arc<[u8]> = data.into();
        SourceFile {
            name: name.into(),
            size: data.len() as u64,
            mime: mime.into(),
            source: FileSource::Memory(data),
        }
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("無效的檔案路徑：{}", path.display())))?;
        Ok(SourceFile {
            mime: mime_for_name(&name).to_string(),
            name,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub async fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Memory(data) => Ok(data.to_vec()),
            FileSource::Path(path) => tokio::fs::read(path).await,
        }
    }

    /// 最後一個 `.` 之後的副檔名（小寫）；沒有 `.` 時為整個名稱
    pub fn extension(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => self.name.to_lowercase(),
        }
    }
}

pub fn mime_for_name(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, e)| e.to_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "png" => "image/png",
        "gif" => "image/gif",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// 一次轉換所使用的檔案選擇，擷取後不可變更
#[derive(Clone, Debug, Default)]
pub struct FileSelection {
    files: Vec<SourceFile>,
}

impl FileSelection {
    pub fn new(files: Vec<SourceFile>) -> Self {
        FileSelection { files }
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn describe(&self) -> String {
        match self.files.as_slice() {
            [] => "未選擇檔案".to_string(),
            [file] => format!("{}（{}）", file.name, format_size_mb(file.size)),
            files => format!("{} 張 PNG 幀 - {}", files.len(), format_size_mb(self.total_size())),
        }
    }
}
