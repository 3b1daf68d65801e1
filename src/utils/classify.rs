use crate::models::file::SourceFile;

const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mov", "avi"];

/// 依檔案選擇推導的轉換方式，每次選擇變更時重新計算
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionStrategy {
    None,
    Unsupported,
    SingleVideo,
    PngSequence,
}

impl ConversionStrategy {
    pub fn is_convertible(self) -> bool {
        matches!(self, ConversionStrategy::SingleVideo | ConversionStrategy::PngSequence)
    }
}

pub fn is_png_sequence(files: &[SourceFile]) -> bool {
    files.len() > 1 && files.iter().all(|f| f.name.to_lowercase().ends_with(".png"))
}

pub fn classify(files: &[SourceFile]) -> ConversionStrategy {
    if files.is_empty() {
        return ConversionStrategy::None;
    }
    if is_png_sequence(files) {
        return ConversionStrategy::PngSequence;
    }
    if let [file] = files {
        let ext = file.extension();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) || file.mime.starts_with("video/") {
            return ConversionStrategy::SingleVideo;
        }
        // 單張 PNG 與影片走相同路徑，由引擎決定成敗
        if ext == "png" {
            return ConversionStrategy::SingleVideo;
        }
    }
    ConversionStrategy::Unsupported
}
