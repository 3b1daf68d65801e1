use clap::Parser;
use std::path::Path;

use crate::error::{ConvertError, ConvertResult};

#[derive(Parser, Clone, Debug)]
#[command(
    name = "any_to_gif",
    about = "將 MP4 / MOV / AVI 影片或 PNG 序列轉換為最佳化的 GIF",
    long_about = "一個以 ffmpeg 為轉碼引擎的 GIF 轉換工具：單一影片（或單張 PNG）直接轉換，多個 PNG 檔案依自然排序組成幀序列。\n先產生調色盤，再以 Floyd-Steinberg 抖色輸出 GIF。\n不帶任何參數執行時進入互動模式。使用 `--help` 查看詳細用法。",
    arg_required_else_help = true
)]
pub struct Cli {
    /// 影片檔、PNG 檔，或包含 PNG 幀的目錄
    #[arg(required = true)]
    pub inputs: Vec<String>,
    /// 輸出 GIF 路徑，預設為 anytogif-<時間戳>.gif
    #[arg(short, long)]
    pub output: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub frame_rate: Option<String>,
    /// 1 為最佳品質，31 為最小檔案
    #[arg(long, default_value = "15", allow_hyphen_values = true)]
    pub quality: String,
    /// 0 表示無限循環
    #[arg(long = "loop", default_value = "0", allow_hyphen_values = true)]
    pub loop_count: String,
    #[arg(long, default_value = "ffmpeg")]
    pub ffmpeg: String,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

pub fn validate_input_path(input: &str) -> ConvertResult<&Path> {
    let path = Path::new(input);
    if !path.exists() {
        log::error!("輸入路徑不存在：{}", input);
        return Err(ConvertError::config(format!("輸入路徑 '{}' 不存在", input)));
    }
    Ok(path)
}

pub fn validate_input_paths(inputs: &[String]) -> ConvertResult<()> {
    if inputs.is_empty() {
        return Err(ConvertError::config("未指定任何輸入檔案"));
    }
    for input in inputs {
        validate_input_path(input)?;
    }
    Ok(())
}
