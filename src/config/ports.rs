use std::future::Future;

use crate::error::ConvertResult;
use crate::utils::options::RawOptions;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inputs: Vec<String>,
    pub output: String,
    pub options: RawOptions,
    pub ffmpeg: String,
    pub no_progress: bool,
    pub log_level: String,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> ConvertResult<AppConfig>;
}

// 轉換執行的 Port，成功時返回輸出檔案路徑
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> impl Future<Output = ConvertResult<String>>;
}
