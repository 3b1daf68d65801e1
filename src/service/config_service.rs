use crate::config::ports::{AppConfig, ConfigPort};
use crate::error::ConvertResult;
use crate::utils::file::default_output_name;
use crate::utils::options::RawOptions;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> ConvertResult<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：自動尺寸、編碼器預設幀率、品質 15、無限循環
pub struct DefaultConfigAdapter {
    inputs: Vec<String>,
    output: Option<String>,
}

impl DefaultConfigAdapter {
    pub fn new(inputs: Vec<String>, output: Option<String>) -> Self {
        DefaultConfigAdapter { inputs, output }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> ConvertResult<AppConfig> {
        Ok(AppConfig {
            inputs: self.inputs.clone(),
            output: self.output.clone().unwrap_or_else(default_output_name),
            options: RawOptions::default(),
            ffmpeg: "ffmpeg".to_string(),
            no_progress: false,
            log_level: "info".to_string(),
        })
    }
}
