use dialoguer::{Confirm, Input};
use std::path::Path;

use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::error::{ConvertError, ConvertResult};
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::convert::ConversionAdapter;
use crate::utils::file::default_output_name;
use crate::utils::options::RawOptions;
use crate::utils::utils::setup_logging;

fn prompt_error(what: &str, e: dialoguer::Error) -> ConvertError {
    ConvertError::config(format!("{}輸入失敗: {}", what, e))
}

pub async fn process_interactive_mode() -> ConvertResult<String> {
    println!("=== 歡迎使用互動模式 ===");
    setup_logging("info")?;
    let use_default_config = get_default_config_option()?;
    let inputs = get_input_paths()?;
    let output = get_output_path()?;

    let config_port: Box<dyn ConfigPort> = if use_default_config {
        println!("使用預設配置：自動尺寸，品質 15，無限循環");
        Box::new(DefaultConfigAdapter::new(inputs, Some(output)))
    } else {
        Box::new(InteractiveConfigAdapter::new(inputs, output))
    };

    let config = ConfigService::new(config_port).get_config()?;
    let output = ConversionAdapter.execute(config.clone()).await?;
    println!("實際使用的配置：{:#?}", config);
    Ok(output)
}

pub fn get_default_config_option() -> ConvertResult<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（自動尺寸、品質 15、無限循環，僅需指定輸入和輸出路徑）")
        .default(true)
        .interact()
        .map_err(|e| prompt_error("預設配置選擇", e))
}

pub fn get_input_paths() -> ConvertResult<Vec<String>> {
    let raw: String = Input::new()
        .with_prompt("請輸入影片、PNG 檔案或目錄路徑，多個路徑以逗號分隔（例如：./clip.mp4 或 ./frames）")
        .validate_with(|input: &String| -> Result<(), String> {
            for part in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !Path::new(part).exists() {
                    return Err(format!("路徑 '{}' 不存在", part));
                }
            }
            Ok(())
        })
        .interact_text()
        .map_err(|e| prompt_error("輸入路徑", e))?;
    Ok(raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

pub fn get_output_path() -> ConvertResult<String> {
    Input::new()
        .with_prompt("輸入輸出 GIF 路徑")
        .default(default_output_name())
        .interact_text()
        .map_err(|e| prompt_error("輸出路徑", e))
}

fn get_raw_field(prompt: &str, default: &str) -> ConvertResult<String> {
    Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .allow_empty(true)
        .show_default(!default.is_empty())
        .interact_text()
        .map_err(|e| prompt_error(prompt, e))
}

pub fn get_raw_options() -> ConvertResult<RawOptions> {
    let defaults = RawOptions::default();
    Ok(RawOptions {
        width: get_raw_field("寬度（像素，留空為自動）", &defaults.width)?,
        height: get_raw_field("高度（像素，留空為自動）", &defaults.height)?,
        frame_rate: get_raw_field("幀率（fps，1-60，留空使用預設）", &defaults.frame_rate)?,
        quality: get_raw_field("品質（1-31，1 為最佳）", &defaults.quality)?,
        loop_count: get_raw_field("循環次數（0 表示無限循環）", &defaults.loop_count)?,
    })
}

pub fn get_no_progress_option() -> ConvertResult<bool> {
    Confirm::new()
        .with_prompt("是否隱藏進度條？")
        .default(false)
        .interact()
        .map_err(|e| prompt_error("進度條選擇", e))
}

// 交互配置適配器
pub struct InteractiveConfigAdapter {
    inputs: Vec<String>,
    output: String,
}

impl InteractiveConfigAdapter {
    pub fn new(inputs: Vec<String>, output: String) -> Self {
        InteractiveConfigAdapter { inputs, output }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> ConvertResult<AppConfig> {
        let options = get_raw_options()?;
        let ffmpeg: String = Input::new()
            .with_prompt("ffmpeg 執行檔路徑")
            .default("ffmpeg".to_string())
            .interact_text()
            .map_err(|e| prompt_error("ffmpeg 路徑", e))?;
        let no_progress = get_no_progress_option()?;

        Ok(AppConfig {
            inputs: self.inputs.clone(),
            output: self.output.clone(),
            options,
            ffmpeg,
            no_progress,
            log_level: "info".to_string(),
        })
    }
}
