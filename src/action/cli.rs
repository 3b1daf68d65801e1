use clap::Parser;

use crate::action::interactive::process_interactive_mode;
use crate::config::config::{validate_input_paths, Cli};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::error::ConvertResult;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::convert::ConversionAdapter;
use crate::utils::file::default_output_name;
use crate::utils::options::RawOptions;
use crate::utils::utils::setup_logging;

pub async fn process_args(args: Vec<String>) -> ConvertResult<String> {
    if args.len() == 1 {
        process_interactive_mode().await
    } else {
        process_cli_mode().await
    }
}

pub async fn process_cli_mode() -> ConvertResult<String> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let config_port: Box<dyn ConfigPort> = if uses_default_config(&cli) {
        log::info!("未提供選項參數，使用預設配置：自動尺寸，品質 15，無限循環");
        Box::new(DefaultConfigAdapter::new(cli.inputs.clone(), cli.output.clone()))
    } else {
        Box::new(CliConfigAdapter::new(cli.clone()))
    };

    let config_service = ConfigService::new(config_port);
    let config = config_service.get_config()?;

    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    let output = ConversionAdapter.execute(config).await?;

    Ok(output)
}

/// 只提供輸入與輸出（以及 `--show-config`）時使用預設配置
pub fn uses_default_config(cli: &Cli) -> bool {
    cli.width.is_none()
        && cli.height.is_none()
        && cli.frame_rate.is_none()
        && cli.quality == "15"
        && cli.loop_count == "0"
        && cli.ffmpeg == "ffmpeg"
        && !cli.no_progress
        && cli.log_level == "info"
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> ConvertResult<AppConfig> {
        validate_input_paths(&self.cli.inputs)?;

        Ok(AppConfig {
            inputs: self.cli.inputs.clone(),
            output: self.cli.output.clone().unwrap_or_else(default_output_name),
            options: RawOptions {
                width: self.cli.width.clone().unwrap_or_default(),
                height: self.cli.height.clone().unwrap_or_default(),
                frame_rate: self.cli.frame_rate.clone().unwrap_or_default(),
                quality: self.cli.quality.clone(),
                loop_count: self.cli.loop_count.clone(),
            },
            ffmpeg: self.cli.ffmpeg.clone(),
            no_progress: self.cli.no_progress,
            log_level: self.cli.log_level.clone(),
        })
    }
}
