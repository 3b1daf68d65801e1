use log::info;

use crate::action::session::ConversionSession;
use crate::config::ports::{AppConfig, ConversionPort};
use crate::error::ConvertResult;
use crate::models::engine::EngineResources;
use crate::service::ffmpeg_engine::FfmpegEngine;
use crate::utils::file::{collect_sources, write_output};
use crate::utils::utils::{format_file_size, ProgressManager};

// 以原生 ffmpeg 引擎執行轉換的適配器
pub struct ConversionAdapter;

impl ConversionPort for ConversionAdapter {
    async fn execute(&self, config: AppConfig) -> ConvertResult<String> {
        let files = collect_sources(&config.inputs)?;
        let progress = ProgressManager::new(config.no_progress);

        let mut session = ConversionSession::new(FfmpegEngine::new(), EngineResources::native(&config.ffmpeg))
            .with_listener(progress.listener());
        session.select(files);
        info!("來源：{}，方式：{:?}", session.describe_selection(), session.strategy());
        progress.set_status(&session.describe_selection());

        let written = match session.convert(&config.options).await {
            Ok(result) => write_output(&config.output, result)
                .await
                .map(|_| format_file_size(result.size())),
            Err(e) => Err(e),
        };
        progress.finish(&session.status().text());

        let size = written?;
        info!("輸出：{}，大小：{}", config.output, size);
        Ok(config.output)
    }
}
