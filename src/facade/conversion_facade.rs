use futures::future::join_all;
use log::{error, info};

use crate::error::{ConvertError, ConvertResult};
use crate::models::conversion::ConversionResult;
use crate::models::file::{FileSelection, SourceFile};
use crate::service::traits::i_engine::Engine;
use crate::service::workspace::WorkspaceClient;
use crate::utils::classify::{classify, ConversionStrategy};
use crate::utils::command::{build_filters, encode_command, palette_command, CommandSource};
use crate::utils::options::ConversionOptions;
use crate::utils::utils::{natural_cmp, sanitize_name};

pub const PALETTE_NAME: &str = "palette.png";
pub const OUTPUT_NAME: &str = "output.gif";
pub const FRAME_PATTERN: &str = "frame_%05d.png";

/// 第 index 幀（從 1 開始）在工作區中的名稱
pub fn frame_name(index: usize) -> String {
    format!("frame_{:05}.png", index)
}

/// 來源在工作區中的名稱；與調色盤或輸出檔同名時加上 `input_` 前綴
pub fn workspace_input_name(file_name: &str) -> String {
    let name = sanitize_name(file_name);
    if name == PALETTE_NAME || name == OUTPUT_NAME {
        format!("input_{}", name)
    } else {
        name
    }
}

/// 轉換流程協調者：寫入來源、產生調色盤、編碼、讀回輸出，最後清理暫存項目
pub struct ConversionFacade<'a, E: Engine> {
    workspace: WorkspaceClient<'a, E>,
}

impl<'a, E: Engine> ConversionFacade<'a, E> {
    pub fn new(engine: &'a E) -> Self {
        ConversionFacade {
            workspace: WorkspaceClient::new(engine),
        }
    }

    pub async fn convert(&self, selection: &FileSelection, options: &ConversionOptions) -> ConvertResult<ConversionResult> {
        match classify(selection.files()) {
            ConversionStrategy::SingleVideo => self.convert_video(&selection.files()[0], options).await,
            ConversionStrategy::PngSequence => self.convert_png_sequence(selection.files(), options).await,
            other => Err(ConvertError::UnsupportedSelection(other)),
        }
    }

    pub async fn convert_video(&self, file: &SourceFile, options: &ConversionOptions) -> ConvertResult<ConversionResult> {
        let input_name = workspace_input_name(&file.name);
        info!("開始影片轉換：{} -> {}", file.name, input_name);

        let transient = vec![input_name.clone(), PALETTE_NAME.to_string(), OUTPUT_NAME.to_string()];
        let outcome = self.run_video(file, &input_name, options).await;
        self.finish(outcome, &transient).await
    }

    async fn run_video(&self, file: &SourceFile, input_name: &str, options: &ConversionOptions) -> ConvertResult<Vec<u8>> {
        let data = file.read_bytes().await?;
        self.workspace.write(input_name, data).await?;
        self.palette_and_encode(&CommandSource::File(input_name.to_string()), options).await
    }

    pub async fn convert_png_sequence(&self, files: &[SourceFile], options: &ConversionOptions) -> ConvertResult<ConversionResult> {
        let mut sorted: Vec<&SourceFile> = files.iter().collect();
        sorted.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        let frames: Vec<(String, &SourceFile)> = sorted
            .into_iter()
            .enumerate()
            .map(|(i, file)| (frame_name(i + 1), file))
            .collect();
        info!("開始 PNG 序列轉換，共 {} 幀，幀率 {}", frames.len(), options.sequence_frame_rate());

        let mut transient: Vec<String> = frames.iter().map(|(name, _)| name.clone()).collect();
        transient.push(PALETTE_NAME.to_string());
        transient.push(OUTPUT_NAME.to_string());

        let outcome = self.run_sequence(&frames, options).await;
        self.finish(outcome, &transient).await
    }

    async fn run_sequence(&self, frames: &[(String, &SourceFile)], options: &ConversionOptions) -> ConvertResult<Vec<u8>> {
        // 各幀寫入彼此無先後關係；全部結束後才回報第一個錯誤，清理時不會有仍在寫入的幀
        join_all(frames.iter().map(|(name, file)| async move {
            let data = file.read_bytes().await?;
            self.workspace.write(name, data).await?;
            Ok::<(), ConvertError>(())
        }))
        .await
        .into_iter()
        .collect::<ConvertResult<Vec<()>>>()?;

        let source = CommandSource::Sequence {
            pattern: FRAME_PATTERN.to_string(),
            frame_rate: options.sequence_frame_rate(),
        };
        self.palette_and_encode(&source, options).await
    }

    async fn palette_and_encode(&self, source: &CommandSource, options: &ConversionOptions) -> ConvertResult<Vec<u8>> {
        let filters = build_filters(options.frame_rate, options.width, options.height);

        let palette = palette_command(source, &filters, PALETTE_NAME);
        self.workspace.execute(palette.args()).await?;

        let encode = encode_command(
            source,
            &filters,
            PALETTE_NAME,
            options.quality,
            options.loop_count,
            OUTPUT_NAME,
        );
        self.workspace.execute(encode.args()).await?;

        self.workspace.read(OUTPUT_NAME).await
    }

    async fn finish(&self, outcome: ConvertResult<Vec<u8>>, transient: &[String]) -> ConvertResult<ConversionResult> {
        // 同一名稱只刪除一次
        let mut names: Vec<String> = Vec::with_capacity(transient.len());
        for name in transient {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        self.workspace.delete_all(&names).await;
        match outcome {
            Ok(data) => {
                info!("轉換完成，GIF 大小：{} 位元組", data.len());
                Ok(ConversionResult::gif(data))
            }
            Err(e) => {
                error!("轉換失敗：{}", e);
                Err(e)
            }
        }
    }
}
