use log::{debug, info};

use crate::error::{ConvertError, ConvertResult};
use crate::facade::conversion_facade::ConversionFacade;
use crate::models::conversion::ConversionResult;
use crate::models::engine::{EngineResources, EventListener};
use crate::models::file::{FileSelection, SourceFile};
use crate::service::traits::i_engine::Engine;
use crate::utils::classify::{classify, ConversionStrategy};
use crate::utils::options::RawOptions;

#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Waiting,
    Downloading,
    Preparing,
    Unsupported,
    Complete,
    Failed(String),
}

impl Status {
    pub fn text(&self) -> String {
        match self {
            Status::Waiting => "等待來源檔案...".to_string(),
            Status::Downloading => "正在載入 FFmpeg 引擎...".to_string(),
            Status::Preparing => "正在準備轉換...".to_string(),
            Status::Unsupported => "不支援的檔案選擇。請選擇一個 MP4/MOV/AVI 影片或多個 PNG 幀。".to_string(),
            Status::Complete => "轉換完成！".to_string(),
            Status::Failed(error) => format!("轉換失敗：{}", error),
        }
    }
}

/// 一個使用者工作階段的狀態：引擎、目前的檔案選擇、狀態與最近一次的結果。
///
/// `convert` 需要 `&mut self`，同一個工作階段無法同時進行兩次轉換。
pub struct ConversionSession<E: Engine> {
    engine: E,
    resources: EngineResources,
    listener: Option<EventListener>,
    selection: FileSelection,
    status: Status,
    last_result: Option<ConversionResult>,
}

impl<E: Engine> ConversionSession<E> {
    pub fn new(engine: E, resources: EngineResources) -> Self {
        ConversionSession {
            engine,
            resources,
            listener: None,
            selection: FileSelection::default(),
            status: Status::Waiting,
            last_result: None,
        }
    }

    /// 引擎載入後註冊的事件監聽器
    pub fn with_listener(mut self, listener: EventListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_ready(&self) -> bool {
        self.engine.is_loaded()
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn last_result(&self) -> Option<&ConversionResult> {
        self.last_result.as_ref()
    }

    pub fn select(&mut self, files: Vec<SourceFile>) {
        self.selection = FileSelection::new(files);
        self.last_result = None;
        self.status = Status::Waiting;
        debug!("檔案選擇已更新：{}", self.selection.describe());
    }

    pub fn strategy(&self) -> ConversionStrategy {
        classify(self.selection.files())
    }

    pub fn describe_selection(&self) -> String {
        self.selection.describe()
    }

    pub async fn ensure_engine_loaded(&mut self) -> ConvertResult<()> {
        if self.engine.is_loaded() {
            return Ok(());
        }
        self.status = Status::Downloading;
        self.engine.load(&self.resources).await?;
        if let Some(listener) = self.listener.clone() {
            self.engine.on_event(listener);
        }
        Ok(())
    }

    pub async fn convert(&mut self, raw: &RawOptions) -> ConvertResult<&ConversionResult> {
        let strategy = self.strategy();
        if !strategy.is_convertible() {
            if strategy == ConversionStrategy::Unsupported {
                self.status = Status::Unsupported;
            }
            return Err(ConvertError::UnsupportedSelection(strategy));
        }

        self.status = Status::Preparing;
        if let Err(e) = self.ensure_engine_loaded().await {
            self.status = Status::Failed(e.to_string());
            return Err(e);
        }

        let options = raw.normalize();
        info!("轉換選項：{:?}，方式：{:?}", options, strategy);
        let outcome = ConversionFacade::new(&self.engine)
            .convert(&self.selection, &options)
            .await;

        match outcome {
            Ok(result) => {
                if self.last_result.take().is_some() {
                    debug!("釋放上一次的轉換結果");
                }
                self.status = Status::Complete;
                let result: &ConversionResult = self.last_result.insert(result);
                Ok(result)
            }
            Err(e) => {
                self.status = Status::Failed(e.to_string());
                Err(e)
            }
        }
    }
}
