use std::io;

use crate::utils::classify::ConversionStrategy;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// 引擎檔案操作失敗的類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineIoKind {
    NotLoaded,
    NotFound,
    InvalidName,
    Other,
}

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("{message}")]
    EngineIo { kind: EngineIoKind, message: String },

    #[error("{0}")]
    EngineExec(String),

    #[error("引擎載入失敗：{0}")]
    EngineLoad(String),

    #[error("不支援的檔案選擇（{0:?}）。請選擇一個 MP4/MOV/AVI 影片或多個 PNG 幀")]
    UnsupportedSelection(ConversionStrategy),

    #[error("設定錯誤：{0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ConvertError {
    pub fn engine_io(kind: EngineIoKind, message: impl Into<String>) -> Self {
        Self::EngineIo {
            kind,
            message: message.into(),
        }
    }

    pub fn engine_exec(message: impl Into<String>) -> Self {
        Self::EngineExec(message.into())
    }

    pub fn engine_load(message: impl Into<String>) -> Self {
        Self::EngineLoad(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EngineIo {
                kind: EngineIoKind::NotFound,
                ..
            }
        )
    }
}

impl From<ConvertError> for io::Error {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::Io(e) => e,
            ConvertError::Config(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            other => io::Error::other(other.to_string()),
        }
    }
}
