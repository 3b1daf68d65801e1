use std::sync::Arc;

/// 引擎載入所需的三個資源位置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineResources {
    pub core: String,
    pub module: String,
    pub worker: String,
}

impl EngineResources {
    /// 由基底位置推導核心腳本、二進位模組與 worker 腳本
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        EngineResources {
            core: format!("{}/ffmpeg-core.js", base),
            module: format!("{}/ffmpeg-core.wasm", base),
            worker: format!("{}/worker.js", base),
        }
    }

    /// 原生引擎：核心即為可執行檔，不需要模組與 worker
    pub fn native(program: impl Into<String>) -> Self {
        EngineResources {
            core: program.into(),
            module: String::new(),
            worker: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    Log(String),
    Progress(f64),
}

pub type EventListener = Arc<dyn Fn(&EngineEvent) + Send + Sync>;
