use futures::future::join_all;
use log::{debug, warn};

use crate::error::ConvertResult;
use crate::service::traits::i_engine::Engine;

/// 引擎私有檔案系統的存取端。所有轉換共用同一個命名空間，沒有隔離。
pub struct WorkspaceClient<'a, E: Engine> {
    engine: &'a E,
}

impl<'a, E: Engine> WorkspaceClient<'a, E> {
    pub fn new(engine: &'a E) -> Self {
        WorkspaceClient { engine }
    }

    pub async fn write(&self, name: &str, data: Vec<u8>) -> ConvertResult<()> {
        debug!("寫入工作區：{}（{} 位元組）", name, data.len());
        self.engine.write_file(name, data).await
    }

    pub async fn read(&self, name: &str) -> ConvertResult<Vec<u8>> {
        let data = self.engine.read_file(name).await?;
        debug!("讀取工作區：{}（{} 位元組）", name, data.len());
        Ok(data)
    }

    pub async fn execute(&self, args: &[String]) -> ConvertResult<()> {
        debug!("執行引擎指令：{:?}", args);
        self.engine.exec(args).await
    }

    /// 刪除項目；不存在視為成功，其他失敗僅記錄警告
    pub async fn delete(&self, name: &str) {
        match self.engine.delete_file(name).await {
            Ok(()) => debug!("已刪除工作區項目：{}", name),
            Err(e) if e.is_not_found() => {}
            Err(e) => warn!("刪除工作區項目 {} 失敗：{}", name, e),
        }
    }

    /// 同時刪除多個項目，各自獨立
    pub async fn delete_all(&self, names: &[String]) {
        join_all(names.iter().map(|name| self.delete(name))).await;
    }
}
