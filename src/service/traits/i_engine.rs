use std::future::Future;

use crate::error::ConvertResult;
use crate::models::engine::{EngineResources, EventListener};

// 轉碼引擎接口，所有檔案都位於引擎私有的檔案系統命名空間
pub trait Engine: Send + Sync {
    /// 引擎是否已完成載入
    fn is_loaded(&self) -> bool;

    /// 一次性初始化，完成後才可進行其他操作
    /// # 參數
    /// - resources: 核心、模組與 worker 的資源位置
    fn load(&mut self, resources: &EngineResources) -> impl Future<Output = ConvertResult<()>> + Send;

    /// 寫入檔案，覆蓋同名項目
    fn write_file(&self, name: &str, data: Vec<u8>) -> impl Future<Output = ConvertResult<()>> + Send;

    /// 讀取檔案；不存在時返回 EngineIo(NotFound)
    fn read_file(&self, name: &str) -> impl Future<Output = ConvertResult<Vec<u8>>> + Send;

    /// 刪除檔案；不存在時返回 EngineIo(NotFound)
    fn delete_file(&self, name: &str) -> impl Future<Output = ConvertResult<()>> + Send;

    /// 執行一條指令，直到引擎回報完成
    /// # 參數
    /// - args: 等同於命令列的有序參數
    /// # 回傳
    /// - 失敗時返回帶有引擎訊息的 EngineExec
    fn exec(&self, args: &[String]) -> impl Future<Output = ConvertResult<()>> + Send;

    /// 註冊日誌與進度事件的監聽器
    fn on_event(&mut self, listener: EventListener);
}
