use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use log::{debug, info};
use regex::Regex;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::error::{ConvertError, ConvertResult, EngineIoKind};
use crate::models::engine::{EngineEvent, EngineResources, EventListener};
use crate::service::traits::i_engine::Engine;

/// 以系統 ffmpeg 執行檔實作的引擎，私有命名空間為一個暫存目錄
pub struct FfmpegEngine {
    program: Option<PathBuf>,
    workspace: Option<TempDir>,
    parser: Option<ProgressParser>,
    listeners: Vec<EventListener>,
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegEngine {
    pub fn new() -> Self {
        FfmpegEngine {
            program: None,
            workspace: None,
            parser: None,
            listeners: Vec::new(),
        }
    }

    /// 私有命名空間所在的目錄
    pub fn workspace_dir(&self) -> Option<&Path> {
        self.workspace.as_ref().map(|d| d.path())
    }

    fn entry_path(&self, name: &str) -> ConvertResult<PathBuf> {
        let dir = self
            .workspace_dir()
            .ok_or_else(|| ConvertError::engine_io(EngineIoKind::NotLoaded, "ffmpeg 引擎尚未載入"))?;
        validate_name(name)?;
        Ok(dir.join(name))
    }

    fn emit(&self, event: EngineEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    fn handle_line(&self, raw: &[u8], duration: &mut Option<f64>, last_line: &mut String) {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.emit(EngineEvent::Log(line.to_string()));
        if let Some(parser) = &self.parser {
            if duration.is_none() {
                *duration = parser.duration(line);
            }
            if let (Some(total), Some(current)) = (*duration, parser.time(line)) {
                if total > 0.0 {
                    self.emit(EngineEvent::Progress((current / total).clamp(0.0, 1.0)));
                }
            }
        }
        *last_line = line.to_string();
    }
}

pub fn validate_name(name: &str) -> ConvertResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(ConvertError::engine_io(
            EngineIoKind::InvalidName,
            format!("無效的工作區檔名：{}", name),
        ));
    }
    Ok(())
}

fn map_io(name: &str, err: io::Error) -> ConvertError {
    if err.kind() == io::ErrorKind::NotFound {
        ConvertError::engine_io(EngineIoKind::NotFound, format!("ENOENT：找不到 {}", name))
    } else {
        ConvertError::engine_io(EngineIoKind::Other, format!("{}：{}", name, err))
    }
}

/// 解析 ffmpeg 輸出中的 `Duration:` 與 `time=`
pub struct ProgressParser {
    duration_re: Regex,
    time_re: Regex,
}

impl ProgressParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(ProgressParser {
            duration_re: Regex::new(r"Duration: (\d+):(\d{2}):(\d{2}(?:\.\d+)?)")?,
            time_re: Regex::new(r"time=(\d+):(\d{2}):(\d{2}(?:\.\d+)?)")?,
        })
    }

    pub fn duration(&self, line: &str) -> Option<f64> {
        parse_timestamp(&self.duration_re, line)
    }

    pub fn time(&self, line: &str) -> Option<f64> {
        parse_timestamp(&self.time_re, line)
    }
}

fn parse_timestamp(re: &Regex, line: &str) -> Option<f64> {
    let cap = re.captures(line)?;
    let h: f64 = cap.get(1)?.as_str().parse().ok()?;
    let m: f64 = cap.get(2)?.as_str().parse().ok()?;
    let s: f64 = cap.get(3)?.as_str().parse().ok()?;
    Some(h * 3600.0 + m * 60.0 + s)
}

impl Engine for FfmpegEngine {
    fn is_loaded(&self) -> bool {
        self.workspace.is_some()
    }

    async fn load(&mut self, resources: &EngineResources) -> ConvertResult<()> {
        if self.is_loaded() {
            return Ok(());
        }
        let program = PathBuf::from(&resources.core);
        let status = Command::new(&program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| ConvertError::engine_load(format!("無法執行 {}（是否已安裝並在 PATH 中？）：{}", program.display(), e)))?;
        if !status.success() {
            return Err(ConvertError::engine_load(format!(
                "{} -version 結束狀態 {}",
                program.display(),
                status
            )));
        }

        let parser = ProgressParser::new().map_err(|e| ConvertError::engine_load(e.to_string()))?;
        let workspace = tempfile::Builder::new()
            .prefix("anytogif-")
            .tempdir()
            .map_err(|e| ConvertError::engine_load(format!("無法建立工作區：{}", e)))?;

        info!("ffmpeg 引擎已載入：{}，工作區：{}", program.display(), workspace.path().display());
        self.program = Some(program);
        self.parser = Some(parser);
        self.workspace = Some(workspace);
        Ok(())
    }

    async fn write_file(&self, name: &str, data: Vec<u8>) -> ConvertResult<()> {
        let path = self.entry_path(name)?;
        tokio::fs::write(&path, data).await.map_err(|e| map_io(name, e))
    }

    async fn read_file(&self, name: &str) -> ConvertResult<Vec<u8>> {
        let path = self.entry_path(name)?;
        tokio::fs::read(&path).await.map_err(|e| map_io(name, e))
    }

    async fn delete_file(&self, name: &str) -> ConvertResult<()> {
        let path = self.entry_path(name)?;
        tokio::fs::remove_file(&path).await.map_err(|e| map_io(name, e))
    }

    async fn exec(&self, args: &[String]) -> ConvertResult<()> {
        let (Some(program), Some(dir)) = (self.program.as_ref(), self.workspace_dir()) else {
            return Err(ConvertError::engine_exec("ffmpeg 引擎尚未載入"));
        };

        let mut child = Command::new(program)
            .arg("-nostdin")
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ConvertError::engine_exec(format!("無法啟動 ffmpeg：{}", e)))?;

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ConvertError::engine_exec("無法開啟 ffmpeg 的 stderr"))?;

        // 進度行以 \r 結尾，一般日誌以 \n 結尾
        let mut duration = None;
        let mut last_line = String::new();
        let mut pending: Vec<u8> = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stderr
                .read(&mut buf)
                .await
                .map_err(|e| ConvertError::engine_exec(format!("讀取 ffmpeg 輸出失敗：{}", e)))?;
            if n == 0 {
                break;
            }
            pending.extend_from_slice(&buf[..n]);
            while let Some(pos) = pending.iter().position(|b| *b == b'\n' || *b == b'\r') {
                let line: Vec<u8> = pending.drain(..=pos).collect();
                self.handle_line(&line[..pos], &mut duration, &mut last_line);
            }
        }
        if !pending.is_empty() {
            self.handle_line(&pending, &mut duration, &mut last_line);
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ConvertError::engine_exec(format!("等待 ffmpeg 結束失敗：{}", e)))?;
        debug!("ffmpeg 結束：{}", status);

        if status.success() {
            self.emit(EngineEvent::Progress(1.0));
            Ok(())
        } else if last_line.is_empty() {
            Err(ConvertError::engine_exec(format!("ffmpeg 結束狀態 {}", status)))
        } else {
            Err(ConvertError::engine_exec(last_line))
        }
    }

    fn on_event(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }
}
