use std::cmp::Ordering;
use std::io;

use indicatif::{ProgressBar, ProgressStyle};

use crate::models::engine::{EngineEvent, EventListener};

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    // 重複初始化時保留既有的 logger
    let _ = env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init();
    Ok(())
}

/// 以進度條呈現引擎事件：日誌行作為訊息，進度比例作為百分比
pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
}

impl ProgressManager {
    pub fn new(no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(100);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{bar:40}] {pos:>3}% {wide_msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        ProgressManager { pb, no_progress }
    }

    pub fn set_status(&self, message: &str) {
        if self.no_progress {
            return;
        }
        self.pb.set_message(message.to_string());
    }

    /// 產生可註冊到引擎的事件監聽器
    pub fn listener(&self) -> EventListener {
        let pb = self.pb.clone();
        let no_progress = self.no_progress;
        std::sync::Arc::new(move |event: &EngineEvent| {
            if no_progress {
                return;
            }
            match event {
                EngineEvent::Log(message) => pb.set_message(message.clone()),
                EngineEvent::Progress(ratio) => pb.set_position(progress_percent(*ratio)),
            }
        })
    }

    pub fn finish(&self, message: &str) {
        if self.no_progress {
            return;
        }
        self.pb.set_position(100);
        self.pb.finish_with_message(message.to_string());
    }
}

/// 將進度比例限制在 [0,1] 後換算為整數百分比
pub fn progress_percent(ratio: f64) -> u64 {
    if !ratio.is_finite() {
        return 0;
    }
    (ratio.clamp(0.0, 1.0) * 100.0).floor() as u64
}

pub fn format_file_size(size: usize) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

pub fn format_size_mb(size: u64) -> String {
    format!("{:.2} MB", size as f64 / 1024.0 / 1024.0)
}

/// 將 `[A-Za-z0-9._-]` 以外的字元替換為 `_`
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect()
}

/// 自然排序：數字片段依數值比較，其餘字元不分大小寫
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();
    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let na = take_digits(&mut ai);
                let nb = take_digits(&mut bi);
                let ta = na.trim_start_matches('0');
                let tb = nb.trim_start_matches('0');
                let ord = ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(ca), Some(cb)) => {
                let ord = ca.to_lowercase().cmp(cb.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                ai.next();
                bi.next();
            }
        }
    }
    a.cmp(b)
}

fn take_digits(iter: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = iter.next_if(|c| c.is_ascii_digit()) {
        digits.push(c);
    }
    digits
}
