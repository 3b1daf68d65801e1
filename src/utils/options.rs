pub const DEFAULT_QUALITY: u8 = 15;
pub const DEFAULT_SEQUENCE_FRAME_RATE: u32 = 15;
pub const MIN_FRAME_RATE: f64 = 1.0;
pub const MAX_FRAME_RATE: f64 = 60.0;
pub const MIN_QUALITY: f64 = 1.0;
pub const MAX_QUALITY: f64 = 31.0;

/// 正規化後的輸出選項；寬高未設定代表自動
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<u32>,
    pub quality: u8,
    pub loop_count: u32,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            width: None,
            height: None,
            frame_rate: None,
            quality: DEFAULT_QUALITY,
            loop_count: 0,
        }
    }
}

impl ConversionOptions {
    /// PNG 序列沒有容器提供幀率，未設定時使用 15
    pub fn sequence_frame_rate(&self) -> u32 {
        self.frame_rate.unwrap_or(DEFAULT_SEQUENCE_FRAME_RATE)
    }
}

/// 使用者輸入的原始文字欄位
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawOptions {
    pub width: String,
    pub height: String,
    pub frame_rate: String,
    pub quality: String,
    pub loop_count: String,
}

impl Default for RawOptions {
    fn default() -> Self {
        RawOptions {
            width: String::new(),
            height: String::new(),
            frame_rate: String::new(),
            quality: DEFAULT_QUALITY.to_string(),
            loop_count: "0".to_string(),
        }
    }
}

impl RawOptions {
    pub fn normalize(&self) -> ConversionOptions {
        normalize(
            parse_number(&self.width),
            parse_number(&self.height),
            parse_number(&self.frame_rate),
            parse_number(&self.quality),
            parse_number(&self.loop_count),
        )
    }
}

/// 文字轉數值：空白字串為 0，無法解析時為 NaN
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn positive_dimension(value: f64) -> Option<u32> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let rounded = round_half_up(value);
    if rounded < 1.0 {
        return None;
    }
    Some(rounded.min(u32::MAX as f64) as u32)
}

pub fn normalize(width: f64, height: f64, frame_rate: f64, quality: f64, loop_count: f64) -> ConversionOptions {
    let frame_rate = if frame_rate.is_finite() && frame_rate > 0.0 {
        Some(round_half_up(frame_rate).clamp(MIN_FRAME_RATE, MAX_FRAME_RATE) as u32)
    } else {
        None
    };

    let quality = if quality.is_finite() { quality } else { DEFAULT_QUALITY as f64 };
    let quality = round_half_up(quality).clamp(MIN_QUALITY, MAX_QUALITY) as u8;

    let loop_count = if !loop_count.is_finite() || loop_count < 0.0 {
        0
    } else {
        round_half_up(loop_count).min(u32::MAX as f64) as u32
    };

    ConversionOptions {
        width: positive_dimension(width),
        height: positive_dimension(height),
        frame_rate,
        quality,
        loop_count,
    }
}
