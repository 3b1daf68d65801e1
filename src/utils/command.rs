//! 引擎指令的組裝：濾鏡表達式與有序的參數向量。

pub const PALETTEGEN: &str = "palettegen=stats_mode=diff";
pub const PALETTEUSE: &str = "paletteuse=dither=floyd_steinberg";

/// 由幀率與尺寸產生濾鏡鏈，依 `[fps, scale]` 順序以逗號連接
pub fn build_filters(frame_rate: Option<u32>, width: Option<u32>, height: Option<u32>) -> String {
    let mut filters = Vec::new();
    if let Some(fps) = frame_rate {
        filters.push(format!("fps={}", fps));
    }
    if width.is_some() || height.is_some() {
        filters.push(format!(
            "scale={}:{}:flags=lanczos",
            scale_dimension(width),
            scale_dimension(height)
        ));
    }
    filters.join(",")
}

fn scale_dimension(value: Option<u32>) -> String {
    value.map_or_else(|| "-1".to_string(), |v| v.to_string())
}

pub fn palette_filters(filters: &str) -> String {
    if filters.is_empty() {
        PALETTEGEN.to_string()
    } else {
        format!("{},{}", filters, PALETTEGEN)
    }
}

pub fn paletteuse_filters(filters: &str) -> String {
    if filters.is_empty() {
        PALETTEUSE.to_string()
    } else {
        format!("{} [x]; [x][1:v] {}", filters, PALETTEUSE)
    }
}

/// 主要輸入：單一檔案，或以固定檔名樣式排列的幀序列
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandSource {
    File(String),
    Sequence { pattern: String, frame_rate: u32 },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FfmpegCommand {
    args: Vec<String>,
}

impl FfmpegCommand {
    pub fn new() -> Self {
        FfmpegCommand::default()
    }

    fn push(mut self, flag: &str, value: impl Into<String>) -> Self {
        self.args.push(flag.to_string());
        self.args.push(value.into());
        self
    }

    pub fn framerate(self, fps: u32) -> Self {
        self.push("-framerate", fps.to_string())
    }

    pub fn input(self, name: impl Into<String>) -> Self {
        self.push("-i", name)
    }

    pub fn source(self, source: &CommandSource) -> Self {
        match source {
            CommandSource::File(name) => self.input(name.as_str()),
            CommandSource::Sequence { pattern, frame_rate } => {
                self.framerate(*frame_rate).input(pattern.as_str())
            }
        }
    }

    pub fn video_filter(self, expr: impl Into<String>) -> Self {
        self.push("-vf", expr)
    }

    pub fn filter_complex(self, expr: impl Into<String>) -> Self {
        self.push("-lavfi", expr)
    }

    pub fn quality(self, quality: u8) -> Self {
        self.push("-q:v", quality.to_string())
    }

    pub fn loop_count(self, count: u32) -> Self {
        self.push("-loop", count.to_string())
    }

    pub fn overwrite_output(self, name: impl Into<String>) -> Self {
        self.push("-y", name)
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

/// 調色盤產生階段
pub fn palette_command(source: &CommandSource, filters: &str, palette: &str) -> FfmpegCommand {
    FfmpegCommand::new()
        .source(source)
        .video_filter(palette_filters(filters))
        .overwrite_output(palette)
}

/// 套用調色盤並輸出 GIF 的階段
pub fn encode_command(
    source: &CommandSource,
    filters: &str,
    palette: &str,
    quality: u8,
    loop_count: u32,
    output: &str,
) -> FfmpegCommand {
    FfmpegCommand::new()
        .source(source)
        .input(palette)
        .filter_complex(paletteuse_filters(filters))
        .quality(quality)
        .loop_count(loop_count)
        .overwrite_output(output)
}
