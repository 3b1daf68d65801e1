pub const GIF_MIME: &str = "image/gif";

/// 轉換完成的 GIF
#[derive(Clone, Debug)]
pub struct ConversionResult {
    pub data: Vec<u8>,
    pub mime: &'static str,
}

impl ConversionResult {
    pub fn gif(data: Vec<u8>) -> Self {
        ConversionResult { data, mime: GIF_MIME }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn size_mb(&self) -> f64 {
        self.data.len() as f64 / 1024.0 / 1024.0
    }
}
