use std::path::PathBuf;

/// Startup, settings and screenshot errors
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no graphics adapter supports this surface")]
    NoAdapter,
    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,
    #[error("failed to read back frame: {0}")]
    Readback(#[from] wgpu::BufferAsyncError),
    #[error("frame readback never completed")]
    ReadbackLost,
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("captured frame does not match its {width}x{height} size")]
    FrameSize { width: u32, height: u32 },
    #[error("failed to read settings from {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
