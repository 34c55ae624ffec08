//! Timestamped PNG snapshots of the accumulated frame.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::error::{ExplorerError, Result};

/// `pic_<MM>-<DD>-<YY>_<HH>-<MM>-<SS>.png`
pub fn file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("pic_%m-%d-%y_%H-%M-%S.png").to_string()
}

pub fn path_in(dir: &Path) -> PathBuf {
    dir.join(file_name(&chrono::Local::now()))
}

/// Tightly packed RGBA pixels captured from the GPU.
#[derive(Debug, Clone)]
pub struct Capture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Capture {
    /// Drops the per-row padding wgpu requires for buffer copies.
    pub fn from_padded(width: u32, height: u32, padded_row: usize, data: &[u8]) -> Result<Self> {
        let row = width as usize * 4;
        if padded_row < row || data.len() < padded_row * height as usize {
            return Err(ExplorerError::FrameSize { width, height });
        }
        let mut pixels = Vec::with_capacity(row * height as usize);
        for chunk in data.chunks(padded_row).take(height as usize) {
            pixels.extend_from_slice(&chunk[..row]);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn save(self, path: &Path) -> Result<()> {
        let (width, height) = (self.width, self.height);
        let image = image::RgbaImage::from_raw(width, height, self.pixels)
            .ok_or(ExplorerError::FrameSize { width, height })?;
        image.save(path)?;
        tracing::info!("Saved screenshot to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_file_name_pattern() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(file_name(&at), "pic_03-07-24_14-05-09.png");
    }

    #[test]
    fn test_padding_is_stripped() {
        // 2x2 image, rows padded to 12 bytes
        let mut data = vec![0u8; 24];
        data[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        data[12..20].copy_from_slice(&[9, 10, 11, 12, 13, 14, 15, 16]);
        let capture = Capture::from_padded(2, 2, 12, &data).unwrap();
        assert_eq!(capture.pixels, (1..=16).collect::<Vec<u8>>());
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        assert!(matches!(
            Capture::from_padded(4, 4, 16, &[0u8; 32]),
            Err(ExplorerError::FrameSize { .. })
        ));
    }

    #[test]
    fn test_save_writes_png() {
        let dir = std::env::temp_dir().join(format!("explorer-shot-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pic_test.png");
        let capture = Capture {
            width: 3,
            height: 2,
            pixels: vec![255; 24],
        };
        capture.save(&path).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (3, 2));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
