// The hidden photo the pointer paints in.
// Decoding a large JPEG takes longer than a frame, so it happens on a helper
// thread; the frame loop polls for the result and renders nothing until then.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use image::RgbaImage;

use crate::error::{Error, Result};

/// Immutable decoded background, shared by reference with the compositor.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    pixels: Arc<RgbaImage>,
}

impl BackgroundImage {
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { pixels: Arc::new(image) }
    }

    /// Blocking load + decode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[inline]
    pub fn rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Where a background load currently stands.
#[derive(Debug)]
pub enum LoadState {
    Pending,
    Ready(BackgroundImage),
    Failed(Error),
}

/// Decodes a background on a helper thread; poll once per frame.
pub struct BackgroundLoader {
    path: PathBuf,
    rx: Option<Receiver<Result<BackgroundImage>>>,
}

impl BackgroundLoader {
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        let job_path = path.clone();
        thread::spawn(move || {
            // receiver may be gone if the host tore down first; nothing to do then
            let _ = tx.send(BackgroundImage::open(&job_path));
        });
        Self { path, rx: Some(rx) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blocking. Yields `Ready`/`Failed` exactly once, `Pending` before
    /// and after.
    pub fn poll(&mut self) -> LoadState {
        let Some(rx) = &self.rx else {
            return LoadState::Pending;
        };
        match rx.try_recv() {
            Ok(Ok(image)) => {
                self.rx = None;
                log::info!(
                    "background '{}' loaded ({}x{})",
                    self.path.display(),
                    image.width(),
                    image.height()
                );
                LoadState::Ready(image)
            }
            Ok(Err(err)) => {
                self.rx = None;
                log::warn!("{err}");
                LoadState::Failed(err)
            }
            Err(TryRecvError::Empty) => LoadState::Pending,
            Err(TryRecvError::Disconnected) => {
                self.rx = None;
                LoadState::Failed(Error::Loader(
                    "decode thread exited without a result".into(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn from_rgba_reports_dimensions() {
        let bg = BackgroundImage::from_rgba(RgbaImage::new(7, 3));
        assert_eq!((bg.width(), bg.height()), (7, 3));
    }

    #[test]
    fn missing_file_is_an_image_load_error() {
        let err = BackgroundImage::open("/definitely/not/here.jpg").unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }

    #[test]
    fn loader_reports_failure_once() {
        let mut loader = BackgroundLoader::spawn("/definitely/not/here.png");
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match loader.poll() {
                LoadState::Pending if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(5))
                }
                LoadState::Failed(_) => break,
                other => panic!("unexpected load state {other:?}"),
            }
        }
        assert!(matches!(loader.poll(), LoadState::Pending));
    }
}
