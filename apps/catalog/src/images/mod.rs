//! Image sources for catalog pages.
//!
//! An image path is either an absolute `http(s)://` URL, fetched with a bounded
//! timeout, or a filesystem path resolved against the configured base directory.
//! Every failure is returned as an `ImageError` so callers can log it and carry on
//! with the rest of the page.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error("image path escapes the image directory: {0}")]
    OutsideBaseDir(String),

    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("fetch of {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("decode task failed: {0}")]
    Task(String),
}

/// True for absolute `http://` and `https://` URLs (scheme is case-insensitive).
pub fn is_remote(path: &str) -> bool {
    let lower = path.trim_start().get(..8).unwrap_or("").to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// ────────────────────────────────────────────────────────────────────────────
// Decoded raster
// ────────────────────────────────────────────────────────────────────────────

/// 8-bit RGB pixels plus an optional separate alpha plane, ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl RasterImage {
    /// Decodes PNG or JPEG bytes. Alpha is kept only if the source had it.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        let (width, height) = (decoded.width(), decoded.height());

        if decoded.color().has_alpha() {
            let rgba = decoded.to_rgba8();
            let pixels = (width * height) as usize;
            let mut rgb = Vec::with_capacity(pixels * 3);
            let mut alpha = Vec::with_capacity(pixels);
            for pixel in rgba.pixels() {
                rgb.extend_from_slice(&pixel.0[..3]);
                alpha.push(pixel.0[3]);
            }
            Ok(Self {
                width,
                height,
                rgb,
                alpha: Some(alpha),
            })
        } else {
            Ok(Self {
                width,
                height,
                rgb: decoded.to_rgb8().into_raw(),
                alpha: None,
            })
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Loader
// ────────────────────────────────────────────────────────────────────────────

/// Fetches and decodes images. Cheap to clone; the HTTP client is shared.
#[derive(Clone)]
pub struct ImageLoader {
    client: Client,
    base_dir: PathBuf,
}

impl ImageLoader {
    pub fn new(base_dir: impl Into<PathBuf>, fetch_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(fetch_timeout).build()?,
            base_dir: base_dir.into(),
        })
    }

    /// Relative paths are joined onto the base directory. Absolute paths are kept
    /// only when they already lie inside it, and `..` segments are never accepted.
    pub fn resolve_local(&self, path: &str) -> Result<PathBuf, ImageError> {
        let candidate = Path::new(path);
        let escapes = candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir));

        if escapes {
            return Err(ImageError::OutsideBaseDir(path.to_string()));
        }
        if candidate.is_absolute() {
            return if candidate.starts_with(&self.base_dir) {
                Ok(candidate.to_path_buf())
            } else {
                Err(ImageError::OutsideBaseDir(path.to_string()))
            };
        }
        if candidate.has_root() {
            return Err(ImageError::OutsideBaseDir(path.to_string()));
        }
        Ok(self.base_dir.join(candidate))
    }

    /// Raw bytes from the network or the filesystem. A non-success HTTP status is
    /// reported as `ImageError::Status`.
    pub async fn fetch_bytes(&self, path: &str) -> Result<Bytes, ImageError> {
        if is_remote(path) {
            let url = path.trim();
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ImageError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            let body = response.bytes().await?;
            debug!("Fetched {} bytes from {url}", body.len());
            return Ok(body);
        }

        read_file(&self.resolve_local(path)?).await
    }

    /// Fetches and decodes. Decoding runs on the blocking pool.
    pub async fn load(&self, path: &str) -> Result<RasterImage, ImageError> {
        decode_blocking(self.fetch_bytes(path).await?).await
    }

    /// Reads and decodes exactly `path`, bypassing the base directory.
    pub async fn load_file(&self, path: &Path) -> Result<RasterImage, ImageError> {
        decode_blocking(read_file(path).await?).await
    }
}

async fn read_file(path: &Path) -> Result<Bytes, ImageError> {
    match tokio::fs::read(path).await {
        Ok(data) => Ok(Bytes::from(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ImageError::NotFound(path.display().to_string()))
        }
        Err(e) => Err(ImageError::Io(e)),
    }
}

async fn decode_blocking(data: Bytes) -> Result<RasterImage, ImageError> {
    tokio::task::spawn_blocking(move || RasterImage::decode(&data))
        .await
        .map_err(|e| ImageError::Task(e.to_string()))?
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use axum::{http::StatusCode, routing::get, Router};
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encodes a small solid-colour PNG.
    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn loader(base: &Path) -> ImageLoader {
        ImageLoader::new(base, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/a.png"));
        assert!(is_remote("HTTP://example.com/a.png"));
        assert!(!is_remote("images/a.png"));
        assert!(!is_remote("/srv/http/a.png"));
        assert!(!is_remote("ftp://example.com/a.png"));
    }

    #[test]
    fn test_decode_rgb_png() {
        let raster = RasterImage::decode(&png_bytes(4, 2)).unwrap();
        assert_eq!((raster.width, raster.height), (4, 2));
        assert_eq!(raster.rgb.len(), 4 * 2 * 3);
        assert!(raster.alpha.is_none());
        assert_eq!(&raster.rgb[..3], &[200, 30, 30]);
    }

    #[test]
    fn test_decode_rgba_png_splits_alpha() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 128]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        let raster = RasterImage::decode(&out.into_inner()).unwrap();
        assert_eq!(raster.rgb.len(), 27);
        assert_eq!(raster.alpha.as_deref(), Some(&[128u8; 9][..]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            RasterImage::decode(b"definitely not an image"),
            Err(ImageError::Decode(_))
        ));
    }

    #[test]
    fn test_resolve_local_joins_relative_paths() {
        let loader = loader(Path::new("/srv/catalog"));
        assert_eq!(
            loader.resolve_local("su2.jpg").unwrap(),
            PathBuf::from("/srv/catalog/su2.jpg")
        );
        assert_eq!(
            loader.resolve_local("uploads/raw29.jpg").unwrap(),
            PathBuf::from("/srv/catalog/uploads/raw29.jpg")
        );
        assert_eq!(
            loader.resolve_local("/srv/catalog/su1.jpg").unwrap(),
            PathBuf::from("/srv/catalog/su1.jpg")
        );
    }

    #[test]
    fn test_resolve_local_rejects_paths_outside_base_dir() {
        let loader = loader(Path::new("/srv/catalog"));
        for path in [
            "/etc/hostname",
            "/srv/catalog-other/su2.jpg",
            "../secrets/su2.jpg",
            "uploads/../../su2.jpg",
            "/srv/catalog/../su2.jpg",
        ] {
            assert!(
                matches!(loader.resolve_local(path), Err(ImageError::OutsideBaseDir(_))),
                "{path} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_load_refuses_file_outside_base_dir() {
        let root = tempfile::tempdir().unwrap();
        let images = root.path().join("images");
        std::fs::create_dir(&images).unwrap();
        let outside = root.path().join("private.png");
        std::fs::write(&outside, png_bytes(2, 2)).unwrap();

        let loader = loader(&images);
        let err = loader.load("../private.png").await.unwrap_err();
        assert!(matches!(err, ImageError::OutsideBaseDir(_)), "{err}");
        let err = loader.load(outside.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, ImageError::OutsideBaseDir(_)), "{err}");
    }

    #[tokio::test]
    async fn test_load_relative_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("raw29.png"), png_bytes(8, 4)).unwrap();
        let raster = loader(dir.path()).load("raw29.png").await.unwrap();
        assert_eq!((raster.width, raster.height), (8, 4));
    }

    #[tokio::test]
    async fn test_load_file_ignores_base_dir() {
        let images = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let path = elsewhere.path().join("1.png");
        std::fs::write(&path, png_bytes(2, 3)).unwrap();
        let raster = loader(images.path()).load_file(&path).await.unwrap();
        assert_eq!(raster.height, 3);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = loader(dir.path()).load("nope.png").await.unwrap_err();
        assert!(matches!(err, ImageError::NotFound(_)), "{err}");
    }

    #[tokio::test]
    async fn test_fetch_success_over_http() {
        let png = png_bytes(5, 5);
        let base = serve(Router::new().route(
            "/su2.png",
            get(move || {
                let png = png.clone();
                async move { png }
            }),
        ))
        .await;
        let dir = tempfile::tempdir().unwrap();
        let raster = loader(dir.path())
            .load(&format!("{base}/su2.png"))
            .await
            .unwrap();
        assert_eq!(raster.width, 5);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let base = serve(Router::new().route(
            "/gone.png",
            get(|| async { StatusCode::NOT_FOUND }),
        ))
        .await;
        let dir = tempfile::tempdir().unwrap();
        let err = loader(dir.path())
            .fetch_bytes(&format!("{base}/gone.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::Status { status: 404, .. }), "{err}");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = loader(dir.path())
            .fetch_bytes("http://127.0.0.1:1/unreachable.png")
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::Fetch(_)), "{err}");
    }
}
