use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::catalog::naming::FilenamePolicy;

/// Application configuration loaded from environment variables.
/// Every variable has a default; a present but malformed value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base directory for relative product image paths.
    pub image_base_dir: PathBuf,
    /// Directory holding the company catalog backgrounds (`1.jpg` … `7.png`).
    pub brochure_dir: PathBuf,
    pub counter_file: PathBuf,
    pub counter_start: u64,
    pub filename_policy: FilenamePolicy,
    pub image_fetch_timeout_secs: u64,
    /// Default for the per-request `scale_to_fit` switch.
    pub scale_to_fit: bool,
    pub max_image_box: (f32, f32),
    /// Optional JSON file replacing the built-in placement slots.
    pub placements_file: Option<PathBuf>,
    pub verbose_render_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            rust_log: "info".to_string(),
            image_base_dir: PathBuf::from("."),
            brochure_dir: PathBuf::from("catalog_images"),
            counter_file: PathBuf::from("counter.txt"),
            counter_start: 1,
            filename_policy: FilenamePolicy::Counter,
            image_fetch_timeout_secs: 10,
            scale_to_fit: false,
            max_image_box: (300.0, 200.0),
            placements_file: None,
            verbose_render_log: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            image_base_dir: path_env("IMAGE_BASE_DIR").unwrap_or(defaults.image_base_dir),
            brochure_dir: path_env("BROCHURE_DIR").unwrap_or(defaults.brochure_dir),
            counter_file: path_env("COUNTER_FILE").unwrap_or(defaults.counter_file),
            counter_start: parse_env("COUNTER_START", defaults.counter_start)?,
            filename_policy: match std::env::var("FILENAME_POLICY") {
                Ok(raw) => raw
                    .parse::<FilenamePolicy>()
                    .map_err(|e| anyhow!(e))
                    .context("FILENAME_POLICY is invalid")?,
                Err(_) => defaults.filename_policy,
            },
            image_fetch_timeout_secs: parse_env(
                "IMAGE_FETCH_TIMEOUT_SECS",
                defaults.image_fetch_timeout_secs,
            )?,
            scale_to_fit: parse_env("SCALE_TO_FIT", defaults.scale_to_fit)?,
            max_image_box: match std::env::var("MAX_IMAGE_BOX") {
                Ok(raw) => parse_box(&raw).context("MAX_IMAGE_BOX must look like 300x200")?,
                Err(_) => defaults.max_image_box,
            },
            placements_file: path_env("PLACEMENTS_FILE"),
            verbose_render_log: parse_env("VERBOSE_RENDER_LOG", defaults.verbose_render_log)?,
        })
    }
}

fn path_env(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// Parses `WIDTHxHEIGHT` in points, both positive.
fn parse_box(raw: &str) -> Result<(f32, f32)> {
    let (w, h) = raw
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("missing 'x' separator in {raw:?}"))?;
    let w: f32 = w.trim().parse().context("invalid width")?;
    let h: f32 = h.trim().parse().context("invalid height")?;
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(anyhow!("box dimensions must be positive, got {w}x{h}"));
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_box() {
        assert_eq!(parse_box("300x200").unwrap(), (300.0, 200.0));
        assert_eq!(parse_box(" 120.5 X 80 ").unwrap(), (120.5, 80.0));
        assert!(parse_box("300").is_err());
        assert!(parse_box("0x200").is_err());
        assert!(parse_box("axb").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.filename_policy, FilenamePolicy::Counter);
        assert_eq!(config.counter_start, 1);
        assert_eq!(config.max_image_box, (300.0, 200.0));
        assert!(!config.scale_to_fit);
        assert!(config.placements_file.is_none());
    }
}
