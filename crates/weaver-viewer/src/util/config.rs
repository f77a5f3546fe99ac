use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// URL (`http(s)://`, `file://`) or filesystem path of the galaxy document.
    pub data_source: String,
    pub fetch_timeout_secs: u64,
    pub damping_factor: f32,
    pub auto_rotate_speed: f32,
    pub zoom_speed: f32,
    pub standoff: f32,
    pub point_radius: f32,
    pub pick_radius_px: f32,
    pub search_display_limit: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_source: "data/space_data.json".to_string(),
            fetch_timeout_secs: 15,
            damping_factor: 0.05,
            auto_rotate_speed: 0.3,
            zoom_speed: 0.8,
            standoff: 5.0,
            point_radius: 0.04,
            pick_radius_px: 10.0,
            search_display_limit: 10,
        }
    }
}

impl ViewerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "weaver")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    if !path.exists() {
        return ViewerConfig::default();
    }
    match read_config(path) {
        Ok(cfg) => {
            tracing::info!(path = %path.display(), "loaded viewer config");
            cfg
        }
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "falling back to default viewer config");
            ViewerConfig::default()
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<ViewerConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read viewer config {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse viewer config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().expect("tempdir");
        let loaded = load_or_default_from_path(&dir.path().join("viewer.toml"));
        assert_eq!(loaded, ViewerConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(
            &path,
            r#"
data_source = "https://example.org/space_data.json"
standoff = 8.0
"#,
        )
        .expect("write config");

        let loaded = load_or_default_from_path(&path);
        assert_eq!(loaded.data_source, "https://example.org/space_data.json");
        assert_eq!(loaded.standoff, 8.0);
        assert_eq!(loaded.search_display_limit, 10);
        assert_eq!(loaded.damping_factor, 0.05);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "standoff = \"far\"\n").expect("write config");

        assert_eq!(load_or_default_from_path(&path), ViewerConfig::default());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = ViewerConfig {
            fetch_timeout_secs: 3,
            ..ViewerConfig::default()
        };
        let encoded = toml::to_string_pretty(&cfg).expect("serialize");
        let decoded: ViewerConfig = toml::from_str(&encoded).expect("deserialize");
        assert_eq!(cfg, decoded);
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let cfg = ViewerConfig {
            fetch_timeout_secs: 0,
            ..ViewerConfig::default()
        };
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(1));
    }
}
