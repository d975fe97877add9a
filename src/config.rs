use std::path::PathBuf;

/// Environment variable that overrides where native exports are written
pub const EXPORT_DIR_ENV: &str = "STICKER_STUDIO_EXPORT_DIR";

/// How a finished capture is handed to the export sink
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDispatch {
    /// Run the sink on a worker thread and collect the result on a later frame
    Background,
    /// Run the sink in the frame that pressed save
    Inline,
}

impl Default for ExportDispatch {
    fn default() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Inline
        } else {
            Self::Background
        }
    }
}

/// Tunables for the composition screen. Persisted with the app state.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ScreenConfig {
    /// Size of the composed frame in points
    pub frame_size: [u32; 2],
    /// Edge length of the sticker in points
    pub sticker_size: u32,
    /// Top-left of the sticker relative to the frame
    pub sticker_offset: [i64; 2],
    /// Pixel height of exported captures
    pub capture_height: u32,
    /// 0..=1, forwarded to lossy encoders
    pub capture_quality: f32,
    /// Offer the in-app crop step when picking
    pub pick_allows_editing: bool,
    /// 0..=1, scale applied to picked images
    pub pick_quality: f32,
    /// Subfolder of the pictures directory that receives exports
    pub album: String,
    /// Overrides the pictures directory. Resolved at startup, never persisted.
    #[serde(skip)]
    pub export_dir: Option<PathBuf>,
    pub dispatch: ExportDispatch,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            frame_size: [320, 440],
            sticker_size: 40,
            sticker_offset: [140, 90],
            capture_height: 440,
            capture_quality: 1.0,
            pick_allows_editing: true,
            pick_quality: 1.0,
            album: "Sticker Studio".to_owned(),
            export_dir: None,
            dispatch: ExportDispatch::default(),
        }
    }
}

impl ScreenConfig {
    /// Width over height of the composed frame
    pub fn frame_aspect(&self) -> f32 {
        let [w, h] = self.frame_size;
        if h == 0 { 1.0 } else { w as f32 / h as f32 }
    }

    /// Applies overrides from the process environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(EXPORT_DIR_ENV) {
            log::info!("Export directory overridden by {}: {:?}", EXPORT_DIR_ENV, dir);
            self.export_dir = Some(PathBuf::from(dir));
        }
        self
    }

    #[cfg(target_arch = "wasm32")]
    pub fn with_env_overrides(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_export_frame() {
        let config = ScreenConfig::default();
        assert_eq!(config.frame_size, [320, 440]);
        assert_eq!(config.capture_height, 440);
        assert_eq!(config.capture_quality, 1.0);
        assert!((config.frame_aspect() - 320.0 / 440.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_old_state_fills_missing_fields() {
        let config: ScreenConfig = serde_json::from_str(r#"{ "album": "Holiday" }"#).unwrap();
        assert_eq!(config.album, "Holiday");
        assert_eq!(config.sticker_size, 40);
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn test_export_dir_is_not_restored() {
        let config = ScreenConfig {
            export_dir: Some(PathBuf::from("/tmp/one-off")),
            album: "Holiday".to_owned(),
            ..Default::default()
        };

        let stored = serde_json::to_string(&config).unwrap();
        let restored: ScreenConfig = serde_json::from_str(&stored).unwrap();

        assert!(!stored.contains("one-off"));
        assert_eq!(restored.album, "Holiday");
        assert!(restored.export_dir.is_none());
    }

    #[test]
    fn test_zero_height_frame_has_unit_aspect() {
        let config = ScreenConfig {
            frame_size: [100, 0],
            ..Default::default()
        };
        assert_eq!(config.frame_aspect(), 1.0);
    }
}
