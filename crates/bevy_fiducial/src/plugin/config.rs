use bevy::prelude::Resource;

/// Configuration object used to enable/disable individual subsystems of the plugin.
#[derive(Debug, Clone, Resource)]
pub struct FiducialPluginConfig {
    pub library_path: Option<String>,
    pub auto_backend: bool,
    pub presenter: bool,
    pub audio: bool,
    pub diagnostics: bool,
}

impl Default for FiducialPluginConfig {
    fn default() -> Self {
        Self {
            library_path: None,
            auto_backend: true,
            presenter: true,
            audio: true,
            diagnostics: true,
        }
    }
}

impl FiducialPluginConfig {
    pub fn library_path(mut self, path: impl Into<String>) -> Self {
        self.library_path = Some(path.into());
        self
    }

    pub fn auto_backend(mut self, enabled: bool) -> Self {
        self.auto_backend = enabled;
        self
    }

    pub fn presenter(mut self, enabled: bool) -> Self {
        self.presenter = enabled;
        self
    }

    pub fn audio(mut self, enabled: bool) -> Self {
        self.audio = enabled;
        self
    }

    pub fn diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}
