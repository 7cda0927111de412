//! Marker library: which reference images exist and what each presents
//!
//! Authored as a RON asset so content teams can edit it without
//! touching code. A library can also be inserted directly as a
//! resource, which is how headless hosts and tests skip asset IO.

use bevy::asset::{AssetLoader, LoadContext, io::Reader};
use bevy::audio::AudioSource;
use bevy::prelude::*;
use bevy::reflect::TypePath;
use fiducial::MarkerRegistry;
use serde::Deserialize;
use std::collections::HashMap;

const LIBRARY_EXTENSIONS: &[&str] = &["fidlib", "markers.ron"];

/// Content registered for one reference image.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MarkerContent {
    /// Reference-image id exactly as the backend reports it.
    pub id: String,
    /// Headline shown on the content panel.
    pub title: String,
    /// Body text shown on the content panel.
    #[serde(default)]
    pub description: String,
    /// Asset path of the narration clip played when the content shows.
    #[serde(default)]
    pub audio: Option<String>,
    /// Asset path of the scene anchored above the marker.
    #[serde(default)]
    pub scene: Option<String>,
}

/// Library asset listing every registered marker.
///
/// Also usable as a plain resource for hosts that build it in code.
#[derive(Asset, Resource, Clone, TypePath, Deserialize)]
pub struct MarkerLibrary {
    pub markers: Vec<MarkerContent>,
}

impl MarkerLibrary {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Builds the core registry keyed by marker id.
    pub fn build_registry(&self) -> fiducial::Result<MarkerRegistry<MarkerContent>> {
        MarkerRegistry::from_entries(
            self.markers
                .iter()
                .map(|content| (content.id.clone(), content.clone())),
        )
    }
}

/// Loader for `.fidlib` / `.markers.ron` assets.
#[derive(Default)]
pub struct MarkerLibraryLoader;

impl AssetLoader for MarkerLibraryLoader {
    type Asset = MarkerLibrary;
    type Settings = ();
    type Error = anyhow::Error;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let library: MarkerLibrary = ron::de::from_bytes(&bytes)?;
        Ok(library)
    }

    fn extensions(&self) -> &[&str] {
        LIBRARY_EXTENSIONS
    }
}

/// Tracks the library asset while it loads.
#[derive(Resource, Default)]
pub struct MarkerLibrarySource {
    pub handle: Option<Handle<MarkerLibrary>>,
}

/// Handles resolved from marker library paths when the session starts.
#[derive(Resource, Default)]
pub struct MarkerAssets {
    pub audio: HashMap<String, Handle<AudioSource>>,
    pub scenes: HashMap<String, Handle<Scene>>,
}

impl MarkerAssets {
    /// Loads a handle for every audio and scene path in the library.
    pub fn resolve(library: &MarkerLibrary, asset_server: &AssetServer) -> Self {
        let mut resolved = Self::default();
        for content in &library.markers {
            if let Some(path) = &content.audio {
                resolved
                    .audio
                    .insert(content.id.clone(), asset_server.load(path));
            }
            if let Some(path) = &content.scene {
                resolved
                    .scenes
                    .insert(content.id.clone(), asset_server.load(path));
            }
        }
        resolved
    }
}
