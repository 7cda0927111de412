//! Content panel UI and narration audio
//!
//! A single bottom-anchored panel slides up when content shows and back
//! out when it hides. Show and hide notifications drive a small state
//! machine per panel; the animation itself runs every frame and eases
//! both the offset and the background alpha.
//!
//! Narration plays once per show on a dedicated audio entity that
//! despawns when its clip ends; [`ReplayContentAudio`] restarts it for
//! the content currently showing.

use bevy::audio::{AudioPlayer, PlaybackSettings};
use bevy::color::Alpha;
use bevy::prelude::*;

use crate::events::{ContentHidden, ContentShown, ReplayContentAudio};
use crate::library::MarkerAssets;

/// Slide distance: the panel parks this far below the screen edge.
pub const PANEL_HIDDEN_OFFSET: f32 = -600.0;
/// On-screen resting offset.
pub const PANEL_SHOWN_OFFSET: f32 = 0.0;
/// Seconds one slide takes.
pub const PANEL_SLIDE_SECONDS: f32 = 0.5;

const PANEL_HEIGHT: f32 = 220.0;
const PANEL_PADDING: f32 = 24.0;
const PANEL_MAX_ALPHA: f32 = 0.92;
const PANEL_BACKGROUND: Color = Color::srgb(0.08, 0.09, 0.12);
const TITLE_FONT_SIZE: f32 = 34.0;
const BODY_FONT_SIZE: f32 = 22.0;

/// Marks the content panel root node.
#[derive(Component)]
pub struct ContentPanel;

/// Marks the panel headline text.
#[derive(Component)]
pub struct PanelTitle;

/// Marks the panel body text.
#[derive(Component)]
pub struct PanelBody;

/// Marks the live narration audio entity.
#[derive(Component)]
pub struct ContentNarration;

/// Slide animation state for a content panel.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum PanelPhase {
    /// Parked off-screen.
    Hidden,
    /// Moving on-screen.
    SlidingIn { elapsed: f32 },
    /// Resting on-screen.
    Shown,
    /// Moving off-screen.
    SlidingOut { elapsed: f32 },
}

/// Spawns the (initially hidden) content panel node tree and returns
/// its root entity.
pub fn create_content_panel(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            ContentPanel,
            PanelPhase::Hidden,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                bottom: Val::Px(PANEL_HIDDEN_OFFSET),
                height: Val::Px(PANEL_HEIGHT),
                padding: UiRect::all(Val::Px(PANEL_PADDING)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(10.0),
                ..Default::default()
            },
            BackgroundColor(PANEL_BACKGROUND.with_alpha(0.0)),
        ))
        .with_children(|parent| {
            parent.spawn((
                PanelTitle,
                Text::new(""),
                TextFont {
                    font_size: TITLE_FONT_SIZE,
                    ..Default::default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                PanelBody,
                Text::new(""),
                TextFont {
                    font_size: BODY_FONT_SIZE,
                    ..Default::default()
                },
                TextColor(Color::srgb(0.85, 0.87, 0.9)),
            ));
        })
        .id()
}

/// Startup system creating the panel when the presenter is enabled.
pub fn setup_content_panel(mut commands: Commands) {
    create_content_panel(&mut commands);
}

/// Applies show and hide notifications to the panel.
///
/// A show landing in the same frame as a hide wins; that is the marker
/// switch case, where the panel stays up and only the text swaps.
pub fn drive_content_panel(
    mut shown: MessageReader<ContentShown>,
    mut hidden: MessageReader<ContentHidden>,
    mut panels: Query<&mut PanelPhase, With<ContentPanel>>,
    mut titles: Query<&mut Text, (With<PanelTitle>, Without<PanelBody>)>,
    mut bodies: Query<&mut Text, (With<PanelBody>, Without<PanelTitle>)>,
) {
    let show = shown.read().last().cloned();
    let hide = hidden.read().last().is_some();

    if let Some(show) = show {
        for mut text in &mut titles {
            text.0 = show.title.clone();
        }
        for mut text in &mut bodies {
            text.0 = show.description.clone();
        }
        for mut phase in &mut panels {
            match *phase {
                PanelPhase::Shown | PanelPhase::SlidingIn { .. } => {}
                _ => *phase = PanelPhase::SlidingIn { elapsed: 0.0 },
            }
        }
    } else if hide {
        for mut phase in &mut panels {
            match *phase {
                PanelPhase::Hidden | PanelPhase::SlidingOut { .. } => {}
                _ => *phase = PanelPhase::SlidingOut { elapsed: 0.0 },
            }
        }
    }
}

/// Advances the slide animation each frame.
pub fn animate_content_panel(
    time: Res<Time>,
    mut panels: Query<(&mut PanelPhase, &mut Node, &mut BackgroundColor), With<ContentPanel>>,
) {
    let dt = time.delta_secs();
    for (mut phase, mut node, mut background) in &mut panels {
        let (elapsed, sliding_in) = match *phase {
            PanelPhase::SlidingIn { elapsed } => (elapsed, true),
            PanelPhase::SlidingOut { elapsed } => (elapsed, false),
            _ => continue,
        };

        let t = ((elapsed + dt) / PANEL_SLIDE_SECONDS).min(1.0);
        let progress = ease(t);
        let (offset, alpha) = if sliding_in {
            (
                lerp(PANEL_HIDDEN_OFFSET, PANEL_SHOWN_OFFSET, progress),
                t * PANEL_MAX_ALPHA,
            )
        } else {
            (
                lerp(PANEL_SHOWN_OFFSET, PANEL_HIDDEN_OFFSET, progress),
                (1.0 - t) * PANEL_MAX_ALPHA,
            )
        };

        node.bottom = Val::Px(offset);
        background.0 = background.0.with_alpha(alpha);
        *phase = if t >= 1.0 {
            if sliding_in {
                PanelPhase::Shown
            } else {
                PanelPhase::Hidden
            }
        } else if sliding_in {
            PanelPhase::SlidingIn {
                elapsed: elapsed + dt,
            }
        } else {
            PanelPhase::SlidingOut {
                elapsed: elapsed + dt,
            }
        };
    }
}

/// Starts, stops and replays narration audio for the showing content.
pub fn play_content_audio(
    mut commands: Commands,
    mut shown: MessageReader<ContentShown>,
    mut hidden: MessageReader<ContentHidden>,
    mut replays: MessageReader<ReplayContentAudio>,
    assets: Option<Res<MarkerAssets>>,
    narrations: Query<Entity, With<ContentNarration>>,
    mut showing: Local<Option<String>>,
) {
    let Some(assets) = assets else {
        shown.clear();
        hidden.clear();
        replays.clear();
        return;
    };

    let show = shown.read().last().cloned();
    let hide = hidden.read().last().is_some();
    let replay = replays.read().last().is_some();

    if let Some(show) = show {
        stop_narration(&mut commands, &narrations);
        start_narration(&mut commands, &assets, &show.marker);
        *showing = Some(show.marker);
    } else if hide {
        stop_narration(&mut commands, &narrations);
        *showing = None;
    } else if replay {
        if let Some(marker) = showing.as_deref() {
            stop_narration(&mut commands, &narrations);
            start_narration(&mut commands, &assets, marker);
        }
    }
}

fn start_narration(commands: &mut Commands, assets: &MarkerAssets, marker: &str) {
    let Some(handle) = assets.audio.get(marker) else {
        return;
    };
    commands.spawn((
        ContentNarration,
        AudioPlayer(handle.clone()),
        PlaybackSettings::DESPAWN,
    ));
}

fn stop_narration(commands: &mut Commands, narrations: &Query<Entity, With<ContentNarration>>) {
    for entity in narrations {
        commands.entity(entity).try_despawn();
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// Smoothstep.
fn ease(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}
