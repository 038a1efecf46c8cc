//! Scene module - camera, lights, fog, starfield and resize handling
//!
//! The scene is built once at startup. Hands come and go through the
//! `hands` submodule as the session attaches and detaches them.

use bevy::prelude::*;
use bevy::pbr::{DistanceFog, FogFalloff, NotShadowCaster};
use bevy::window::WindowResized;

use crate::game::GameSet;

pub mod hands;

pub use hands::*;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        let config = SceneConfig::default();

        app
            .insert_resource(ClearColor(config.background))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: config.ambient_brightness,
            })
            .insert_resource(config)
            .add_systems(Startup, (setup_camera, setup_lights, spawn_starfield))
            .add_systems(Update, (
                apply_session_events,
                sync_hand_transforms,
            ).chain().in_set(GameSet::Present))
            .add_systems(Update, handle_window_resize);
    }
}

// ============================================================================
// CONFIG
// ============================================================================

/// Look of the scene.
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    /// Clear color and fog color
    pub background: Color,
    /// Linear fog start distance
    pub fog_start: f32,
    /// Linear fog end distance
    pub fog_end: f32,
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,
    /// Camera near plane
    pub near: f32,
    /// Camera far plane
    pub far: f32,
    /// Camera distance along +Z
    pub camera_z: f32,
    /// Ambient light brightness
    pub ambient_brightness: f32,
    /// Key light color
    pub key_light_color: Color,
    /// Key light illuminance (lux)
    pub key_light_illuminance: f32,
    /// Key light position (aims at the origin)
    pub key_light_position: Vec3,
    /// Accent light color
    pub accent_light_color: Color,
    /// Accent light intensity (lumens)
    pub accent_light_intensity: f32,
    /// Accent light position
    pub accent_light_position: Vec3,
    /// Number of stars
    pub star_count: usize,
    /// Edge length of the cube the stars are scattered in
    pub star_spread: f32,
    /// Star diameter
    pub star_size: f32,
    /// Star color
    pub star_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Color::srgb_u8(0x0a, 0x0e, 0x27),
            fog_start: 100.0,
            fog_end: 500.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_z: 10.0,
            ambient_brightness: 700.0,
            key_light_color: Color::srgb_u8(0x00, 0xff, 0xff),
            key_light_illuminance: 8_000.0,
            key_light_position: Vec3::new(5.0, 10.0, 7.0),
            accent_light_color: Color::srgb_u8(0xff, 0x00, 0xff),
            accent_light_intensity: 500_000.0,
            accent_light_position: Vec3::new(-5.0, 5.0, 5.0),
            star_count: 1000,
            star_spread: 200.0,
            star_size: 0.1,
            star_color: Color::srgb_u8(0x00, 0xff, 0xff),
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Marker for starfield points
#[derive(Component)]
pub struct Star;

/// Perspective camera looking down -Z, with fog matching the background
fn setup_camera(mut commands: Commands, config: Res<SceneConfig>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, config.camera_z).looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: config.background,
            falloff: FogFalloff::Linear {
                start: config.fog_start,
                end: config.fog_end,
            },
            ..default()
        },
    ));

    info!("Camera ready");
}

/// Key light with shadows plus a magenta accent
fn setup_lights(mut commands: Commands, config: Res<SceneConfig>) {
    commands.spawn((
        DirectionalLight {
            color: config.key_light_color,
            illuminance: config.key_light_illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(config.key_light_position).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        PointLight {
            color: config.accent_light_color,
            intensity: config.accent_light_intensity,
            ..default()
        },
        Transform::from_translation(config.accent_light_position),
    ));
}

/// Scatter the stars uniformly through a cube around the origin
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    let mesh = meshes.add(Sphere::new(config.star_size * 0.5).mesh().uv(4, 3));
    let material = materials.add(StandardMaterial {
        base_color: config.star_color,
        unlit: true,
        ..default()
    });

    for _ in 0..config.star_count {
        let position = Vec3::new(
            rand::random::<f32>() - 0.5,
            rand::random::<f32>() - 0.5,
            rand::random::<f32>() - 0.5,
        ) * config.star_spread;

        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position),
            NotShadowCaster,
            Star,
        ));
    }

    info!("Spawned {} stars", config.star_count);
}

// ============================================================================
// RESIZE
// ============================================================================

/// Keep the camera aspect ratio in step with the window
///
/// Bevy's `camera_system` sets the same ratio for render targets; this one
/// applies the latest `WindowResized` directly and logs it.
fn handle_window_resize(
    mut resize_events: EventReader<WindowResized>,
    mut cameras: Query<&mut Projection, With<Camera3d>>,
) {
    let Some(event) = resize_events.read().last() else {
        return;
    };
    if event.width <= 0.0 || event.height <= 0.0 {
        return;
    }

    for mut projection in cameras.iter_mut() {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = event.width / event.height;
        }
    }

    debug!("Resized to {}x{}", event.width, event.height);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect_ratio() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<WindowResized>()
            .add_systems(Update, handle_window_resize);

        let camera = app.world_mut().spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection::default()),
        )).id();

        app.world_mut().send_event(WindowResized {
            window: Entity::PLACEHOLDER,
            width: 1000.0,
            height: 500.0,
        });
        app.update();

        let Some(Projection::Perspective(perspective)) = app.world().get::<Projection>(camera) else {
            panic!("camera lost its perspective projection");
        };
        assert_eq!(perspective.aspect_ratio, 2.0);
    }

    #[test]
    fn test_zero_height_resize_is_ignored() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<WindowResized>()
            .add_systems(Update, handle_window_resize);

        let camera = app.world_mut().spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection::default()),
        )).id();

        app.world_mut().send_event(WindowResized {
            window: Entity::PLACEHOLDER,
            width: 800.0,
            height: 0.0,
        });
        app.update();

        let Some(Projection::Perspective(perspective)) = app.world().get::<Projection>(camera) else {
            panic!("camera lost its perspective projection");
        };
        assert_eq!(perspective.aspect_ratio, PerspectiveProjection::default().aspect_ratio);
    }
}
