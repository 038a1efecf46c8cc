//! Hand entities mirroring the session stage
//!
//! Each attached hand becomes an entity tree: root (placement + idle roll)
//! -> palm mesh -> four finger joints -> chained segment meshes. Only the
//! root and the joints move after spawning.

use bevy::prelude::*;
use rps_core::game::hand::{HandModel, Segment};
use rps_core::game::stage::{Placement, Side};
use rps_core::game::TurnEvent;

use crate::game::{Session, SessionEvent};

// ============================================================================
// COMPONENTS
// ============================================================================

/// Root of a spawned hand
#[derive(Component, Debug, Clone, Copy)]
pub struct HandRoot {
    pub side: Side,
}

/// Posable root joint of one finger
#[derive(Component, Debug, Clone, Copy)]
pub struct FingerJoint {
    pub side: Side,
    pub index: usize,
}

/// Close to a Phong shininess of 50
const HAND_ROUGHNESS: f32 = 0.4;

fn hand_transform(placement: Placement, roll: f32) -> Transform {
    Transform {
        translation: Vec3::from_array(placement.translation),
        rotation: Quat::from_rotation_y(placement.yaw) * Quat::from_rotation_z(roll),
        scale: Vec3::splat(placement.scale),
    }
}

// ============================================================================
// SPAWNING
// ============================================================================

/// Spawn the entity tree for a hand model
pub fn spawn_hand(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    model: &HandModel,
    side: Side,
) -> Entity {
    let [r, g, b] = model.color.rgb();
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        perceptual_roughness: HAND_ROUGHNESS,
        ..default()
    });

    let [width, height, depth] = model.palm_size;
    let palm = meshes.add(Cuboid::new(width, height, depth));

    // All segments of a hand share one mesh
    let segment = &model.fingers[0].segments[0];
    let segment_mesh = meshes.add(
        Cylinder::new(segment.radius, segment.length)
            .mesh()
            .resolution(model.segment_resolution),
    );

    commands.spawn((
        HandRoot { side },
        Name::new(format!("{:?} hand", side)),
        hand_transform(side.placement(), 0.0),
        Visibility::default(),
    )).with_children(|hand| {
        hand.spawn((
            Mesh3d(palm),
            MeshMaterial3d(material.clone()),
            Transform::default(),
        )).with_children(|palm| {
            for (index, finger) in model.fingers.iter().enumerate() {
                palm.spawn((
                    FingerJoint { side, index },
                    Transform::from_translation(Vec3::from_array(finger.root_offset))
                        .with_rotation(Quat::from_rotation_x(finger.curl)),
                    Visibility::default(),
                )).with_children(|joint| {
                    spawn_segment_chain(joint, &finger.segments, &segment_mesh, &material);
                });
            }
        });
    }).id()
}

/// Each segment is a child of the previous one
fn spawn_segment_chain(
    parent: &mut ChildBuilder,
    segments: &[Segment],
    mesh: &Handle<Mesh>,
    material: &Handle<StandardMaterial>,
) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    parent.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(material.clone()),
        Transform::from_translation(Vec3::from_array(first.offset)),
    )).with_children(|child| {
        spawn_segment_chain(child, rest, mesh, material);
    });
}

// ============================================================================
// SYSTEMS
// ============================================================================

/// Spawn and despawn hand entities as the session attaches and detaches them
pub fn apply_session_events(
    mut commands: Commands,
    mut events: EventReader<SessionEvent>,
    mut session: ResMut<Session>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    hands: Query<(Entity, &HandRoot)>,
) {
    // Old roots are only despawned once per frame; new ones are not in the query yet
    let mut cleared = false;

    for event in events.read() {
        match &**event {
            TurnEvent::HandsDetached | TurnEvent::SessionReset => {
                if !cleared {
                    for (entity, _) in hands.iter() {
                        commands.entity(entity).despawn_recursive();
                    }
                    cleared = true;
                }
            }
            TurnEvent::HandAttached { side } => {
                let side = *side;
                let model = session.stage().hand(side).map(|staged| staged.model.clone());
                let Some(model) = model else {
                    error!("{:?} hand attached but missing from stage", side);
                    session.report_error(&format!("{:?} hand could not be attached", side));
                    continue;
                };

                spawn_hand(&mut commands, &mut meshes, &mut materials, &model, side);
                info!("{:?} hand spawned with pose {:?}", side, model.pose());
            }
            TurnEvent::HandError { message } => {
                error!("{}", message);
            }
            TurnEvent::TurnStarted(_) | TurnEvent::TurnRevealed(_) => {}
        }
    }
}

/// Copy idle roll and joint angles from the stage every frame
pub fn sync_hand_transforms(
    session: Res<Session>,
    mut roots: Query<(&HandRoot, &mut Transform), Without<FingerJoint>>,
    mut joints: Query<(&FingerJoint, &mut Transform), Without<HandRoot>>,
) {
    let stage = session.stage();

    for (root, mut transform) in roots.iter_mut() {
        if let Some(staged) = stage.hand(root.side) {
            *transform = hand_transform(root.side.placement(), staged.roll);
        }
    }

    for (joint, mut transform) in joints.iter_mut() {
        if let Some(finger) = stage.hand(joint.side).and_then(|h| h.model.fingers.get(joint.index)) {
            transform.rotation = Quat::from_rotation_x(finger.curl);
        }
    }
}
