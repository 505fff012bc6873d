use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::tasks::{block_on, futures_lite::future, IoTaskPool, Task, TaskPool};
use bevy::window::WindowResolution;
use log::{error, info, warn};

use crate::simulation::scenario::{Scenario, ScenarioSource};
use crate::simulation::states::NVec2;

#[derive(Component)]
struct BodyIndex(pub usize);

/// Scenario being rebuilt off the frame loop after a reset request
#[derive(Resource, Default)]
struct PendingReset(Option<Task<anyhow::Result<Scenario>>>);

const BODY_RADIUS: f32 = 5.0; // px
const AXIS_GREY: f32 = 50.0 / 255.0;

/// Palette for tags that are not a known colour name, by body slot
const SLOT_PALETTE: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Map a body tag to an RGB colour
pub fn tag_rgb(tag: &str, index: usize) -> [f32; 3] {
    match tag.to_ascii_lowercase().as_str() {
        "red" => [1.0, 0.0, 0.0],
        "green" => [0.0, 1.0, 0.0],
        "blue" => [0.0, 0.0, 1.0],
        "yellow" => [1.0, 1.0, 0.0],
        "cyan" => [0.0, 1.0, 1.0],
        "magenta" => [1.0, 0.0, 1.0],
        "white" => [1.0, 1.0, 1.0],
        _ => SLOT_PALETTE[index % SLOT_PALETTE.len()],
    }
}

/// Simulation coordinates to world coordinates: `center + pos * scale`
/// with the window centre at the origin. Screen y grows downward
pub fn to_screen(pos: &NVec2, scale: f64) -> Vec2 {
    Vec2::new((pos.x * scale) as f32, -(pos.y * scale) as f32)
}

/// Rebuild a scenario from `source` on the IO task pool. An interactive
/// source blocks on the console there, so the window keeps drawing
pub fn spawn_reset(source: ScenarioSource) -> Task<anyhow::Result<Scenario>> {
    IoTaskPool::get_or_init(TaskPool::new).spawn(async move { Scenario::load(source) })
}

/// The rebuilt scenario once `task` has finished, without blocking
pub fn poll_reset(task: &mut Task<anyhow::Result<Scenario>>) -> Option<anyhow::Result<Scenario>> {
    block_on(future::poll_once(task))
}

pub fn run_2d(scenario: Scenario) {
    info!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.simulation.bodies().len());

    let window = Window {
        title: "Three-body problem".into(),
        resolution: WindowResolution::new(scenario.viewer.width as f32, scenario.viewer.height as f32),
        ..default()
    };

    let exit = App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::BLACK))
        .init_resource::<PendingReset>()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window),
                    ..default()
                })
                // logging goes through env_logger
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_system)
        .add_systems(
            Update,
            (
                reset_request_system,
                reset_apply_system,
                physics_step_system,
                sync_transforms_system,
                draw_gizmos_system,
            )
                .chain(),
        )
        .run();

    if exit.is_error() {
        error!("viewer exited with {:?}", exit);
    }
}

fn setup_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());
    spawn_bodies(&mut commands, &scenario, &mut meshes, &mut materials);
}

fn spawn_bodies(commands: &mut Commands, scenario: &Scenario, meshes: &mut Assets<Mesh>, materials: &mut Assets<ColorMaterial>) {
    for (i, body) in scenario.simulation.bodies().iter().enumerate() {
        let [r, g, b] = tag_rgb(&body.tag, i);
        let pos = to_screen(&body.x, scenario.viewer.scale);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(BODY_RADIUS))),
                material: materials.add(ColorMaterial::from(Color::srgb(r, g, b))),
                transform: Transform::from_xyz(pos.x, pos.y, 1.0),
                ..default()
            },
            BodyIndex(i),
        ));
    }
}

/// Space starts rebuilding the scenario from its source; the current run
/// keeps going until the new one is ready
fn reset_request_system(keys: Res<ButtonInput<KeyCode>>, scenario: Res<Scenario>, mut pending: ResMut<PendingReset>) {
    if !keys.just_pressed(KeyCode::Space) || pending.0.is_some() {
        return;
    }
    if scenario.source == ScenarioSource::Interactive {
        info!("reset: waiting for initial conditions on the console");
    }
    pending.0 = Some(spawn_reset(scenario.source.clone()));
}

/// Swap in the rebuilt scenario as a whole value once it is ready
fn reset_apply_system(
    mut pending: ResMut<PendingReset>,
    mut commands: Commands,
    mut scenario: ResMut<Scenario>,
    bodies: Query<Entity, With<BodyIndex>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let Some(task) = pending.0.as_mut() else { return };
    let Some(result) = poll_reset(task) else { return };
    pending.0 = None;

    match result {
        Ok(fresh) => {
            info!("reset: reloaded scenario from {:?}", fresh.source);
            *scenario = fresh;
            for entity in &bodies {
                commands.entity(entity).despawn();
            }
            spawn_bodies(&mut commands, &scenario, &mut meshes, &mut materials);
        }
        Err(e) => error!("reset failed, keeping the current run: {e:#}"),
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>, mut warned: Local<bool>) {
    let substeps = scenario.viewer.substeps;
    if let Err(e) = scenario.simulation.advance(substeps) {
        if !*warned {
            warn!("simulation not stepping: {e}");
            *warned = true;
        }
    }
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let scale = scenario.viewer.scale;
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.simulation.bodies().get(*i) {
            let pos = to_screen(&b.x, scale);
            transform.translation.x = pos.x;
            transform.translation.y = pos.y;
        }
    }
}

fn draw_gizmos_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let half_w = scenario.viewer.width as f32 / 2.0;
    let half_h = scenario.viewer.height as f32 / 2.0;
    let axis = Color::srgb(AXIS_GREY, AXIS_GREY, AXIS_GREY);
    gizmos.line_2d(Vec2::new(-half_w, 0.0), Vec2::new(half_w, 0.0), axis);
    gizmos.line_2d(Vec2::new(0.0, -half_h), Vec2::new(0.0, half_h), axis);

    // Trails fade in from oldest to newest
    let sim = &scenario.simulation;
    for (i, body) in sim.bodies().iter().enumerate() {
        let Ok(trail) = sim.trail(i) else { continue };
        if trail.len() < 2 {
            continue;
        }
        let [r, g, b] = tag_rgb(&body.tag, i);
        let len = trail.len() as f32;
        gizmos.linestrip_gradient_2d(
            trail
                .iter()
                .enumerate()
                .map(|(j, p)| (to_screen(p, scenario.viewer.scale), Color::srgba(r, g, b, j as f32 / len))),
        );
    }
}
