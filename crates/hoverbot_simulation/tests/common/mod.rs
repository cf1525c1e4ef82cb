//! Общие helpers для integration тестов: headless App + запись событий

#![allow(dead_code)]

use bevy::prelude::*;
use hoverbot_simulation::*;

pub const PLAYER_AFFILIATION: u64 = 0;
pub const BOT_AFFILIATION: u64 = 1;

/// Записанные события типа T (по всем тикам)
#[derive(Resource)]
pub struct Recorded<T: Send + Sync + 'static>(pub Vec<T>);

impl<T: Send + Sync + 'static> Default for Recorded<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record<T: Event + Clone>(mut reader: EventReader<T>, mut recorded: ResMut<Recorded<T>>) {
    recorded.0.extend(reader.read().cloned());
}

/// Подписка на события T (после всех фаз тика)
pub fn record_events<T: Event + Clone>(app: &mut App) {
    app.init_resource::<Recorded<T>>()
        .add_systems(FixedUpdate, record::<T>.after(HoverbotSet::Lifecycle));
}

pub fn recorded<T: Event + Clone>(app: &App) -> Vec<T> {
    app.world().resource::<Recorded<T>>().0.clone()
}

/// Headless App со всеми подписками; первый (нулевой по времени) update уже сделан
pub fn test_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);

    record_events::<TargetDetected>(&mut app);
    record_events::<TargetLost>(&mut app);
    record_events::<EnemyDamaged>(&mut app);
    record_events::<DamageTickSfx>(&mut app);
    record_events::<AttackRequested>(&mut app);
    record_events::<DeathVfxRequested>(&mut app);
    record_events::<LootDropRequested>(&mut app);
    record_events::<EnemyDestroyed>(&mut app);

    // Startup frame: Time<Real> стартует, fixed tick ещё не идёт
    app.update();
    app
}

/// Один app.update() == один fixed tick (ManualDuration = 1/60 s)
pub fn tick(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

pub fn ticks_for_seconds(seconds: f32) -> usize {
    (seconds * TICK_HZ as f32).ceil() as usize
}

pub fn now(app: &App) -> f32 {
    app.world().resource::<Time<Fixed>>().elapsed_secs()
}

pub fn spawn_bot(app: &mut App, name: &str, position: Vec3, config: EnemyConfig) -> Entity {
    spawn_enemy(
        app.world_mut(),
        EnemySpawn::new(name, position, BOT_AFFILIATION).with_config(config),
    )
    .expect("collaborators are installed by SimulationPlugin")
}

pub fn spawn_test_player(app: &mut App, position: Vec3) -> Entity {
    spawn_player(app.world_mut(), ActorSpawn::at(position, PLAYER_AFFILIATION))
}

/// Враждебный актор без Player marker (урон от него не распознаётся)
pub fn spawn_hostile(app: &mut App, position: Vec3) -> Entity {
    spawn_actor(app.world_mut(), ActorSpawn::at(position, PLAYER_AFFILIATION))
}

/// Непрозрачная стена (статическая геометрия, без owner)
pub fn spawn_wall(app: &mut App, center: Vec3, half_extents: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(center),
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
        ))
        .id()
}

pub fn move_to(app: &mut App, entity: Entity, position: Vec3) {
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(entity) {
        transform.translation = position;
    }
}

pub fn perception(app: &App, bot: Entity) -> Perception {
    app.world()
        .get::<Perception>(bot)
        .cloned()
        .expect("bot has Perception")
}

pub fn in_attack_range(app: &App, bot: Entity) -> bool {
    app.world()
        .get::<CombatGate>(bot)
        .is_some_and(|gate| gate.is_target_in_attack_range)
}

pub fn damage(app: &mut App, target: Entity, amount: f32, source: Option<Entity>) {
    app.world_mut().send_event(DamageRequest {
        target,
        amount,
        source,
    });
}
