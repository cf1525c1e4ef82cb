//! Headless симуляция hoverbot'а
//!
//! Игрок ходит за стеной и выходит из-за неё; hoverbot замечает, теряет из виду,
//! вспоминает по урону. Печатает perception state раз в секунду.

use bevy::prelude::*;
use hoverbot_simulation::*;

const PLAYER_AFFILIATION: u64 = 0;
const BOT_AFFILIATION: u64 = 1;

fn main() {
    let seed = 42;
    println!("Starting hoverbot headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);

    let player = spawn_player(
        app.world_mut(),
        ActorSpawn::at(Vec3::new(0.0, 0.0, 15.0), PLAYER_AFFILIATION),
    );

    // Стена между ботом и первой половиной маршрута игрока
    app.world_mut().spawn((
        Transform::from_translation(Vec3::new(0.0, 1.0, 8.0)),
        Collider::cuboid(3.0, 3.0, 0.25),
    ));

    let config = EnemyConfig {
        loot: Some(PrefabPath::new("prefabs/health_pickup")),
        death_vfx: Some(PrefabPath::new("prefabs/vfx_explosion")),
        damage_tick_sound: Some("sfx/damage_tick".to_string()),
        drop_rate: 0.5,
        ..Default::default()
    };

    let bot = match spawn_enemy(
        app.world_mut(),
        EnemySpawn::new("hoverbot_01", Vec3::ZERO, BOT_AFFILIATION).with_config(config),
    ) {
        Ok(bot) => bot,
        Err(error) => {
            eprintln!("Failed to spawn hoverbot: {}", error);
            return;
        }
    };

    for tick in 0..600 {
        // Игрок идёт вдоль оси X (за стеной первые ~3 метра)
        if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
            transform.translation.x = -4.0 + tick as f32 * 0.02;
        }

        if tick == 450 {
            app.world_mut().send_event(DamageRequest {
                target: bot,
                amount: 40.0,
                source: Some(player),
            });
        }

        app.update();

        if tick % 60 == 0 {
            if let Some(perception) = app.world().get::<Perception>(bot) {
                let in_range = app
                    .world()
                    .get::<CombatGate>(bot)
                    .is_some_and(|gate| gate.is_target_in_attack_range);
                let hit_flash = app
                    .world()
                    .get::<DamageFeedback>(bot)
                    .map_or(1.0, |feedback| feedback.hit_flash);
                println!(
                    "Tick {}: known target = {:?}, seeing = {}, in attack range = {}, hit flash = {:.2}",
                    tick,
                    perception.known_target.map(|known| known.actor),
                    perception.is_seeing_target,
                    in_range,
                    hit_flash
                );
            }
        }
    }

    let registry = app.world().resource::<EnemyRegistry>();
    println!(
        "Simulation complete! Enemies remaining: {}/{}",
        registry.remaining(),
        registry.total_registered()
    );
}
