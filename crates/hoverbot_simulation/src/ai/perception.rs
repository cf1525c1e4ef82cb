//! Perception state + detection algorithm
//!
//! Каждый тик:
//! 1. Забываем цель если не видим её дольше known_target_timeout
//! 2. Ищем ближайшего видимого врага (другая affiliation) в detection_range
//! 3. Видимость = ближайший hit луча (без своих коллайдеров) принадлежит кандидату
//!
//! Алгоритм не знает про ECS: кандидаты и spatial backend приходят параметрами.

use bevy::prelude::*;

use crate::components::Actor;
use crate::physics::{RayHit, SpatialQuery};

/// Откуда берётся позиция known target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TargetAnchor {
    /// Увидели: позиция = AimPoint актора
    AimPoint,
    /// Получили урон: позиция = origin источника урона
    Origin,
}

/// Цель, которую агент помнит (возможно без прямой видимости)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct KnownTarget {
    pub actor: Entity,
    pub anchor: TargetAnchor,
}

/// Perception state агента
///
/// Мутируется только detection (DetectionSet) и damage reaction.
/// Инвариант: known_target.is_some() ⇒ is_seeing_target || (now - time_last_seen) ≤ timeout;
/// нарушение чинится на следующей оценке (forget), не посреди неё.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Perception {
    pub known_target: Option<KnownTarget>,
    pub is_seeing_target: bool,
    pub time_last_seen: f32,
    /// Только для edge-detection detected/lost
    pub had_known_target: bool,
}

impl Default for Perception {
    fn default() -> Self {
        Self {
            known_target: None,
            is_seeing_target: false,
            time_last_seen: f32::NEG_INFINITY,
            had_known_target: false,
        }
    }
}

impl Perception {
    pub fn has_known_target(&self) -> bool {
        self.known_target.is_some()
    }

    /// Шаг 1: забыть цель, если она давно не видна. Идемпотентно.
    ///
    /// Возвращает true если цель была забыта в этом вызове.
    pub fn forget_if_expired(&mut self, now: f32, known_target_timeout: f32) -> bool {
        if self.known_target.is_some()
            && !self.is_seeing_target
            && (now - self.time_last_seen) > known_target_timeout
        {
            self.known_target = None;
            return true;
        }
        false
    }

    /// Применить результат сканирования этого тика
    pub fn apply_scan(&mut self, sighting: Option<Sighting>, now: f32) {
        self.is_seeing_target = sighting.is_some();

        if let Some(sighting) = sighting {
            self.known_target = Some(KnownTarget {
                actor: sighting.actor,
                anchor: TargetAnchor::AimPoint,
            });
            self.time_last_seen = now;
        }
    }

    /// Урон от распознанного врага: знаем о нём без line of sight
    pub fn become_aware_of(&mut self, source: Entity, now: f32) {
        self.known_target = Some(KnownTarget {
            actor: source,
            anchor: TargetAnchor::Origin,
        });
        self.time_last_seen = now;
    }

    /// Цель исчезла из мира (despawn): эквивалент null reference
    pub fn drop_target(&mut self) {
        self.known_target = None;
        self.is_seeing_target = false;
    }

    /// Смерть агента: состояние очищается, но компонент остаётся
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Edge transition с прошлого тика; обновляет had_known_target
    pub fn take_transition(&mut self) -> Option<TargetTransition> {
        let has = self.known_target.is_some();
        let transition = match (self.had_known_target, has) {
            (false, true) => Some(TargetTransition::Detected),
            (true, false) => Some(TargetTransition::Lost),
            _ => None,
        };
        self.had_known_target = has;
        transition
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTransition {
    Detected,
    Lost,
}

/// Derived combat state (пересчитывается каждый тик, не хранит истории)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CombatGate {
    pub is_target_in_attack_range: bool,
}

impl CombatGate {
    pub fn evaluate(agent_position: Vec3, target_position: Option<Vec3>, attack_range: f32) -> Self {
        Self {
            is_target_in_attack_range: target_position
                .is_some_and(|target| agent_position.distance(target) <= attack_range),
        }
    }
}

/// Кандидат для detection (snapshot актора на этот тик)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub actor: Entity,
    pub faction: Actor,
    pub position: Vec3,
    pub aim_point: Vec3,
}

/// Что агент знает о себе для detection
#[derive(Debug, Clone, Copy)]
pub struct Observer<'a> {
    pub faction: Actor,
    pub detection_source: Vec3,
    pub detection_range: f32,
    pub self_colliders: &'a [Entity],
}

/// Результат сканирования: ближайший видимый враг
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    pub actor: Entity,
    /// Квадрат дистанции от detection source до position актора
    pub sqr_distance: f32,
}

/// Ближайший hit, не принадлежащий собственным коллайдерам
pub fn closest_valid_hit(hits: &[RayHit], self_colliders: &[Entity]) -> Option<RayHit> {
    hits.iter()
        .filter(|hit| !self_colliders.contains(&hit.collider))
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
        .copied()
}

/// Ищет ближайшего видимого врага
///
/// - дистанция считается до position актора, луч идёт в его aim point
/// - при равной дистанции побеждает первый в порядке итерации
/// - пустой список / нет hits: просто None
pub fn scan_for_target(
    observer: &Observer,
    candidates: impl IntoIterator<Item = Candidate>,
    spatial: &dyn SpatialQuery,
) -> Option<Sighting> {
    let sqr_detection_range = observer.detection_range * observer.detection_range;
    let mut best: Option<Sighting> = None;

    for candidate in candidates {
        if !observer.faction.is_hostile_to(&candidate.faction) {
            continue;
        }

        let sqr_distance = (candidate.position - observer.detection_source).length_squared();
        let closer = best.is_none_or(|best| sqr_distance < best.sqr_distance);
        if sqr_distance >= sqr_detection_range || !closer {
            continue;
        }

        let direction = (candidate.aim_point - observer.detection_source).normalize_or_zero();
        if direction == Vec3::ZERO {
            continue;
        }

        let hits = spatial.raycast_all(observer.detection_source, direction, observer.detection_range);
        let Some(hit) = closest_valid_hit(&hits, observer.self_colliders) else {
            // Нет ни одного hit: считаем заслонённым
            continue;
        };

        if hit.owner == Some(candidate.actor) {
            best = Some(Sighting {
                actor: candidate.actor,
                sqr_distance,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Collider, ColliderEntry, ColliderWorld};

    const AGENT_AFFILIATION: u64 = 1;
    const PLAYER_AFFILIATION: u64 = 0;

    fn entity(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    /// Актор = сфера радиуса 0.5 вокруг aim point, owner = сам актор
    fn actor_collider(actor: Entity, collider_index: u32, aim_point: Vec3) -> ColliderEntry {
        ColliderEntry::at(entity(collider_index), Collider::ball(0.5), aim_point).owned_by(actor)
    }

    fn candidate(actor: Entity, position: Vec3) -> Candidate {
        Candidate {
            actor,
            faction: Actor::new(PLAYER_AFFILIATION),
            position,
            aim_point: position,
        }
    }

    fn observer(self_colliders: &[Entity]) -> Observer<'_> {
        Observer {
            faction: Actor::new(AGENT_AFFILIATION),
            detection_source: Vec3::ZERO,
            detection_range: 20.0,
            self_colliders,
        }
    }

    #[test]
    fn test_nearest_visible_actor_wins() {
        let near = entity(1);
        let far = entity(2);
        // sqr distances 10 и 20
        let near_pos = Vec3::new(10.0_f32.sqrt(), 0.0, 0.0);
        let far_pos = Vec3::new(0.0, 0.0, 20.0_f32.sqrt());

        let world = ColliderWorld::new(vec![
            actor_collider(near, 101, near_pos),
            actor_collider(far, 102, far_pos),
        ]);

        // Далёкий первым: порядок итерации не важен
        let sighting = scan_for_target(
            &observer(&[]),
            [candidate(far, far_pos), candidate(near, near_pos)],
            &world,
        )
        .expect("both visible");

        assert_eq!(sighting.actor, near);
        assert!((sighting.sqr_distance - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_same_affiliation_ignored() {
        let ally = entity(1);
        let pos = Vec3::new(5.0, 0.0, 0.0);
        let world = ColliderWorld::new(vec![actor_collider(ally, 101, pos)]);

        let mut ally_candidate = candidate(ally, pos);
        ally_candidate.faction = Actor::new(AGENT_AFFILIATION);

        assert!(scan_for_target(&observer(&[]), [ally_candidate], &world).is_none());
    }

    #[test]
    fn test_out_of_range_ignored() {
        let target = entity(1);
        let pos = Vec3::new(25.0, 0.0, 0.0);
        let world = ColliderWorld::new(vec![actor_collider(target, 101, pos)]);

        assert!(scan_for_target(&observer(&[]), [candidate(target, pos)], &world).is_none());
    }

    #[test]
    fn test_obstruction_hides_only_blocked_actor() {
        let blocked = entity(1);
        let visible = entity(2);
        let blocked_pos = Vec3::new(10.0, 0.0, 0.0);
        let visible_pos = Vec3::new(0.0, 0.0, 12.0);

        let open = ColliderWorld::new(vec![
            actor_collider(blocked, 101, blocked_pos),
            actor_collider(visible, 102, visible_pos),
        ]);
        let sighting = scan_for_target(
            &observer(&[]),
            [candidate(blocked, blocked_pos), candidate(visible, visible_pos)],
            &open,
        );
        assert_eq!(sighting.map(|s| s.actor), Some(blocked));

        // Стена между агентом и ближним актором
        let mut colliders = open.colliders().to_vec();
        colliders.push(ColliderEntry::at(
            entity(200),
            Collider::cuboid(0.5, 3.0, 3.0),
            Vec3::new(5.0, 0.0, 0.0),
        ));
        let walled = ColliderWorld::new(colliders);

        let sighting = scan_for_target(
            &observer(&[]),
            [candidate(blocked, blocked_pos), candidate(visible, visible_pos)],
            &walled,
        );
        assert_eq!(sighting.map(|s| s.actor), Some(visible));
    }

    #[test]
    fn test_self_colliders_do_not_block() {
        let target = entity(1);
        let own_shell = entity(300);
        let pos = Vec3::new(8.0, 0.0, 0.0);

        // Собственная оболочка агента вокруг detection source
        let world = ColliderWorld::new(vec![
            ColliderEntry::at(own_shell, Collider::ball(1.0), Vec3::ZERO).owned_by(entity(99)),
            actor_collider(target, 101, pos),
        ]);

        assert!(scan_for_target(&observer(&[]), [candidate(target, pos)], &world).is_none());

        let sighting = scan_for_target(&observer(&[own_shell]), [candidate(target, pos)], &world);
        assert_eq!(sighting.map(|s| s.actor), Some(target));
    }

    #[test]
    fn test_no_hits_means_not_visible() {
        let target = entity(1);
        let pos = Vec3::new(8.0, 0.0, 0.0);
        let empty = ColliderWorld::default();

        assert!(scan_for_target(&observer(&[]), [candidate(target, pos)], &empty).is_none());
    }

    #[test]
    fn test_forgetting_is_idempotent() {
        let mut perception = Perception::default();
        perception.become_aware_of(entity(1), 0.0);

        assert!(!perception.forget_if_expired(4.0, 4.0)); // ровно timeout: ещё помним
        assert!(perception.forget_if_expired(4.1, 4.0));
        assert!(perception.known_target.is_none());

        let snapshot = perception.clone();
        assert!(!perception.forget_if_expired(10.0, 4.0));
        assert_eq!(perception, snapshot);
    }

    #[test]
    fn test_seen_target_not_forgotten() {
        let mut perception = Perception::default();
        perception.apply_scan(
            Some(Sighting {
                actor: entity(1),
                sqr_distance: 1.0,
            }),
            0.0,
        );

        // is_seeing_target с прошлого тика защищает от forget
        assert!(!perception.forget_if_expired(100.0, 4.0));
        assert!(perception.has_known_target());
    }

    #[test]
    fn test_scan_without_sighting_keeps_memory() {
        let mut perception = Perception::default();
        perception.become_aware_of(entity(1), 1.0);

        perception.apply_scan(None, 2.0);
        assert!(!perception.is_seeing_target);
        assert!(perception.has_known_target());
        assert_eq!(perception.time_last_seen, 1.0);
    }

    #[test]
    fn test_transitions_are_symmetric() {
        let mut perception = Perception::default();
        assert_eq!(perception.take_transition(), None);

        perception.become_aware_of(entity(1), 0.0);
        assert_eq!(perception.take_transition(), Some(TargetTransition::Detected));
        assert_eq!(perception.take_transition(), None);

        perception.drop_target();
        assert_eq!(perception.take_transition(), Some(TargetTransition::Lost));
        assert_eq!(perception.take_transition(), None);
    }

    #[test]
    fn test_combat_gate_requires_target() {
        assert!(!CombatGate::evaluate(Vec3::ZERO, None, 10.0).is_target_in_attack_range);
        assert!(CombatGate::evaluate(Vec3::ZERO, Some(Vec3::new(10.0, 0.0, 0.0)), 10.0).is_target_in_attack_range);
        assert!(!CombatGate::evaluate(Vec3::ZERO, Some(Vec3::new(10.5, 0.0, 0.0)), 10.0).is_target_in_attack_range);
    }
}
