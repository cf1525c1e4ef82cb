//! Loot roll при смерти hoverbot'а

use rand::Rng;

/// Решает, дропается ли loot
///
/// - нет prefab'а или drop_rate == 0 → никогда
/// - drop_rate == 1 → всегда (без обращения к RNG)
/// - иначе uniform draw ≤ drop_rate
///
/// drop_rate уже clamp'нут в EnemyConfig::validated.
pub fn try_drop_item(drop_rate: f32, has_loot: bool, rng: &mut impl Rng) -> bool {
    if !has_loot || drop_rate <= 0.0 {
        return false;
    }
    if drop_rate >= 1.0 {
        return true;
    }

    rng.gen::<f32>() <= drop_rate
}
