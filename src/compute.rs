//! Per-entity game rules.
//!
//! `step` runs once per frame for every Active entity; `run_task` runs the
//! timer callbacks. Both mutate the world only through its deferred
//! `add`/`remove` requests and the score, so the registry stays stable while
//! a frame is being stepped.

use tracing::{debug, info};

use crate::entities::{Entity, EntityId, EntityKind, Key};
use crate::world::World;

/// Timer callbacks the world schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    SpawnEnemy,
    /// Player's periodic fire check.
    Fire(EntityId),
    /// One-shot explosion expiry.
    Expire(EntityId),
}

pub fn run_task(task: Task, world: &mut World) {
    match task {
        Task::SpawnEnemy => {
            world.spawn_enemy();
        }
        Task::Fire(player) => fire(player, world),
        Task::Expire(explosion) => world.remove(explosion),
    }
}

/// Advance one entity by `dt` seconds.
///
/// `entity` is the caller's working copy; position changes are written back
/// by the world only if the entity is still Active afterwards.
pub fn step(entity: &mut Entity, dt: f64, world: &mut World) {
    match entity.kind {
        EntityKind::Player { .. } => step_player(entity, dt, world),
        EntityKind::Enemy { speed } => step_enemy(entity, speed, dt, world),
        EntityKind::Bullet { speed } => step_bullet(entity, speed, dt, world),
        EntityKind::Explosion { .. } => step_explosion(entity, dt),
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

fn step_player(player: &mut Entity, dt: f64, world: &World) {
    // Both directions held cancel out; they are not exclusive.
    let step_size = world.config().player_speed * dt;
    if world.is_pressed(Key::Left) {
        player.pos.x -= step_size;
    }
    if world.is_pressed(Key::Right) {
        player.pos.x += step_size;
    }
}

/// Fires while the key is held, once per timer tick, not once per press.
fn fire(player: EntityId, world: &mut World) {
    if !world.is_pressed(Key::Up) {
        return;
    }
    let offset = world.config().muzzle_offset;
    let Some(muzzle) = world
        .entity(player)
        .filter(|p| p.is_active())
        .map(|p| p.pos.offset(offset.x, offset.y))
    else {
        return;
    };
    let bullet = world.add(muzzle, EntityKind::bullet(world.config().bullet_speed));
    debug!(%bullet, x = muzzle.x, y = muzzle.y, "bullet fired");
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

fn step_enemy(enemy: &mut Entity, speed: f64, dt: f64, world: &mut World) {
    if enemy.pos.y < 0.0 {
        debug!(id = %enemy.id, "enemy left the playfield");
        world.remove(enemy.id);
        return;
    }

    // Touching the player only destroys the enemy; the player is unharmed.
    let player = world.player();
    if world.colliding_entities(enemy).contains(&player) {
        world.spawn_explosion(enemy.pos);
        world.remove(enemy.id);
        debug!(id = %enemy.id, "enemy crashed into player");
        return;
    }

    enemy.pos.y -= speed * dt;
}

// ── Bullet ────────────────────────────────────────────────────────────────────

fn step_bullet(bullet: &mut Entity, speed: f64, dt: f64, world: &mut World) {
    if bullet.pos.y > world.config().height {
        debug!(id = %bullet.id, "bullet left the playfield");
        world.remove(bullet.id);
        return;
    }

    // Hits come back in ascending id order, so the oldest enemy wins a tie.
    let target = world
        .colliding_entities(bullet)
        .into_iter()
        .find_map(|id| world.entity(id).filter(|e| e.is_enemy()).map(|e| (id, e.pos)));

    if let Some((enemy, enemy_pos)) = target {
        world.spawn_explosion(enemy_pos);
        world.remove(bullet.id);
        world.remove(enemy);
        world.add_score(1);
        info!(bullet = %bullet.id, %enemy, score = world.score(), "enemy destroyed");
        return;
    }

    bullet.pos.y += speed * dt;
}

// ── Explosion ─────────────────────────────────────────────────────────────────

/// Explosions never move or collide; the expiry timer removes them.
fn step_explosion(explosion: &mut Entity, dt: f64) {
    if let EntityKind::Explosion {
        remaining_lifetime, ..
    } = &mut explosion.kind
    {
        *remaining_lifetime = (*remaining_lifetime - dt).max(0.0);
    }
}
