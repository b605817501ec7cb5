//! The world: entity registry, input state, score and the frame loop.
//!
//! Registry mutations requested while a frame or timer callback runs are
//! buffered and committed once it finishes (two-phase update). Removal marks
//! an entity `Removed` straight away, so nothing stepped later in the same
//! pass can see or hit it.

use std::collections::{BTreeMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::collision;
use crate::compute::{self, Task};
use crate::config::WorldConfig;
use crate::entities::{Entity, EntityId, EntityKind, Key, Lifecycle, Vec2};
use crate::render::{score_text, Primitive, RenderOp};
use crate::schedule::Scheduler;

pub struct World {
    config: WorldConfig,
    score: u32,
    /// Ordered by id, which is also creation order.
    entities: BTreeMap<EntityId, Entity>,
    pressed_keys: HashSet<Key>,
    player: EntityId,
    next_id: u64,
    pending_add: Vec<Entity>,
    pending_remove: Vec<EntityId>,
    scheduler: Scheduler<Task>,
    rng: StdRng,
    render_ops: Vec<RenderOp>,
}

impl World {
    /// A fresh session: score 0, the player, and the enemy spawn timer.
    pub fn new(config: WorldConfig, rng: StdRng) -> Self {
        let mut world = Self {
            config,
            score: 0,
            entities: BTreeMap::new(),
            pressed_keys: HashSet::new(),
            player: EntityId(0),
            next_id: 0,
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            scheduler: Scheduler::new(),
            rng,
            render_ops: Vec::new(),
        };

        world.scheduler.schedule_repeating(config.spawn_interval, Task::SpawnEnemy);
        world.player = world.add(config.player_start, EntityKind::player());
        world.commit();
        world.render_ops.push(RenderOp::Score {
            text: score_text(0),
            pos: config.score_anchor,
        });

        info!(
            width = config.width,
            height = config.height,
            player = %world.player,
            "world created"
        );
        world
    }

    pub fn with_seed(config: WorldConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    // ── Frame loop ────────────────────────────────────────────────────────────

    /// One rendered frame: timer callbacks due within `dt`, then the tick.
    pub fn advance(&mut self, dt: f64) {
        self.run_timers(dt);
        self.update(dt);
    }

    /// The frame tick. Steps every entity that is Active at the start of the
    /// tick, in id order, then commits queued additions and removals.
    pub fn update(&mut self, dt: f64) {
        let snapshot: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.is_active())
            .map(|e| e.id)
            .collect();

        for id in snapshot {
            // Skip anything removed earlier in this pass.
            let Some(mut entity) = self.entities.get(&id).filter(|e| e.is_active()).cloned()
            else {
                continue;
            };
            let before = entity.pos;
            compute::step(&mut entity, dt, self);

            if let Some(live) = self.entities.get_mut(&id) {
                if live.is_active() {
                    let pos = entity.pos;
                    *live = entity;
                    if pos != before {
                        self.render_ops.push(RenderOp::Move { id, pos });
                    }
                }
            }
        }

        self.commit();
    }

    /// Moves the simulated clock on by `dt`, running every due callback in
    /// deadline order and committing after each one.
    pub fn run_timers(&mut self, dt: f64) {
        let until = self.scheduler.now() + dt;
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            compute::run_task(task, self);
            self.commit();
        }
        self.scheduler.settle(until);
    }

    /// Applies queued removals, then queued additions.
    pub fn commit(&mut self) {
        for id in self.pending_remove.drain(..) {
            if self.entities.remove(&id).is_some() {
                self.render_ops.push(RenderOp::Remove { id });
            }
        }
        for entity in self.pending_add.drain(..) {
            self.render_ops.push(RenderOp::Add {
                id: entity.id,
                primitive: Primitive {
                    sprite: entity.sprite(),
                    pos: entity.pos,
                    size: entity.size,
                },
            });
            self.entities.insert(entity.id, entity);
        }
    }

    // ── Registry ──────────────────────────────────────────────────────────────

    /// Queues a new entity; it becomes Active and visible at the next commit.
    /// Players get their fire timer and explosions their expiry timer here.
    pub fn add(&mut self, pos: Vec2, mut kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        match &mut kind {
            EntityKind::Player { fire_timer } => {
                debug_assert!(
                    !self.entities.values().chain(&self.pending_add).any(Entity::is_player),
                    "a session has exactly one player"
                );
                *fire_timer = Some(
                    self.scheduler
                        .schedule_repeating(self.config.fire_interval, Task::Fire(id)),
                );
            }
            EntityKind::Explosion {
                remaining_lifetime,
                expiry_timer,
            } => {
                *expiry_timer = Some(
                    self.scheduler
                        .schedule_once(*remaining_lifetime, Task::Expire(id)),
                );
            }
            EntityKind::Enemy { .. } | EntityKind::Bullet { .. } => {}
        }

        let size = match kind {
            EntityKind::Bullet { .. } => self.config.bullet_size,
            _ => self.config.entity_size,
        };
        self.pending_add.push(Entity::new(id, pos, size, kind));
        id
    }

    /// Transitions an entity to Removed and cancels the timer it owns.
    /// Unknown or already-removed ids are ignored.
    pub fn remove(&mut self, id: EntityId) {
        if let Some(index) = self.pending_add.iter().position(|e| e.id == id) {
            let entity = self.pending_add.remove(index);
            if let Some(timer) = entity.kind.owned_timer() {
                self.scheduler.cancel(timer);
            }
            return;
        }

        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        if !entity.is_active() {
            return;
        }
        entity.state = Lifecycle::Removed;
        if let Some(timer) = entity.kind.owned_timer() {
            self.scheduler.cancel(timer);
        }
        self.pending_remove.push(id);
    }

    /// Every Active, non-explosion entity overlapping `subject`, ascending id.
    pub fn colliding_entities(&self, subject: &Entity) -> Vec<EntityId> {
        collision::colliding(subject, self.entities.values())
    }

    pub fn spawn_enemy(&mut self) -> EntityId {
        let x = self.rng.gen_range(0.0..=self.config.width);
        let speed = self
            .rng
            .gen_range(self.config.enemy_speed_min..=self.config.enemy_speed_max);
        let id = self.add(Vec2::new(x, self.config.height), EntityKind::enemy(speed));
        debug!(%id, x, speed, "enemy spawned");
        id
    }

    pub fn spawn_explosion(&mut self, pos: Vec2) -> EntityId {
        self.add(pos, EntityKind::explosion(self.config.explosion_lifetime))
    }

    // Between a `remove` and the next commit the registry still holds the
    // Removed entity; the accessors below only ever report Active ones.

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id).filter(|e| e.is_active())
    }

    /// Active entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(|e| e.is_active())
    }

    pub fn len(&self) -> usize {
        self.entities().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entities().next().is_none()
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    // ── Score ─────────────────────────────────────────────────────────────────

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Write-through: the overlay is refreshed on every change.
    pub fn set_score(&mut self, value: u32) {
        debug_assert!(value >= self.score, "score never decreases");
        self.score = value.max(self.score);
        self.render_ops.push(RenderOp::Score {
            text: score_text(self.score),
            pos: self.config.score_anchor,
        });
    }

    pub fn add_score(&mut self, points: u32) {
        self.set_score(self.score.saturating_add(points));
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn key_down(&mut self, key: Key) {
        self.pressed_keys.insert(key);
    }

    /// Releasing a key that is not held is a no-op.
    pub fn key_up(&mut self, key: Key) {
        self.pressed_keys.remove(&key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler<Task> {
        &self.scheduler
    }

    /// Simulated seconds since the session began.
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    pub fn take_render_ops(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.render_ops)
    }
}
