//! All simulation entity types — pure data, no logic.
//!
//! Coordinates follow the playfield convention: the origin is the bottom-left
//! corner, `x` grows rightward and `y` grows upward. An entity's `pos` is the
//! bottom-left corner of its bounding box.

use std::fmt;

use crate::schedule::TimerHandle;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ── Identity & input ──────────────────────────────────────────────────────────

/// Creation-ordered entity identifier. Lower ids were created earlier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Logical key identifiers read by entity update logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
}

// ── Visuals ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Background,
    Player,
    Enemy,
    Bullet,
    Explosion,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 5] = [
        SpriteKind::Background,
        SpriteKind::Player,
        SpriteKind::Enemy,
        SpriteKind::Bullet,
        SpriteKind::Explosion,
    ];

    /// Logical asset name used by the asset resolver.
    pub fn asset_name(self) -> &'static str {
        match self {
            SpriteKind::Background => "background",
            SpriteKind::Player => "player",
            SpriteKind::Enemy => "enemy",
            SpriteKind::Bullet => "bullet",
            SpriteKind::Explosion => "explosion",
        }
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// `Active → Removed`, one way. Removed is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Removed,
}

// ── Variants ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    Player {
        /// Periodic fire callback owned by the player.
        fire_timer: Option<TimerHandle>,
    },
    Enemy {
        /// Downward velocity magnitude.
        speed: f64,
    },
    Bullet {
        /// Upward velocity magnitude.
        speed: f64,
    },
    Explosion {
        /// Seconds left before the expiry timer fires.
        remaining_lifetime: f64,
        expiry_timer: Option<TimerHandle>,
    },
}

impl EntityKind {
    pub fn player() -> Self {
        EntityKind::Player { fire_timer: None }
    }

    pub fn enemy(speed: f64) -> Self {
        debug_assert!(speed > 0.0, "enemy speed must be positive");
        EntityKind::Enemy { speed }
    }

    pub fn bullet(speed: f64) -> Self {
        debug_assert!(speed > 0.0, "bullet speed must be positive");
        EntityKind::Bullet { speed }
    }

    pub fn explosion(lifetime: f64) -> Self {
        EntityKind::Explosion {
            remaining_lifetime: lifetime,
            expiry_timer: None,
        }
    }

    pub fn sprite(&self) -> SpriteKind {
        match self {
            EntityKind::Player { .. } => SpriteKind::Player,
            EntityKind::Enemy { .. } => SpriteKind::Enemy,
            EntityKind::Bullet { .. } => SpriteKind::Bullet,
            EntityKind::Explosion { .. } => SpriteKind::Explosion,
        }
    }

    /// Timer this entity registered and must cancel on removal, if any.
    pub fn owned_timer(&self) -> Option<TimerHandle> {
        match self {
            EntityKind::Player { fire_timer } => *fire_timer,
            EntityKind::Explosion { expiry_timer, .. } => *expiry_timer,
            EntityKind::Enemy { .. } | EntityKind::Bullet { .. } => None,
        }
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Size,
    pub state: Lifecycle,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: EntityId, pos: Vec2, size: Size, kind: EntityKind) -> Self {
        debug_assert!(size.width > 0.0 && size.height > 0.0);
        Self {
            id,
            pos,
            size,
            state: Lifecycle::Active,
            kind,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == Lifecycle::Active
    }

    pub fn sprite(&self) -> SpriteKind {
        self.kind.sprite()
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player { .. })
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy { .. })
    }

    pub fn is_explosion(&self) -> bool {
        matches!(self.kind, EntityKind::Explosion { .. })
    }
}
