//! Renderer collaborator interface.
//!
//! The world never draws. It queues [`RenderOp`]s which a front end drains
//! and feeds to its [`Renderer`] with [`apply`].

use crate::entities::{EntityId, Size, SpriteKind, Vec2};

/// One drawable image tied to an entity's visual.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub sprite: SpriteKind,
    pub pos: Vec2,
    pub size: Size,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderOp {
    Add { id: EntityId, primitive: Primitive },
    Move { id: EntityId, pos: Vec2 },
    Remove { id: EntityId },
    Score { text: String, pos: Vec2 },
}

pub trait Renderer {
    fn add(&mut self, id: EntityId, primitive: Primitive);
    fn update(&mut self, id: EntityId, pos: Vec2);
    fn remove(&mut self, id: EntityId);
    fn set_text(&mut self, text: &str, pos: Vec2);
}

pub fn apply<R, I>(renderer: &mut R, ops: I)
where
    R: Renderer + ?Sized,
    I: IntoIterator<Item = RenderOp>,
{
    for op in ops {
        match op {
            RenderOp::Add { id, primitive } => renderer.add(id, primitive),
            RenderOp::Move { id, pos } => renderer.update(id, pos),
            RenderOp::Remove { id } => renderer.remove(id),
            RenderOp::Score { text, pos } => renderer.set_text(&text, pos),
        }
    }
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}
