use arcade_shooter::collision::{colliding, overlaps, Aabb};
use arcade_shooter::entities::*;

fn boxed(id: u64, x: f64, y: f64, w: f64, h: f64) -> Entity {
    Entity::new(EntityId(id), Vec2::new(x, y), Size::new(w, h), EntityKind::enemy(100.0))
}

// ── overlaps ──────────────────────────────────────────────────────────────────

#[test]
fn touching_edges_do_not_collide() {
    let a = boxed(1, 0.0, 0.0, 50.0, 50.0);
    let b = boxed(2, 50.0, 0.0, 50.0, 50.0);
    assert!(!overlaps(&a, &b));

    let above = boxed(3, 0.0, 50.0, 50.0, 50.0);
    assert!(!overlaps(&a, &above));
}

#[test]
fn one_unit_of_overlap_collides() {
    let a = boxed(1, 0.0, 0.0, 50.0, 50.0);
    let b = boxed(2, 49.0, 0.0, 50.0, 50.0);
    assert!(overlaps(&a, &b));
}

#[test]
fn overlap_is_symmetric() {
    let cases = [
        (boxed(1, 0.0, 0.0, 50.0, 50.0), boxed(2, 49.0, 0.0, 50.0, 50.0)),
        (boxed(1, 0.0, 0.0, 50.0, 50.0), boxed(2, 50.0, 0.0, 50.0, 50.0)),
        (boxed(1, 100.0, 500.0, 9.0, 37.0), boxed(2, 100.0, 505.0, 50.0, 50.0)),
        (boxed(1, 10.0, 10.0, 5.0, 5.0), boxed(2, 0.0, 0.0, 100.0, 100.0)),
        (boxed(1, 0.0, 0.0, 10.0, 10.0), boxed(2, 5.0, 20.0, 10.0, 10.0)),
    ];
    for (a, b) in &cases {
        assert_eq!(overlaps(a, b), overlaps(b, a), "{:?} vs {:?}", a.pos, b.pos);
    }
}

#[test]
fn contained_box_overlaps() {
    let outer = Aabb::new(Vec2::new(0.0, 0.0), Size::new(100.0, 100.0));
    let inner = Aabb::new(Vec2::new(10.0, 10.0), Size::new(5.0, 5.0));
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn separated_on_one_axis_only_does_not_collide() {
    // Same columns, rows apart.
    let a = boxed(1, 0.0, 0.0, 10.0, 10.0);
    let b = boxed(2, 5.0, 20.0, 10.0, 10.0);
    assert!(!overlaps(&a, &b));
}

// ── colliding ─────────────────────────────────────────────────────────────────

#[test]
fn colliding_never_contains_subject() {
    let subject = boxed(1, 0.0, 0.0, 50.0, 50.0);
    let other = boxed(2, 10.0, 10.0, 50.0, 50.0);
    let all = vec![subject.clone(), other];
    let hits = colliding(&subject, &all);
    assert_eq!(hits, vec![EntityId(2)]);
}

#[test]
fn colliding_skips_removed_and_explosions() {
    let subject = boxed(1, 0.0, 0.0, 50.0, 50.0);
    let mut removed = boxed(2, 10.0, 10.0, 50.0, 50.0);
    removed.state = Lifecycle::Removed;
    let explosion = Entity::new(
        EntityId(3),
        Vec2::new(0.0, 0.0),
        Size::new(50.0, 50.0),
        EntityKind::explosion(0.1),
    );
    let live = boxed(4, 20.0, 20.0, 50.0, 50.0);
    let all = vec![subject.clone(), removed, explosion, live];
    assert_eq!(colliding(&subject, &all), vec![EntityId(4)]);
}

#[test]
fn explosion_subject_hits_nothing() {
    let explosion = Entity::new(
        EntityId(1),
        Vec2::new(0.0, 0.0),
        Size::new(50.0, 50.0),
        EntityKind::explosion(0.1),
    );
    let enemy = boxed(2, 0.0, 0.0, 50.0, 50.0);
    assert!(colliding(&explosion, &[enemy]).is_empty());
}

#[test]
fn colliding_keeps_input_order() {
    let subject = boxed(9, 0.0, 0.0, 100.0, 100.0);
    let all = vec![
        boxed(1, 10.0, 10.0, 5.0, 5.0),
        boxed(2, 200.0, 200.0, 5.0, 5.0),
        boxed(3, 20.0, 20.0, 5.0, 5.0),
    ];
    assert_eq!(colliding(&subject, &all), vec![EntityId(1), EntityId(3)]);
}
