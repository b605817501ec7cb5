use arcade_shooter::entities::*;

fn enemy_at(x: f64, y: f64) -> Entity {
    Entity::new(EntityId(7), Vec2::new(x, y), Size::new(50.0, 50.0), EntityKind::enemy(120.0))
}

#[test]
fn new_entities_start_active() {
    let e = enemy_at(1.0, 2.0);
    assert_eq!(e.state, Lifecycle::Active);
    assert!(e.is_active());
    assert!(e.is_enemy());
    assert!(!e.is_player());
    assert!(!e.is_explosion());
}

#[test]
fn sprites_follow_the_variant() {
    assert_eq!(EntityKind::player().sprite(), SpriteKind::Player);
    assert_eq!(EntityKind::enemy(100.0).sprite(), SpriteKind::Enemy);
    assert_eq!(EntityKind::bullet(200.0).sprite(), SpriteKind::Bullet);
    assert_eq!(EntityKind::explosion(0.1).sprite(), SpriteKind::Explosion);
}

#[test]
fn asset_names_are_unique() {
    let mut names: Vec<&str> = SpriteKind::ALL.iter().map(|k| k.asset_name()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), SpriteKind::ALL.len());
    assert!(names.contains(&"background"));
}

#[test]
fn only_timer_owners_report_a_timer() {
    assert_eq!(EntityKind::enemy(100.0).owned_timer(), None);
    assert_eq!(EntityKind::bullet(100.0).owned_timer(), None);
    // Not yet registered with a world.
    assert_eq!(EntityKind::player().owned_timer(), None);
    assert_eq!(EntityKind::explosion(0.1).owned_timer(), None);
}

#[test]
fn entity_clone_is_independent() {
    let original = enemy_at(10.0, 20.0);
    let mut cloned = original.clone();
    cloned.pos.x = 99.0;
    cloned.state = Lifecycle::Removed;
    assert_eq!(original.pos.x, 10.0);
    assert!(original.is_active());
}

#[test]
fn ids_order_by_creation() {
    assert!(EntityId(1) < EntityId(2));
    assert_eq!(EntityId(3).to_string(), "#3");
}

#[test]
fn offset_moves_both_axes() {
    assert_eq!(Vec2::new(400.0, 0.0).offset(20.0, 50.0), Vec2::new(420.0, 50.0));
}

#[test]
fn only_movement_and_fire_keys_exist() {
    // Adding a variant makes this match non-exhaustive and fails the build.
    for key in [Key::Left, Key::Right, Key::Up] {
        let name = match key {
            Key::Left => "left",
            Key::Right => "right",
            Key::Up => "up",
        };
        assert!(!name.is_empty());
    }
}
