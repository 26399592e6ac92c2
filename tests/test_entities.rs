use guardian_defense::difficulty::Difficulty;
use guardian_defense::entities::*;

#[test]
fn rect_edges() {
    let r = Rect::new(3, 4, 10, 20);
    assert_eq!(r.left(), 3);
    assert_eq!(r.right(), 13);
    assert_eq!(r.top(), 4);
    assert_eq!(r.bottom(), 24);
}

#[test]
fn level_from_digit() {
    assert_eq!(Level::from_digit(1), Some(Level::Easy));
    assert_eq!(Level::from_digit(4), Some(Level::Frantic));
    assert_eq!(Level::from_digit(0), None);
    assert_eq!(Level::from_digit(5), None);
}

#[test]
fn presets_match_pacing_curve() {
    let easy = Difficulty::for_level(Level::Easy);
    assert_eq!(easy.projectile_spawn_frequency, 3);
    assert_eq!(easy.guardian_speed, 5);
    assert_eq!(easy.enemy_speed, 1);

    let frantic = Difficulty::for_level(Level::Frantic);
    assert_eq!(frantic.projectile_spawn_frequency, 1);
    assert_eq!(frantic.enemy_speed, 10);
    assert_eq!(frantic.avatar_speed, 1);
    assert_eq!(frantic.projectile_speed, 7);
}

#[test]
fn later_outcome_replaces_earlier() {
    assert_eq!(Outcome::None.then(Outcome::Won), Outcome::Won);
    assert_eq!(Outcome::Won.then(Outcome::None), Outcome::Won);
    assert_eq!(Outcome::Won.then(Outcome::Lost), Outcome::Lost);
}

#[test]
fn actors_start_where_expected() {
    let avatar = Avatar::new();
    assert_eq!((avatar.x, avatar.y), (0, 10));
    assert_eq!(avatar.rect(), Rect::new(0, 10, Avatar::WIDTH, Avatar::HEIGHT));

    let guardian = Guardian::new();
    assert_eq!((guardian.x, guardian.y), Guardian::SENTINEL);
    assert!(!guardian.deployed);

    let enemy = Enemy::at(0, 250);
    assert!(enemy.facing_right);
    assert_eq!(enemy.vx, 1);
}

#[test]
fn idle_projectile_is_parked() {
    let p = Projectile::idle(ProjectileId(4));
    assert_eq!(p.id, ProjectileId(4));
    assert_eq!((p.x, p.y), Projectile::SENTINEL);
    assert!(p.available());
    assert!(!p.activated());
    assert_eq!(p.acceleration_ticks, 0);
    assert_eq!(p.velocity_from_acceleration, 0);
}
