use std::fs;
use std::path::Path;

use guardian_defense::assets::load_sprites;
use guardian_defense::error::GameError;

const NAMES: [&str; 7] = ["avatar", "guardian", "enemy", "projectile", "title", "won", "lost"];

fn write_all(dir: &Path) {
    for name in NAMES {
        fs::write(dir.join(format!("{name}.txt")), format!("<{name}>\n\n")).expect("write sprite");
    }
}

#[test]
fn complete_directory_loads_cleanly() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_all(dir.path());

    let loaded = load_sprites(dir.path());
    assert!(loaded.is_complete());
    assert!(loaded.unavailable().is_none());
    // Trailing blank lines are dropped
    assert_eq!(loaded.sprites.avatar.lines, vec!["<avatar>".to_string()]);
    assert_eq!(loaded.sprites.avatar.width(), 8);
}

#[test]
fn each_missing_sprite_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_all(dir.path());
    fs::remove_file(dir.path().join("enemy.txt")).expect("remove");
    fs::remove_file(dir.path().join("won.txt")).expect("remove");

    let loaded = load_sprites(dir.path());
    assert_eq!(loaded.failures.len(), 2);
    assert!(loaded
        .failures
        .iter()
        .all(|e| matches!(e, GameError::Asset { name: "enemy" | "won", .. })));
    // Placeholders keep the set drawable
    assert_eq!(loaded.sprites.enemy.lines.len(), 1);
    assert!(matches!(loaded.unavailable(), Some(GameError::AssetsUnavailable { count: 2 })));
}

#[test]
fn blank_sprite_counts_as_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_all(dir.path());
    fs::write(dir.path().join("guardian.txt"), "\n   \n").expect("write");

    let loaded = load_sprites(dir.path());
    assert_eq!(loaded.failures.len(), 1);
    assert!(matches!(loaded.failures[0], GameError::EmptyAsset { name: "guardian", .. }));
}

#[test]
fn bundled_assets_are_complete() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    assert!(load_sprites(&dir).is_complete());
}
