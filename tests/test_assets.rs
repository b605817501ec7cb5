use std::fs;

use arcade_shooter::assets::AssetResolver;
use arcade_shooter::entities::SpriteKind;
use arcade_shooter::AssetError;

fn write_all(dir: &std::path::Path) {
    for kind in SpriteKind::ALL {
        fs::write(dir.join(format!("{}.txt", kind.asset_name())), "#\n").unwrap();
    }
}

#[test]
fn builtin_resolves_every_sprite() {
    let assets = AssetResolver::builtin();
    for kind in SpriteKind::ALL {
        assert!(assets.glyph(kind).height() > 0, "{:?}", kind);
        assert!(assets.glyph(kind).width() > 0, "{:?}", kind);
    }
}

#[test]
fn load_dir_reads_each_sprite() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    fs::write(dir.path().join("enemy.txt"), "<o>\n/ \\\n\n").unwrap();

    let assets = AssetResolver::load_dir(dir.path()).unwrap();
    let enemy = assets.glyph(SpriteKind::Enemy);
    assert_eq!(enemy.lines, vec!["<o>", "/ \\"]);
    assert_eq!(enemy.width(), 3);
    assert_eq!(enemy.height(), 2);
}

#[test]
fn missing_sprite_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    fs::remove_file(dir.path().join("explosion.txt")).unwrap();

    let err = AssetResolver::load_dir(dir.path()).unwrap_err();
    match err {
        AssetError::Missing { name, path } => {
            assert_eq!(name, "explosion");
            assert_eq!(path, dir.path().join("explosion.txt"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_sprite_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    fs::write(dir.path().join("bullet.txt"), "\n  \n").unwrap();

    let err = AssetResolver::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, AssetError::Empty { name: "bullet", .. }));
}

#[test]
fn shipped_assets_load() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let assets = AssetResolver::load_dir(&dir).unwrap();
    assert_eq!(assets.glyph(SpriteKind::Bullet).lines, vec!["║"]);
}
