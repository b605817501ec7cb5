//! Sprite resolution.
//!
//! Maps each logical sprite name to glyph art for the terminal. A sprite
//! directory holds one `<name>.txt` per sprite; every sprite must resolve or
//! loading fails.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::entities::SpriteKind;
use crate::error::AssetError;

/// Lines of text drawn top-down from a sprite's top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub lines: Vec<String>,
}

impl Glyph {
    fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|l| l.trim_end().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        Self { lines }
    }

    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Clone, Debug)]
pub struct AssetResolver {
    glyphs: HashMap<SpriteKind, Glyph>,
}

impl AssetResolver {
    pub fn builtin() -> Self {
        let glyphs = SpriteKind::ALL
            .iter()
            .map(|&kind| (kind, Glyph::parse(builtin_art(kind))))
            .collect();
        Self { glyphs }
    }

    pub fn load_dir(dir: &Path) -> Result<Self, AssetError> {
        let mut glyphs = HashMap::new();
        for kind in SpriteKind::ALL {
            let name = kind.asset_name();
            let path = dir.join(format!("{}.txt", name));
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    return Err(AssetError::Missing { name, path });
                }
                Err(source) => {
                    return Err(AssetError::Unreadable { name, path, source });
                }
            };
            let glyph = Glyph::parse(&text);
            if glyph.lines.is_empty() {
                return Err(AssetError::Empty { name, path });
            }
            glyphs.insert(kind, glyph);
        }
        Ok(Self { glyphs })
    }

    pub fn glyph(&self, kind: SpriteKind) -> &Glyph {
        // Both constructors fill every kind.
        &self.glyphs[&kind]
    }
}

fn builtin_art(kind: SpriteKind) -> &'static str {
    match kind {
        SpriteKind::Background => ".",
        SpriteKind::Player => " ▲\n/█\\",
        SpriteKind::Enemy => "«▼»\n╚═╝",
        SpriteKind::Bullet => "║",
        SpriteKind::Explosion => "\\|/\n-*-\n/|\\",
    }
}
