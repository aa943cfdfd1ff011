use std::fmt;

/// A renderable glyph resolved from an icon name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub key: &'static str,
    pub symbol: &'static str,
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Glyph({})", self.key)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// Used for missing or unknown icon names.
pub const DEFAULT_GLYPH: Glyph = Glyph {
    key: "default",
    symbol: "•",
};

pub const GLYPHS: &[Glyph] = &[
    Glyph { key: "dashboard", symbol: "▦" },
    Glyph { key: "course", symbol: "▤" },
    Glyph { key: "lesson", symbol: "▸" },
    Glyph { key: "book", symbol: "❐" },
    Glyph { key: "add", symbol: "+" },
    Glyph { key: "list", symbol: "≡" },
    Glyph { key: "users", symbol: "☷" },
    Glyph { key: "user", symbol: "☺" },
    Glyph { key: "roles", symbol: "⚑" },
    Glyph { key: "media", symbol: "▣" },
    Glyph { key: "blog", symbol: "✎" },
    Glyph { key: "page", symbol: "▯" },
    Glyph { key: "mail", symbol: "✉" },
    Glyph { key: "chart", symbol: "▲" },
    Glyph { key: "payment", symbol: "$" },
    Glyph { key: "settings", symbol: "⚙" },
    Glyph { key: "profile", symbol: "◉" },
];

/// Look up a glyph by name. Exact match first, then case-insensitive.
pub fn resolve_icon(name: Option<&str>) -> Glyph {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return DEFAULT_GLYPH;
    };
    GLYPHS
        .iter()
        .find(|g| g.key == name)
        .or_else(|| GLYPHS.iter().find(|g| g.key.eq_ignore_ascii_case(name)))
        .copied()
        .unwrap_or(DEFAULT_GLYPH)
}
