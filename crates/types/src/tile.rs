//! Tile kinds and their physical capabilities.
//!
//! Every type-specific rule of the simulation lives in [`rules`]. Resolvers never
//! branch on a tile kind to decide what it can do; they ask the capability table.

/// The closed set of things a board cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Indestructible boundary wall ("hard sand" in the level art).
    HardWall,
    Granite,
    SoftSand,
    Background,
    Bomb,
    Orb,
    Rock,
    Portal,
    Player,
    Mummy,
}

/// Capability facts resolved by kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_fall: bool,
    pub can_explode: bool,
    explodes_on: &'static [TileKind],
    can_move_into: &'static [TileKind],
}

impl Capabilities {
    /// Whether this tile, while falling, detonates when it lands on `other`.
    pub fn explodes_on(&self, other: TileKind) -> bool {
        self.explodes_on.contains(&other)
    }

    /// Whether a mover of this kind may step onto (or fall into) `other`.
    pub fn can_move_into(&self, other: TileKind) -> bool {
        self.can_move_into.contains(&other)
    }
}

const NOTHING: &[TileKind] = &[];

const BOMB_LANDINGS: &[TileKind] = &[
    TileKind::HardWall,
    TileKind::Granite,
    TileKind::SoftSand,
    TileKind::Bomb,
    TileKind::Orb,
    TileKind::Rock,
    TileKind::Portal,
    TileKind::Player,
    TileKind::Mummy,
];

const HEAVY_LANDINGS: &[TileKind] = &[TileKind::Bomb, TileKind::Player, TileKind::Mummy];

/// Capability table.
pub const fn rules(kind: TileKind) -> Capabilities {
    match kind {
        TileKind::HardWall | TileKind::Background | TileKind::Portal => Capabilities {
            can_fall: false,
            can_explode: false,
            explodes_on: NOTHING,
            can_move_into: NOTHING,
        },
        TileKind::Granite | TileKind::SoftSand => Capabilities {
            can_fall: false,
            can_explode: true,
            explodes_on: NOTHING,
            can_move_into: NOTHING,
        },
        TileKind::Bomb => Capabilities {
            can_fall: true,
            can_explode: true,
            explodes_on: BOMB_LANDINGS,
            can_move_into: &[TileKind::Background],
        },
        TileKind::Orb => Capabilities {
            can_fall: true,
            can_explode: true,
            explodes_on: HEAVY_LANDINGS,
            can_move_into: &[TileKind::Background, TileKind::Portal],
        },
        TileKind::Rock => Capabilities {
            can_fall: true,
            can_explode: true,
            explodes_on: HEAVY_LANDINGS,
            can_move_into: &[TileKind::Background],
        },
        TileKind::Player => Capabilities {
            can_fall: false,
            can_explode: true,
            explodes_on: NOTHING,
            can_move_into: &[
                TileKind::SoftSand,
                TileKind::Background,
                TileKind::Bomb,
                TileKind::Orb,
                TileKind::Rock,
                TileKind::Mummy,
            ],
        },
        TileKind::Mummy => Capabilities {
            can_fall: false,
            can_explode: true,
            explodes_on: NOTHING,
            can_move_into: &[TileKind::Background, TileKind::Player],
        },
    }
}

impl TileKind {
    pub const ALL: [TileKind; 10] = [
        TileKind::HardWall,
        TileKind::Granite,
        TileKind::SoftSand,
        TileKind::Background,
        TileKind::Bomb,
        TileKind::Orb,
        TileKind::Rock,
        TileKind::Portal,
        TileKind::Player,
        TileKind::Mummy,
    ];

    #[inline]
    pub fn rules(self) -> Capabilities {
        rules(self)
    }

    #[inline]
    pub fn can_fall(self) -> bool {
        rules(self).can_fall
    }

    #[inline]
    pub fn can_explode(self) -> bool {
        rules(self).can_explode
    }

    #[inline]
    pub fn explodes_on(self, other: TileKind) -> bool {
        rules(self).explodes_on(other)
    }

    #[inline]
    pub fn can_move_into(self, other: TileKind) -> bool {
        rules(self).can_move_into(other)
    }

    /// Detonators chain a neighboring explosion into a new 3x3 blast.
    pub fn is_detonator(self) -> bool {
        matches!(self, TileKind::Bomb | TileKind::Mummy)
    }

    /// Objects the player can shove.
    pub fn is_pushable(self) -> bool {
        matches!(self, TileKind::Bomb | TileKind::Orb | TileKind::Rock)
    }

    /// Map a level-art image stem (`"bomb"`, `"guy"`, ...) to a kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use crypt_raider_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_image_stem("guy"), Some(TileKind::Player));
    /// assert_eq!(TileKind::from_image_stem("hardSand"), Some(TileKind::HardWall));
    /// assert_eq!(TileKind::from_image_stem("lava"), None);
    /// ```
    pub fn from_image_stem(stem: &str) -> Option<Self> {
        match stem {
            "hardSand" => Some(TileKind::HardWall),
            "granite" => Some(TileKind::Granite),
            "softSand" => Some(TileKind::SoftSand),
            "background" => Some(TileKind::Background),
            "bomb" => Some(TileKind::Bomb),
            "orb" => Some(TileKind::Orb),
            "rock" => Some(TileKind::Rock),
            "portal" => Some(TileKind::Portal),
            "guy" => Some(TileKind::Player),
            "mummy" => Some(TileKind::Mummy),
            _ => None,
        }
    }

    /// Image stem used by level files.
    pub fn image_stem(self) -> &'static str {
        match self {
            TileKind::HardWall => "hardSand",
            TileKind::Granite => "granite",
            TileKind::SoftSand => "softSand",
            TileKind::Background => "background",
            TileKind::Bomb => "bomb",
            TileKind::Orb => "orb",
            TileKind::Rock => "rock",
            TileKind::Portal => "portal",
            TileKind::Player => "guy",
            TileKind::Mummy => "mummy",
        }
    }

    /// Single-character glyph used by ASCII fixtures.
    pub fn glyph(self) -> char {
        match self {
            TileKind::HardWall => 'H',
            TileKind::Granite => 'G',
            TileKind::SoftSand => 'S',
            TileKind::Background => '.',
            TileKind::Bomb => 'B',
            TileKind::Orb => 'O',
            TileKind::Rock => 'R',
            TileKind::Portal => 'P',
            TileKind::Player => 'U',
            TileKind::Mummy => 'M',
        }
    }

    pub fn from_glyph(ch: char) -> Option<Self> {
        TileKind::ALL.into_iter().find(|k| k.glyph() == ch)
    }
}
