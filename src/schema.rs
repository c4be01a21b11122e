use serde::{Deserialize, Serialize};

/// Watch-list position categories. Each one has its own statistics table and join key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    CentreBack,
    FullBack,
    DefensiveMid,
    Midfielder,
    AttackingMid,
    Winger,
    InvertedWinger,
    Striker,
}

impl Position {
    pub const ALL: [Position; 9] = [
        Position::Goalkeeper,
        Position::CentreBack,
        Position::FullBack,
        Position::DefensiveMid,
        Position::Midfielder,
        Position::AttackingMid,
        Position::Winger,
        Position::InvertedWinger,
        Position::Striker,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Position::Goalkeeper => "goalkeeper",
            Position::CentreBack => "centre-back",
            Position::FullBack => "full-back",
            Position::DefensiveMid => "defensive-mid",
            Position::Midfielder => "midfielder",
            Position::AttackingMid => "attacking-mid",
            Position::Winger => "winger",
            Position::InvertedWinger => "inverted-winger",
            Position::Striker => "striker",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::CentreBack => "Centre-back",
            Position::FullBack => "Full-back",
            Position::DefensiveMid => "Defensive mid",
            Position::Midfielder => "Midfielder",
            Position::AttackingMid => "Attacking mid",
            Position::Winger => "Winger",
            Position::InvertedWinger => "Inverted winger",
            Position::Striker => "Striker",
        }
    }

    pub fn from_slug(raw: &str) -> Option<Position> {
        let s = raw.trim().to_ascii_lowercase();
        Position::ALL.into_iter().find(|p| p.slug() == s)
    }

    pub fn next(self) -> Position {
        let idx = Position::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Position::ALL[(idx + 1) % Position::ALL.len()]
    }

    pub fn prev(self) -> Position {
        let idx = Position::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Position::ALL[(idx + Position::ALL.len() - 1) % Position::ALL.len()]
    }

    pub fn schema(self) -> &'static PositionSchema {
        match self {
            Position::Goalkeeper => &GOALKEEPER,
            Position::CentreBack => &CENTRE_BACK,
            Position::FullBack => &FULL_BACK,
            Position::DefensiveMid => &DEFENSIVE_MID,
            Position::Midfielder => &MIDFIELDER,
            Position::AttackingMid => &ATTACKING_MID,
            Position::Winger => &WINGER,
            Position::InvertedWinger => &INVERTED_WINGER,
            Position::Striker => &STRIKER,
        }
    }
}

pub const PLAYER_ID_FIELD: &str = "player_id";
pub const PLAYER_NAME_FIELD: &str = "oyuncu_isim";
pub const TEAM_NAME_FIELD: &str = "takim_adi";

/// Season aggregates every statistics table carries.
pub const BASE_STAT_FIELDS: &[&str] = &[
    PLAYER_ID_FIELD,
    "yas",
    "mac_sayisi",
    "dakika",
    "gol",
    "asist",
    "katsayi",
    "performans_puani",
    "genel_sira",
    "pozisyon_sira",
];

/// How one position's two source tables line up.
#[derive(Debug)]
pub struct PositionSchema {
    pub position: Position,
    /// Natural key shared by the watch-list and the statistics table.
    pub join_key_field: &'static str,
    pub statistics_path: &'static str,
    pub graphic_path: &'static str,
    /// Position-specific statistics fields on top of [`BASE_STAT_FIELDS`].
    pub stat_fields: &'static [&'static str],
    /// Per-90 / ratio fields only the graphic table provides.
    pub graphic_fields: &'static [&'static str],
    /// Graphic field -> statistics field used when no graphic row matches.
    pub default_fields: &'static [(&'static str, &'static str)],
}

impl PositionSchema {
    pub fn declared_numeric_fields(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::with_capacity(
            BASE_STAT_FIELDS.len() + self.stat_fields.len() + self.graphic_fields.len(),
        );
        for field in BASE_STAT_FIELDS
            .iter()
            .chain(self.stat_fields)
            .chain(self.graphic_fields)
        {
            if !out.contains(field) {
                out.push(*field);
            }
        }
        out
    }
}

static GOALKEEPER: PositionSchema = PositionSchema {
    position: Position::Goalkeeper,
    join_key_field: "blabla_kl",
    statistics_path: "/api/statistics/goalkeeper",
    graphic_path: "/api/graphic/goalkeeper",
    stat_fields: &[
        "kurtaris",
        "kurtaris_yuzde",
        "yenilen_gol",
        "gol_yemeden",
        "xga_fark",
        "pas_isabet",
    ],
    graphic_fields: &["Kurtaris%", "YenilenGol/90", "Pas%", "UzunPas%", "CikisTop/90"],
    default_fields: &[
        ("Kurtaris%", "kurtaris_yuzde"),
        ("Pas%", "pas_isabet"),
    ],
};

static CENTRE_BACK: PositionSchema = PositionSchema {
    position: Position::CentreBack,
    join_key_field: "blabla_stp",
    statistics_path: "/api/statistics/centre-back",
    graphic_path: "/api/graphic/centre-back",
    stat_fields: &[
        "sutengllmeMB",
        "hava_topu_kazanma",
        "top_kazanma",
        "mudahale",
        "uzaklastirma",
        "pas_isabet",
    ],
    graphic_fields: &[
        "KazanTop/90",
        "HavaTop%",
        "Eng/90",
        "Mudahale/90",
        "Pas%",
        "IleriPas/90",
    ],
    default_fields: &[
        ("Eng/90", "sutengllmeMB"),
        ("HavaTop%", "hava_topu_kazanma"),
        ("Pas%", "pas_isabet"),
    ],
};

static FULL_BACK: PositionSchema = PositionSchema {
    position: Position::FullBack,
    join_key_field: "blabla_bek",
    statistics_path: "/api/statistics/full-back",
    graphic_path: "/api/graphic/full-back",
    stat_fields: &[
        "orta",
        "basarili_orta",
        "top_kazanma",
        "ileri_tasima",
        "mudahale",
        "pas_isabet",
    ],
    graphic_fields: &[
        "Orta/90",
        "Orta%",
        "KazanTop/90",
        "Dripling/90",
        "Mudahale/90",
        "Pas%",
    ],
    default_fields: &[("Pas%", "pas_isabet")],
};

static DEFENSIVE_MID: PositionSchema = PositionSchema {
    position: Position::DefensiveMid,
    join_key_field: "blabla_dos",
    statistics_path: "/api/statistics/defensive-mid",
    graphic_path: "/api/graphic/defensive-mid",
    stat_fields: &[
        "top_kazanma",
        "mudahale",
        "pas_isabet",
        "ileri_pas",
        "ikili_mucadele",
    ],
    graphic_fields: &[
        "KazanTop/90",
        "Mudahale/90",
        "Pas%",
        "IleriPas/90",
        "Ikili%",
        "Faul/90",
    ],
    default_fields: &[("Pas%", "pas_isabet"), ("Ikili%", "ikili_mucadele")],
};

static MIDFIELDER: PositionSchema = PositionSchema {
    position: Position::Midfielder,
    join_key_field: "blabla_mo",
    statistics_path: "/api/statistics/midfielder",
    graphic_path: "/api/graphic/midfielder",
    stat_fields: &["pas_isabet", "kilit_pas", "ileri_pas", "top_kazanma", "xa"],
    graphic_fields: &[
        "Pas%",
        "KilitPas/90",
        "IleriPas/90",
        "KazanTop/90",
        "Asist/90",
        "Sut/90",
    ],
    default_fields: &[("Pas%", "pas_isabet")],
};

static ATTACKING_MID: PositionSchema = PositionSchema {
    position: Position::AttackingMid,
    join_key_field: "blabla_om",
    statistics_path: "/api/statistics/attacking-mid",
    graphic_path: "/api/graphic/attacking-mid",
    stat_fields: &["kilit_pas", "xa", "xg", "sut", "dripling"],
    graphic_fields: &[
        "KilitPas/90",
        "Asist/90",
        "Gol/90",
        "Sut/90",
        "Dripling/90",
        "Pas%",
    ],
    default_fields: &[],
};

static WINGER: PositionSchema = PositionSchema {
    position: Position::Winger,
    join_key_field: "blabla_kanat",
    statistics_path: "/api/statistics/winger",
    graphic_path: "/api/graphic/winger",
    stat_fields: &["dripling", "basarili_dripling", "orta", "xg", "xa"],
    graphic_fields: &[
        "Dripling/90",
        "Dripling%",
        "Orta/90",
        "Gol/90",
        "Asist/90",
        "Sut/90",
    ],
    default_fields: &[],
};

static INVERTED_WINGER: PositionSchema = PositionSchema {
    position: Position::InvertedWinger,
    join_key_field: "blabla_ik",
    statistics_path: "/api/statistics/inverted-winger",
    graphic_path: "/api/graphic/inverted-winger",
    stat_fields: &["dripling", "basarili_dripling", "sut", "xg", "xa"],
    graphic_fields: &[
        "Dripling/90",
        "Dripling%",
        "Sut/90",
        "IsabetliSut%",
        "Gol/90",
        "KilitPas/90",
    ],
    default_fields: &[],
};

static STRIKER: PositionSchema = PositionSchema {
    position: Position::Striker,
    join_key_field: "blabla_snt",
    statistics_path: "/api/statistics/striker",
    graphic_path: "/api/graphic/striker",
    stat_fields: &["xg", "sut", "isabetli_sut", "hava_topu_kazanma", "gol_donusum"],
    graphic_fields: &[
        "Gol/90",
        "xG/90",
        "Sut/90",
        "IsabetliSut%",
        "HavaTop%",
        "GolDonusum%",
    ],
    default_fields: &[
        ("HavaTop%", "hava_topu_kazanma"),
        ("GolDonusum%", "gol_donusum"),
    ],
};
