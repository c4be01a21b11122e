use crate::normalize::MetricCalibration;
use crate::schema::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Radar,
    Scatter,
}

/// A comparison chart and the calibration of every series it plots.
/// Scatter panels use the first two calibrations as x and y.
#[derive(Debug)]
pub struct ComparisonPanel {
    pub title: &'static str,
    pub kind: ChartKind,
    pub calibrations: &'static [MetricCalibration],
}

use MetricCalibration as M;

const GOALKEEPER_PANELS: &[ComparisonPanel] = &[
    ComparisonPanel {
        title: "Shot stopping",
        kind: ChartKind::Bar,
        calibrations: &[
            M::range("Kurtaris%", 50.0, 85.0),
            M::inverted("YenilenGol/90", 0.5, 2.2),
            M::range("xga_fark", -8.0, 8.0),
        ],
    },
    ComparisonPanel {
        title: "Distribution",
        kind: ChartKind::Radar,
        calibrations: &[
            M::range("Pas%", 55.0, 90.0),
            M::range("UzunPas%", 25.0, 65.0),
            M::range("CikisTop/90", 0.0, 2.5),
            M::range("gol_yemeden", 0.0, 18.0),
        ],
    },
    ComparisonPanel {
        title: "Saves vs conceded",
        kind: ChartKind::Scatter,
        calibrations: &[
            M::range("Kurtaris%", 50.0, 85.0),
            M::inverted("YenilenGol/90", 0.5, 2.2),
        ],
    },
];

const CENTRE_BACK_PANELS: &[ComparisonPanel] = &[
    ComparisonPanel {
        title: "Defending",
        kind: ChartKind::Bar,
        calibrations: &[
            M::range("KazanTop/90", 2.0, 10.0),
            M::range("Mudahale/90", 0.5, 3.0),
            M::range("Eng/90", 0.2, 2.0),
            M::range("HavaTop%", 40.0, 80.0),
        ],
    },
    ComparisonPanel {
        title: "Profile",
        kind: ChartKind::Radar,
        calibrations: &[
            M::range("Pas%", 70.0, 95.0),
            M::range("IleriPas/90", 2.0, 12.0),
            M::range("uzaklastirma", 0.0, 150.0),
            M::range("katsayi", 0.0, 10.0),
            M::range("performans_puani", 5.0, 8.5),
        ],
    },
    ComparisonPanel {
        title: "Aerial vs ball winning",
        kind: ChartKind::Scatter,
        calibrations: &[
            M::range("HavaTop%", 40.0, 80.0),
            M::range("KazanTop/90", 2.0, 10.0),
        ],
    },
];

const FULL_BACK_PANELS: &[ComparisonPanel] = &[
    ComparisonPanel {
        title: "Delivery",
        kind: ChartKind::Bar,
        calibrations: &[
            M::range("Orta/90", 0.5, 6.0),
            M::range("Orta%", 10.0, 45.0),
            M::range("asist", 0.0, 12.0),
        ],
    },
    ComparisonPanel {
        title: "Two-way",
        kind: ChartKind::Radar,
        calibrations: &[
            M::range("KazanTop/90", 2.0, 9.0),
            M::range("Mudahale/90", 0.3, 2.5),
            M::range("Dripling/90", 0.2, 3.0),
            M::range("Pas%", 65.0, 92.0),
            M::range("ileri_tasima", 0.0, 120.0),
        ],
    },
    ComparisonPanel {
        title: "Crossing volume vs accuracy",
        kind: ChartKind::Scatter,
        calibrations: &[
            M::range("Orta/90", 0.5, 6.0),
            M::range("Orta%", 10.0, 45.0),
        ],
    },
];

const DEFENSIVE_MID_PANELS: &[ComparisonPanel] = &[
    ComparisonPanel {
        title: "Screening",
        kind: ChartKind::Bar,
        calibrations: &[
            M::range("KazanTop/90", 3.0, 11.0),
            M::range("Mudahale/90", 0.5, 3.0),
            M::range("Ikili%", 40.0, 70.0),
            M::inverted("Faul/90", 0.5, 3.0),
        ],
    },
    ComparisonPanel {
        title: "Circulation",
        kind: ChartKind::Radar,
        calibrations: &[
            M::range("Pas%", 75.0, 95.0),
            M::range("IleriPas/90", 3.0, 14.0),
            M::range("katsayi", 0.0, 10.0),
            M::range("performans_puani", 5.0, 8.5),
        ],
    },
    ComparisonPanel {
        title: "Passing vs ball winning",
        kind: ChartKind::Scatter,
        calibrations: &[
            M::range("Pas%", 75.0, 95.0),
            M::range("KazanTop/90", 3.0, 11.0),
        ],
    },
];

const MIDFIELDER_PANELS: &[ComparisonPanel] = &[
    ComparisonPanel {
        title: "Creation",
        kind: ChartKind::Bar,
        calibrations: &[
            M::range("KilitPas/90", 0.3, 3.0),
            M::range("Asist/90", 0.0, 0.5),
            M::range("xa", 0.0, 10.0),
        ],
    },
    ComparisonPanel {
        title: "All-round",
        kind: ChartKind::Radar,
        calibrations: &[
            M::range("Pas%", 70.0, 93.0),
            M::range("IleriPas/90", 2.0, 12.0),
            M::range("KazanTop/90", 2.0, 9.0),
            M::range("Sut/90", 0.2, 3.0),
            M::range("performans_puani", 5.0, 8.5),
        ],
    },
    ComparisonPanel {
        title: "Progression vs security",
        kind: ChartKind::Scatter,
        calibrations: &[
            M::range("IleriPas/90", 2.0, 12.0),
            M::range("Pas%", 70.0, 93.0),
        ],
    },
];

const ATTACKING_MID_PANELS: &[ComparisonPanel] = &[
    ComparisonPanel {
        title: "Final third",
        kind: ChartKind::Bar,
        calibrations: &[
            M::range("KilitPas/90", 0.5, 4.0),
            M::range("Asist/90", 0.0, 0.6),
            M::range("Gol/90", 0.0, 0.7),
        ],
    },
    ComparisonPanel {
        title: "Threat",
        kind: ChartKind::Radar,
        calibrations: &[
            M::range("Sut/90", 0.5, 4.0),
            M::range("Dripling/90", 0.3, 4.0),
            M::range("xg", 0.0, 15.0),
            M::range("xa", 0.0, 12.0),
            M::range("Pas%", 65.0, 90.0),
        ],
    },
    ComparisonPanel {
        title: "Goals vs assists",
        kind: ChartKind::Scatter,
        calibrations: &[
            M::range("Gol/90", 0.0, 0.7),
            M::range("Asist/90", 0.0, 0.6),
        ],
    },
];

const WINGER_PANELS: &[ComparisonPanel] = &[
    ComparisonPanel {
        title: "Carrying",
        kind: ChartKind::Bar,
        calibrations: &[
            M::range("Dripling/90", 0.5, 6.0),
            M::range("Dripling%", 30.0, 70.0),
            M::range("Orta/90", 0.5, 6.0),
        ],
    },
    ComparisonPanel {
        title: "Output",
        kind: ChartKind::Radar,
        calibrations: &[
            M::range("Gol/90", 0.0, 0.7),
            M::range("Asist/90", 0.0, 0.5),
            M::range("Sut/90", 0.5, 4.0),
            M::range("xg", 0.0, 12.0),
            M::range("xa", 0.0, 10.0),
        ],
    },
    ComparisonPanel {
        title: "Dribble volume vs success",
        kind: ChartKind::Scatter,
        calibrations: &[
            M::range("Dripling/90", 0.5, 6.0),
            M::range("Dripling%", 30.0, 70.0),
        ],
    },
];

const INVERTED_WINGER_PANELS: &[ComparisonPanel] = &[
    ComparisonPanel {
        title: "Cutting in",
        kind: ChartKind::Bar,
        calibrations: &[
            M::range("Dripling/90", 0.5, 6.0),
            M::range("Sut/90", 0.8, 4.5),
            M::range("IsabetliSut%", 20.0, 55.0),
        ],
    },
    ComparisonPanel {
        title: "Output",
        kind: ChartKind::Radar,
        calibrations: &[
            M::range("Gol/90", 0.0, 0.8),
            M::range("KilitPas/90", 0.3, 3.0),
            M::range("Dripling%", 30.0, 70.0),
            M::range("xg", 0.0, 14.0),
            M::range("xa", 0.0, 10.0),
        ],
    },
    ComparisonPanel {
        title: "Shot volume vs accuracy",
        kind: ChartKind::Scatter,
        calibrations: &[
            M::range("Sut/90", 0.8, 4.5),
            M::range("IsabetliSut%", 20.0, 55.0),
        ],
    },
];

const STRIKER_PANELS: &[ComparisonPanel] = &[
    ComparisonPanel {
        title: "Finishing",
        kind: ChartKind::Bar,
        calibrations: &[
            M::range("Gol/90", 0.1, 1.0),
            M::range("xG/90", 0.1, 0.9),
            M::range("GolDonusum%", 5.0, 30.0),
        ],
    },
    ComparisonPanel {
        title: "Profile",
        kind: ChartKind::Radar,
        calibrations: &[
            M::range("Sut/90", 1.0, 5.0),
            M::range("IsabetliSut%", 25.0, 60.0),
            M::range("HavaTop%", 20.0, 65.0),
            M::range("gol", 0.0, 35.0),
            M::range("performans_puani", 5.0, 8.5),
        ],
    },
    ComparisonPanel {
        title: "Goals vs expected",
        kind: ChartKind::Scatter,
        calibrations: &[
            M::range("xG/90", 0.1, 0.9),
            M::range("Gol/90", 0.1, 1.0),
        ],
    },
];

pub fn panels(position: Position) -> &'static [ComparisonPanel] {
    match position {
        Position::Goalkeeper => GOALKEEPER_PANELS,
        Position::CentreBack => CENTRE_BACK_PANELS,
        Position::FullBack => FULL_BACK_PANELS,
        Position::DefensiveMid => DEFENSIVE_MID_PANELS,
        Position::Midfielder => MIDFIELDER_PANELS,
        Position::AttackingMid => ATTACKING_MID_PANELS,
        Position::Winger => WINGER_PANELS,
        Position::InvertedWinger => INVERTED_WINGER_PANELS,
        Position::Striker => STRIKER_PANELS,
    }
}
