use serde::Serialize;

/// Letter grade to grade point, the only source of grade points in the system.
const GRADE_POINTS: [(&str, f64); 11] = [
    ("A+", 4.00),
    ("A", 4.00),
    ("A-", 3.70),
    ("B+", 3.50),
    ("B", 3.00),
    ("B-", 2.70),
    ("C+", 2.50),
    ("C", 2.00),
    ("C-", 1.75),
    ("D", 1.00),
    ("F", 0.00),
];

/// Total: unrecognized letters, including the empty string, are worth 0.0.
pub(crate) fn points_for(letter: &str) -> f64 {
    GRADE_POINTS
        .iter()
        .find(|(known, _)| *known == letter)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    pub(crate) const ALL: [LetterGrade; 11] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::D,
        Self::F,
    ];

    /// Strict parse used before storing a grade. Case-sensitive, surrounding whitespace ignored.
    pub(crate) fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|grade| grade.as_str() == value)
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::D => "D",
            Self::F => "F",
        }
    }

    pub(crate) fn points(self) -> f64 {
        points_for(self.as_str())
    }
}
