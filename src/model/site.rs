/// Regulation call of one site in one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegulationLabel {
    Up,
    Down,
    Not,
    Missing,
}

impl RegulationLabel {
    /// Parses the three recognized call strings. Anything else is not a
    /// valid call; callers decide whether to warn before mapping to
    /// `Missing`.
    pub fn from_call(raw: &str) -> Option<RegulationLabel> {
        match raw {
            "up" => Some(RegulationLabel::Up),
            "down" => Some(RegulationLabel::Down),
            "not" => Some(RegulationLabel::Not),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RegulationLabel::Missing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegulationLabel::Up => "up",
            RegulationLabel::Down => "down",
            RegulationLabel::Not => "not",
            RegulationLabel::Missing => "",
        }
    }
}

/// One exploded sequence window with its share of the source peptide's
/// evidence weight and the per-experiment regulation calls of that peptide.
#[derive(Debug, Clone)]
pub struct Site {
    pub window: String,
    pub weight: f64,
    pub labels: Vec<RegulationLabel>,
}
