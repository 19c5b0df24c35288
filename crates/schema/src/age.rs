use std::fmt;

pub const AGE_BRACKET_COUNT: usize = 8;

/// Age categories the classifier was trained on, in output-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBracket {
    Infant,
    Toddler,
    Child,
    Teen,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; AGE_BRACKET_COUNT] = [
        AgeBracket::Infant,
        AgeBracket::Toddler,
        AgeBracket::Child,
        AgeBracket::Teen,
        AgeBracket::YoungAdult,
        AgeBracket::Adult,
        AgeBracket::MiddleAged,
        AgeBracket::Senior,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Inclusive age range in years.
    pub fn years(self) -> (u8, u8) {
        match self {
            AgeBracket::Infant => (0, 2),
            AgeBracket::Toddler => (4, 6),
            AgeBracket::Child => (8, 12),
            AgeBracket::Teen => (15, 20),
            AgeBracket::YoungAdult => (25, 32),
            AgeBracket::Adult => (38, 43),
            AgeBracket::MiddleAged => (48, 53),
            AgeBracket::Senior => (60, 100),
        }
    }

    /// Label drawn on the image and printed in the report, e.g. `(25-32)`.
    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Infant => "(0-2)",
            AgeBracket::Toddler => "(4-6)",
            AgeBracket::Child => "(8-12)",
            AgeBracket::Teen => "(15-20)",
            AgeBracket::YoungAdult => "(25-32)",
            AgeBracket::Adult => "(38-43)",
            AgeBracket::MiddleAged => "(48-53)",
            AgeBracket::Senior => "(60-100)",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_ordered_by_age() {
        for pair in AgeBracket::ALL.windows(2) {
            let (_, upper) = pair[0].years();
            let (lower, _) = pair[1].years();
            assert!(upper < lower, "{} should end before {} starts", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_index_and_from_index_agree() {
        for (i, bracket) in AgeBracket::ALL.iter().enumerate() {
            assert_eq!(bracket.index(), i);
            assert_eq!(AgeBracket::from_index(i), Some(*bracket));
        }
        assert_eq!(AgeBracket::from_index(AGE_BRACKET_COUNT), None);
    }

    #[test]
    fn test_label_matches_year_range() {
        for bracket in AgeBracket::ALL {
            let (lo, hi) = bracket.years();
            assert_eq!(bracket.label(), format!("({lo}-{hi})"));
            assert_eq!(bracket.to_string(), bracket.label());
        }
    }
}
