use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Category assigned to a single calendar day.
///
/// The discriminant is stable: it is written to disk, used as the palette
/// index of the heatmap and used as the comparison key of the rescheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum DayCategory {
    Sunday = 0,
    Workday = 1,
    Vacation = 2,
    /// Break right before a semester starts (PF).
    PreSemesterBreak = 3,
    /// First day of a semester (PINI).
    SemesterStart = 4,
    /// Last day of a semester (PFIM).
    SemesterEnd = 5,
    Strike = 6,
}

impl DayCategory {
    pub const ALL: [DayCategory; 7] = [
        DayCategory::Sunday,
        DayCategory::Workday,
        DayCategory::Vacation,
        DayCategory::PreSemesterBreak,
        DayCategory::SemesterStart,
        DayCategory::SemesterEnd,
        DayCategory::Strike,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Categories that occupy a teaching slot when relocating days.
    pub fn is_workday_compatible(self) -> bool {
        matches!(
            self,
            DayCategory::Workday
                | DayCategory::PreSemesterBreak
                | DayCategory::SemesterStart
                | DayCategory::SemesterEnd
        )
    }

    pub fn code(self) -> &'static str {
        match self {
            DayCategory::Sunday => "SUN",
            DayCategory::Workday => "WORK",
            DayCategory::Vacation => "VAC",
            DayCategory::PreSemesterBreak => "PF",
            DayCategory::SemesterStart => "PINI",
            DayCategory::SemesterEnd => "PFIM",
            DayCategory::Strike => "STRIKE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayCategory::Sunday => "Sunday",
            DayCategory::Workday => "Workday",
            DayCategory::Vacation => "Vacation / holiday",
            DayCategory::PreSemesterBreak => "Pre-semester break",
            DayCategory::SemesterStart => "Semester start",
            DayCategory::SemesterEnd => "Semester end",
            DayCategory::Strike => "Strike",
        }
    }
}

impl fmt::Display for DayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for DayCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.ordinal())
    }
}

impl<'de> Deserialize<'de> for DayCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        DayCategory::from_ordinal(value).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid day category ordinal {value} (must be 0..=6)"))
        })
    }
}

/// Result of classifying one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: DayCategory,
    pub counts_as_class_day: bool,
}

impl Classification {
    pub const fn new(category: DayCategory, counts_as_class_day: bool) -> Self {
        Self {
            category,
            counts_as_class_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_stable() {
        for (idx, category) in DayCategory::ALL.iter().enumerate() {
            assert_eq!(category.ordinal() as usize, idx);
            assert_eq!(DayCategory::from_ordinal(idx as u8), Some(*category));
        }
        assert_eq!(DayCategory::from_ordinal(7), None);
    }

    #[test]
    fn workday_compatible_set() {
        let compatible: Vec<DayCategory> = DayCategory::ALL
            .into_iter()
            .filter(|c| c.is_workday_compatible())
            .collect();
        assert_eq!(
            compatible,
            vec![
                DayCategory::Workday,
                DayCategory::PreSemesterBreak,
                DayCategory::SemesterStart,
                DayCategory::SemesterEnd,
            ]
        );
    }

    #[test]
    fn serializes_as_ordinal() {
        let json = serde_json::to_string(&DayCategory::Strike).unwrap();
        assert_eq!(json, "6");
        let back: DayCategory = serde_json::from_str("4").unwrap();
        assert_eq!(back, DayCategory::SemesterStart);
        assert!(serde_json::from_str::<DayCategory>("9").is_err());
    }
}
