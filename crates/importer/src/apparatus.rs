use std::collections::HashMap;

/// Canonical apparatus identifiers used by the local data model, covering
/// both men's and women's artistic gymnastics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Apparatus {
    FloorExercise,
    PommelHorse,
    StillRings,
    Vault,
    ParallelBars,
    HighBar,
    BalanceBeam,
    UnevenBars,
}

impl Apparatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FloorExercise => "floor_exercise",
            Self::PommelHorse => "pommel_horse",
            Self::StillRings => "still_rings",
            Self::Vault => "vault",
            Self::ParallelBars => "parallel_bars",
            Self::HighBar => "high_bar",
            Self::BalanceBeam => "balance_beam",
            Self::UnevenBars => "uneven_bars",
        }
    }
}

pub trait ApparatusMapper {
    fn map_label(&self, label: &str) -> Option<Apparatus>;
}

/// Immutable, injectable lookup from a site's free-text event labels to
/// canonical apparatus ids. Matching is case-sensitive: the upstream labels
/// are stable strings, and a permissive match would start mapping event
/// names we have never seen. Unknown labels return `None` and the caller
/// drops the row.
#[derive(Debug, Clone)]
pub struct LabelTable {
    labels: HashMap<String, Apparatus>,
}

impl LabelTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Apparatus)>,
        S: Into<String>,
    {
        Self {
            labels: entries
                .into_iter()
                .map(|(label, apparatus)| (label.into(), apparatus))
                .collect(),
        }
    }

    /// The label variants MeetScoresOnline is known to use.
    pub fn mso() -> Self {
        Self::new([
            ("Floor", Apparatus::FloorExercise),
            ("Floor Exercise", Apparatus::FloorExercise),
            ("Pommel", Apparatus::PommelHorse),
            ("Pommel Horse", Apparatus::PommelHorse),
            ("Rings", Apparatus::StillRings),
            ("Still Rings", Apparatus::StillRings),
            ("Vault", Apparatus::Vault),
            ("PBars", Apparatus::ParallelBars),
            ("P Bars", Apparatus::ParallelBars),
            ("Parallel Bars", Apparatus::ParallelBars),
            ("HiBar", Apparatus::HighBar),
            ("High Bar", Apparatus::HighBar),
            ("Horizontal Bar", Apparatus::HighBar),
            ("Beam", Apparatus::BalanceBeam),
            ("Bars", Apparatus::UnevenBars),
            ("Uneven Bars", Apparatus::UnevenBars),
        ])
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::mso()
    }
}

impl ApparatusMapper for LabelTable {
    fn map_label(&self, label: &str) -> Option<Apparatus> {
        self.labels.get(label).copied()
    }
}
