//! Technology lineage, rules complexity and era definitions.
//!
//! Every catalog definition composes a [`ComponentBase`] so that the
//! tech-base and availability validators work over "any component with a
//! tech base" without caring which category it came from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Technology lineage of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TechBase {
    /// Inner Sphere technology.
    #[default]
    InnerSphere,
    /// Clan technology.
    Clan,
}

impl fmt::Display for TechBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InnerSphere => write!(f, "Inner Sphere"),
            Self::Clan => write!(f, "Clan"),
        }
    }
}

/// Tech-base configuration of a whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TechBaseMode {
    /// Pure Inner Sphere unit.
    #[default]
    InnerSphere,
    /// Pure Clan unit.
    Clan,
    /// Mixed-tech unit with the given chassis lineage; any component is legal.
    Mixed(TechBase),
}

impl TechBaseMode {
    /// The lineage of the chassis itself.
    #[must_use]
    pub const fn chassis_tech_base(self) -> TechBase {
        match self {
            Self::InnerSphere => TechBase::InnerSphere,
            Self::Clan => TechBase::Clan,
            Self::Mixed(base) => base,
        }
    }

    /// Whether mixed-tech rules are enabled.
    #[must_use]
    pub const fn is_mixed(self) -> bool {
        matches!(self, Self::Mixed(_))
    }
}

/// Game-complexity tier. Ordered: Introductory < Standard < Advanced < Experimental.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum RulesLevel {
    /// Introductory box-set rules.
    #[default]
    Introductory,
    /// Standard tournament-legal rules.
    Standard,
    /// Advanced rules.
    Advanced,
    /// Experimental rules.
    Experimental,
}

impl fmt::Display for RulesLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Introductory => "Introductory",
            Self::Standard => "Standard",
            Self::Advanced => "Advanced",
            Self::Experimental => "Experimental",
        };
        f.write_str(name)
    }
}

/// Historical era, used to describe when a component became available.
///
/// This is the eight-era model; boundaries are inclusive start years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Era {
    /// Before 2571.
    AgeOfWar,
    /// 2571-2780.
    StarLeague,
    /// 2781-3049.
    SuccessionWars,
    /// 3050-3061.
    ClanInvasion,
    /// 3062-3067.
    CivilWar,
    /// 3068-3080.
    Jihad,
    /// 3081-3150.
    DarkAge,
    /// 3151 onward.
    IlClan,
}

impl Era {
    /// All eras in chronological order.
    pub const ALL: [Era; 8] = [
        Era::AgeOfWar,
        Era::StarLeague,
        Era::SuccessionWars,
        Era::ClanInvasion,
        Era::CivilWar,
        Era::Jihad,
        Era::DarkAge,
        Era::IlClan,
    ];

    /// First in-universe year of this era.
    #[must_use]
    pub const fn start_year(self) -> u16 {
        match self {
            Era::AgeOfWar => 0,
            Era::StarLeague => 2571,
            Era::SuccessionWars => 2781,
            Era::ClanInvasion => 3050,
            Era::CivilWar => 3062,
            Era::Jihad => 3068,
            Era::DarkAge => 3081,
            Era::IlClan => 3151,
        }
    }

    /// Era containing the given year.
    #[must_use]
    pub fn from_year(year: u16) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|era| year >= era.start_year())
            .unwrap_or(Era::AgeOfWar)
    }
}

/// Fields shared by every catalog definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentBase {
    /// Display name.
    pub name: String,
    /// Technology lineage.
    pub tech_base: TechBase,
    /// Rules-complexity tier.
    pub rules_level: RulesLevel,
    /// In-universe introduction year.
    pub introduction_year: u16,
}

impl ComponentBase {
    /// Create a component base record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        tech_base: TechBase,
        rules_level: RulesLevel,
        introduction_year: u16,
    ) -> Self {
        Self {
            name: name.into(),
            tech_base,
            rules_level,
            introduction_year,
        }
    }

    /// Era in which this component was introduced.
    #[must_use]
    pub fn era(&self) -> Era {
        Era::from_year(self.introduction_year)
    }

    /// Whether the component exists by the given year.
    #[must_use]
    pub fn available_in(&self, year: u16) -> bool {
        self.introduction_year <= year
    }
}

/// Anything carrying tech-base and availability metadata.
pub trait TechRated {
    /// Shared metadata for this item.
    fn base(&self) -> &ComponentBase;
}
