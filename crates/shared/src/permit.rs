//! Permit types, the analysis mode catalog, and the user's selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permit category the backend tailors its analysis to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermitType {
    #[default]
    Solar,
    Wind,
    OilGas,
    Generic,
}

impl PermitType {
    pub const ALL: [PermitType; 4] = [
        PermitType::Solar,
        PermitType::Wind,
        PermitType::OilGas,
        PermitType::Generic,
    ];

    /// Wire id sent as the `permitType` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermitType::Solar => "solar",
            PermitType::Wind => "wind",
            PermitType::OilGas => "oil-gas",
            PermitType::Generic => "generic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PermitType::Solar => "Solar Permit",
            PermitType::Wind => "Wind Permit",
            PermitType::OilGas => "Oil & Gas Permit",
            PermitType::Generic => "Generic Energy Permit",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PermitType::Solar => "☀",
            PermitType::Wind => "🌬",
            PermitType::OilGas => "🛢",
            PermitType::Generic => "📄",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PermitType::Solar => "Best for solar panel installations and grid connections",
            PermitType::Wind => "Ideal for wind turbine and wind farm development",
            PermitType::OilGas => "For drilling, extraction, and pipeline permits",
            PermitType::Generic => "For other energy infrastructure projects",
        }
    }
}

impl fmt::Display for PermitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown permit type: {0}")]
pub struct UnknownPermitType(pub String);

impl FromStr for PermitType {
    type Err = UnknownPermitType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermitType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermitType(s.to_string()))
    }
}

/// A named analysis capability the user can enable per upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisModeInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub default_checked: bool,
}

pub const ANALYSIS_MODES: &[AnalysisModeInfo] = &[
    AnalysisModeInfo {
        id: "standard-extraction",
        name: "Standard Clause Extraction",
        description: "Extracts clauses grouped by phase (General, Development, Construction, Operational). Outputs structured tables with summaries, categories, and tags.",
        default_checked: true,
    },
    AnalysisModeInfo {
        id: "data-parsing",
        name: "Data Parsing & Mapping",
        description: "Pulls metadata (Permit ID, Acreage, Legal, Contacts) for clean tables or API-ready JSON.",
        default_checked: false,
    },
    AnalysisModeInfo {
        id: "redlining",
        name: "Redlining / Deviation Detection",
        description: "Compares permit to standard templates. Highlights additions, removals, and deviations for legal review.",
        default_checked: false,
    },
    AnalysisModeInfo {
        id: "obligations-matrix",
        name: "Obligations Matrix",
        description: "Breaks obligations by party/phase. Outputs a timeline-ready matrix of enforceability.",
        default_checked: false,
    },
    AnalysisModeInfo {
        id: "renewal-timeline",
        name: "Renewal & Expiry Timeline",
        description: "Auto-detects dates/renewals. Generates timeline and setup alerts.",
        default_checked: false,
    },
    AnalysisModeInfo {
        id: "legal-review",
        name: "Legal Review Risk Flagging",
        description: "Flags vague/unusual clauses and explains risks, trained on typical disputes.",
        default_checked: true,
    },
];

pub fn find_mode(id: &str) -> Option<&'static AnalysisModeInfo> {
    ANALYSIS_MODES.iter().find(|m| m.id == id)
}

/// Permit type plus the enabled analysis modes.
///
/// Modes keep insertion order. An empty mode set is allowed here; the
/// processor screen only disables "continue" via [`SelectionState::can_proceed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    permit_type: PermitType,
    modes: Vec<String>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            permit_type: PermitType::default(),
            modes: ANALYSIS_MODES
                .iter()
                .filter(|m| m.default_checked)
                .map(|m| m.id.to_string())
                .collect(),
        }
    }
}

impl SelectionState {
    pub fn permit_type(&self) -> PermitType {
        self.permit_type
    }

    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    pub fn select_permit(&mut self, permit: PermitType) {
        self.permit_type = permit;
    }

    /// Add the mode if absent, remove it if present.
    pub fn toggle_mode(&mut self, id: &str) {
        if let Some(pos) = self.modes.iter().position(|m| m == id) {
            self.modes.remove(pos);
        } else {
            self.modes.push(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.modes.iter().any(|m| m == id)
    }

    pub fn can_proceed(&self) -> bool {
        !self.modes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let sel = SelectionState::default();
        assert_eq!(sel.permit_type(), PermitType::Solar);
        assert_eq!(sel.modes(), ["standard-extraction", "legal-review"]);
        assert!(sel.can_proceed());
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        for mode in ANALYSIS_MODES {
            let mut sel = SelectionState::default();
            let mut before = sel.modes().to_vec();
            sel.toggle_mode(mode.id);
            sel.toggle_mode(mode.id);
            let mut after = sel.modes().to_vec();
            before.sort();
            after.sort();
            assert_eq!(before, after, "toggle involution broke for {}", mode.id);
        }

        let mut sel = SelectionState::default();
        sel.toggle_mode("not-in-catalog");
        assert!(sel.is_selected("not-in-catalog"));
        sel.toggle_mode("not-in-catalog");
        assert!(!sel.is_selected("not-in-catalog"));
    }

    #[test]
    fn test_toggle_appends_in_insertion_order() {
        let mut sel = SelectionState::default();
        sel.toggle_mode("redlining");
        assert_eq!(
            sel.modes(),
            ["standard-extraction", "legal-review", "redlining"]
        );
    }

    #[test]
    fn test_empty_modes_block_progress() {
        let mut sel = SelectionState::default();
        sel.toggle_mode("standard-extraction");
        sel.toggle_mode("legal-review");
        assert!(sel.modes().is_empty());
        assert!(!sel.can_proceed());
    }

    #[test]
    fn test_select_permit_replaces() {
        let mut sel = SelectionState::default();
        sel.select_permit(PermitType::OilGas);
        sel.select_permit(PermitType::Wind);
        assert_eq!(sel.permit_type(), PermitType::Wind);
    }

    #[test]
    fn test_permit_type_wire_ids() {
        for permit in PermitType::ALL {
            assert_eq!(permit.as_str().parse::<PermitType>(), Ok(permit));
            let json = serde_json::to_string(&permit).unwrap();
            assert_eq!(json, format!("\"{}\"", permit.as_str()));
        }
        assert!("Solar".parse::<PermitType>().is_err());
    }
}
