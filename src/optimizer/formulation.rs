// src/optimizer/formulation.rs

//! Candidate solution formulations: a base coordination number plus a
//! multiset of functional groups.

use super::chemistry::FunctionalGroupKind;
use std::fmt;

/// Physical cap on usable coordination sites.
pub const MAX_COORDINATION_SITES: u32 = 6;

/// One candidate formulation of the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Formulation {
    /// Attached functional groups with their counts.
    pub groups: Vec<(FunctionalGroupKind, u32)>,
    /// Coordination number of the unmodified base.
    pub coordination: u32,
}

impl Formulation {
    /// Builds a formulation from group counts and a base coordination.
    pub fn new(groups: Vec<(FunctionalGroupKind, u32)>, coordination: u32) -> Self {
        Self { groups, coordination }
    }

    /// Usable coordination sites: base plus group contributions, capped at
    /// [`MAX_COORDINATION_SITES`].
    pub fn total_coordination_sites(&self) -> u32 {
        let total: u32 = self.coordination
            + self
                .groups
                .iter()
                .map(|(kind, count)| kind.data().coordination_sites * count)
                .sum::<u32>();
        total.min(MAX_COORDINATION_SITES)
    }
}

impl fmt::Display for Formulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group_parts: Vec<String> = self
            .groups
            .iter()
            .map(|(kind, count)| format!("{}x{}", count, kind.data().formula))
            .collect();
        write!(f, "Coord={}, Groups=[{}]", self.coordination, group_parts.join(", "))
    }
}

/// The 17 group combinations of the screen, each taken at base
/// coordination 4, 5 and 6: 51 candidates in a stable order.
pub fn standard_formulations() -> Vec<Formulation> {
    use FunctionalGroupKind::{Amine, Hydroxyl, Thiol};

    let combinations: Vec<Vec<(FunctionalGroupKind, u32)>> = vec![
        vec![(Hydroxyl, 1)],
        vec![(Hydroxyl, 2)],
        vec![(Hydroxyl, 3)],
        vec![(Amine, 1)],
        vec![(Amine, 2)],
        vec![(Amine, 3)],
        vec![(Thiol, 1)],
        vec![(Thiol, 2)],
        vec![(Thiol, 3)],
        vec![(Hydroxyl, 2), (Amine, 1)],
        vec![(Hydroxyl, 1), (Amine, 2)],
        vec![(Hydroxyl, 2), (Thiol, 1)],
        vec![(Amine, 2), (Thiol, 1)],
        vec![(Hydroxyl, 1), (Amine, 1), (Thiol, 1)],
        vec![(Hydroxyl, 2), (Amine, 2)],
        vec![(Amine, 3), (Hydroxyl, 1)],
        vec![(Amine, 2), (Hydroxyl, 2)],
    ];

    let mut formulations = Vec::with_capacity(combinations.len() * 3);
    for groups in &combinations {
        for coordination in [4, 5, 6] {
            formulations.push(Formulation::new(groups.clone(), coordination));
        }
    }
    formulations
}

#[cfg(test)]
mod tests {
    use super::*;
    use FunctionalGroupKind::{Amine, Hydroxyl, Thiol};

    #[test]
    fn generator_yields_fifty_one_candidates() {
        assert_eq!(standard_formulations().len(), 51);
    }

    #[test]
    fn coordination_sites_are_capped() {
        let heavy = Formulation::new(vec![(Amine, 3), (Hydroxyl, 1)], 6);
        assert_eq!(heavy.total_coordination_sites(), MAX_COORDINATION_SITES);

        let light = Formulation::new(vec![(Hydroxyl, 1)], 4);
        assert_eq!(light.total_coordination_sites(), 5);

        let mixed = Formulation::new(vec![(Hydroxyl, 1), (Thiol, 1)], 4);
        assert_eq!(mixed.total_coordination_sites(), 6);
    }

    #[test]
    fn display_matches_report_format() {
        let f = Formulation::new(vec![(Hydroxyl, 2), (Amine, 1)], 5);
        assert_eq!(format!("{}", f), "Coord=5, Groups=[2xOH, 1xNH2]");
    }
}
