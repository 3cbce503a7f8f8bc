// src/optimizer/properties.rs

//! Derives post-modification properties from a QMC outcome and scores them
//! against the optimal target ranges.

use super::chemistry::{BaseChemical, Properties, PropertyKind, PROPERTY_KINDS};
use super::formulation::{Formulation, MAX_COORDINATION_SITES};
use super::qmc::QmcOutcome;

/// Percent-to-ideal score for each screened property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyScores {
    pub binding_energy: f64,
    pub activation_barrier: f64,
    pub electron_density: f64,
    pub homo_lumo_gap: f64,
    pub coordination_number: f64,
    pub pka: f64,
}

impl PropertyScores {
    /// Reads one score by property kind.
    pub fn of(&self, kind: PropertyKind) -> f64 {
        match kind {
            PropertyKind::BindingEnergy => self.binding_energy,
            PropertyKind::ActivationBarrier => self.activation_barrier,
            PropertyKind::ElectronDensity => self.electron_density,
            PropertyKind::HomoLumoGap => self.homo_lumo_gap,
            PropertyKind::CoordinationNumber => self.coordination_number,
            PropertyKind::PKa => self.pka,
        }
    }

    /// Mean score over all screened properties.
    pub fn mean(&self) -> f64 {
        PROPERTY_KINDS.iter().map(|kind| self.of(*kind)).sum::<f64>() / PROPERTY_KINDS.len() as f64
    }
}

/// Properties of the modified chemical, from the baseline and the QMC
/// factors.
pub fn derive_properties(
    formulation: &Formulation,
    base: BaseChemical,
    qmc: &QmcOutcome,
) -> Properties {
    let baseline = base.baseline();
    let sites = formulation.total_coordination_sites();

    let binding_change = qmc.binding_improvement - 1.0;
    let coordination_factor = sites as f64 / MAX_COORDINATION_SITES as f64;
    let stability_boost = qmc.stability_factor - 0.8;
    let pka_adjustment: f64 = formulation
        .groups
        .iter()
        .map(|(kind, count)| kind.data().pka_shift * *count as f64)
        .sum();

    Properties {
        binding_energy: baseline.binding_energy * (1.0 + binding_change * 0.3),
        activation_barrier: baseline.activation_barrier - qmc.barrier_reduction,
        electron_density: baseline.electron_density * (1.0 + coordination_factor * 0.4),
        homo_lumo_gap: baseline.homo_lumo_gap + stability_boost * 2.0,
        coordination_number: sites as f64,
        pka: baseline.pka + pka_adjustment,
    }
}

/// How close a value sits to a property's ideal range, as a percentage.
///
/// Inside the range the score starts at 100 in the center and decays to 80
/// at the edges; outside it decays linearly with distance, reaching zero a
/// full range-width away.
pub fn percent_to_ideal(kind: PropertyKind, value: f64) -> f64 {
    let (optimal_min, optimal_max) = kind.optimal_range();
    let optimal_center = (optimal_min + optimal_max) / 2.0;
    let optimal_range = optimal_max - optimal_min;

    if (optimal_min..=optimal_max).contains(&value) {
        let deviation = (value - optimal_center).abs();
        let percent = 100.0 - (deviation / (optimal_range / 2.0)) * 20.0;
        percent.clamp(80.0, 100.0)
    } else {
        let distance = if value < optimal_min {
            optimal_min - value
        } else {
            value - optimal_max
        };
        (100.0 - (distance / optimal_range) * 100.0).max(0.0)
    }
}

/// Scores every property of a derived record.
pub fn score_properties(properties: &Properties) -> PropertyScores {
    PropertyScores {
        binding_energy: percent_to_ideal(PropertyKind::BindingEnergy, properties.binding_energy),
        activation_barrier: percent_to_ideal(PropertyKind::ActivationBarrier, properties.activation_barrier),
        electron_density: percent_to_ideal(PropertyKind::ElectronDensity, properties.electron_density),
        homo_lumo_gap: percent_to_ideal(PropertyKind::HomoLumoGap, properties.homo_lumo_gap),
        coordination_number: percent_to_ideal(PropertyKind::CoordinationNumber, properties.coordination_number),
        pka: percent_to_ideal(PropertyKind::PKa, properties.pka),
    }
}

/// Overall fitness of a scored candidate, in [0, 1].
pub fn fitness(scores: &PropertyScores) -> f64 {
    scores.mean() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_range_scores_hundred() {
        assert!((percent_to_ideal(PropertyKind::ActivationBarrier, 55.0) - 100.0).abs() < 1e-12);
        assert!((percent_to_ideal(PropertyKind::HomoLumoGap, 5.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn range_edges_score_eighty() {
        assert!((percent_to_ideal(PropertyKind::ActivationBarrier, 40.0) - 80.0).abs() < 1e-12);
        assert!((percent_to_ideal(PropertyKind::ActivationBarrier, 70.0) - 80.0).abs() < 1e-12);
    }

    #[test]
    fn outside_range_decays_to_zero() {
        // One full range-width past the edge: zero.
        assert!((percent_to_ideal(PropertyKind::HomoLumoGap, 8.0)).abs() < 1e-12);
        // Half a range-width past: fifty.
        assert!((percent_to_ideal(PropertyKind::HomoLumoGap, 7.0) - 50.0).abs() < 1e-12);
        // Far out stays clamped at zero.
        assert_eq!(percent_to_ideal(PropertyKind::PKa, 50.0), 0.0);
    }

    #[test]
    fn fitness_is_mean_over_hundred() {
        let scores = PropertyScores {
            binding_energy: 60.0,
            activation_barrier: 80.0,
            electron_density: 100.0,
            homo_lumo_gap: 40.0,
            coordination_number: 90.0,
            pka: 50.0,
        };
        assert!((fitness(&scores) - 0.7).abs() < 1e-12);
    }
}
