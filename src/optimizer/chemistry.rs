// src/optimizer/chemistry.rs

//! Static chemistry data for the formulation screen: functional groups,
//! competing ions, base chemicals with their baseline properties, and the
//! optimal target ranges the screen scores against.

use crate::infiltration::Metal;

/// Ligand classes a formulation can attach to its base chemical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionalGroupKind {
    /// -OH
    Hydroxyl,
    /// -NH2
    Amine,
    /// -SH
    Thiol,
}

/// Electronic and structural character of one functional group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionalGroup {
    /// Display name.
    pub name: &'static str,
    /// Chemical formula fragment.
    pub formula: &'static str,
    /// Relative electron-donating power.
    pub electron_donating_power: f64,
    /// Coordination sites contributed per group.
    pub coordination_sites: u32,
    /// Shift applied to the base chemical's pKa per group.
    pub pka_shift: f64,
    /// Multiplicative stability factor per group.
    pub stability_factor: f64,
}

impl FunctionalGroupKind {
    /// The group's fixed character data.
    pub fn data(&self) -> FunctionalGroup {
        match self {
            FunctionalGroupKind::Hydroxyl => FunctionalGroup {
                name: "Hydroxyl",
                formula: "OH",
                electron_donating_power: 0.85,
                coordination_sites: 1,
                pka_shift: -0.5,
                stability_factor: 0.92,
            },
            FunctionalGroupKind::Amine => FunctionalGroup {
                name: "Amine",
                formula: "NH2",
                electron_donating_power: 1.15,
                coordination_sites: 2,
                pka_shift: 1.2,
                stability_factor: 0.88,
            },
            FunctionalGroupKind::Thiol => FunctionalGroup {
                name: "Thiol",
                formula: "SH",
                electron_donating_power: 0.95,
                coordination_sites: 1,
                pka_shift: -0.8,
                stability_factor: 0.75,
            },
        }
    }
}

/// Ions competing with the target metal for binding sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompetingIonKind {
    Calcium,
    Magnesium,
    Phosphate,
    Sulfate,
    Carbonate,
}

/// Identity and binding affinity of one competing ion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompetingIon {
    /// Display name.
    pub name: &'static str,
    /// Ionic formula.
    pub formula: &'static str,
    /// Relative binding affinity.
    pub affinity: f64,
}

impl CompetingIonKind {
    /// The ion's fixed character data.
    pub fn data(&self) -> CompetingIon {
        match self {
            CompetingIonKind::Calcium => CompetingIon { name: "Calcium", formula: "Ca2+", affinity: 0.65 },
            CompetingIonKind::Magnesium => CompetingIon { name: "Magnesium", formula: "Mg2+", affinity: 0.60 },
            CompetingIonKind::Phosphate => CompetingIon { name: "Phosphate", formula: "PO43-", affinity: 0.80 },
            CompetingIonKind::Sulfate => CompetingIon { name: "Sulfate", formula: "SO42-", affinity: 0.55 },
            CompetingIonKind::Carbonate => CompetingIon { name: "Carbonate", formula: "CO32-", affinity: 0.68 },
        }
    }
}

/// The four base chemicals under study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseChemical {
    /// Trisodium phosphate, targeting lead.
    TrisodiumPhosphate,
    /// Phosphoric acid, targeting lead.
    PhosphoricAcid,
    /// Iron oxides (FeOOH / Fe2O3), targeting arsenic.
    IronOxides,
    /// Ferric sulfate, targeting arsenic.
    FerricSulfate,
}

impl BaseChemical {
    /// Display name.
    pub fn label(&self) -> &'static str {
        match self {
            BaseChemical::TrisodiumPhosphate => "TSP (Trisodium Phosphate)",
            BaseChemical::PhosphoricAcid => "Phosphoric Acid",
            BaseChemical::IronOxides => "Iron Oxides (FeOOH)",
            BaseChemical::FerricSulfate => "Ferric Sulfate",
        }
    }

    /// The heavy metal this chemical neutralizes.
    pub fn target_metal(&self) -> Metal {
        match self {
            BaseChemical::TrisodiumPhosphate | BaseChemical::PhosphoricAcid => Metal::Lead,
            BaseChemical::IronOxides | BaseChemical::FerricSulfate => Metal::Arsenic,
        }
    }

    /// Unmodified baseline properties.
    pub fn baseline(&self) -> Properties {
        match self {
            BaseChemical::TrisodiumPhosphate => Properties {
                binding_energy: -485.0,
                activation_barrier: 68.0,
                electron_density: 0.72,
                homo_lumo_gap: 3.1,
                coordination_number: 4.0,
                pka: 12.7,
            },
            BaseChemical::PhosphoricAcid => Properties {
                binding_energy: -440.0,
                activation_barrier: 92.0,
                electron_density: 0.65,
                homo_lumo_gap: 2.7,
                coordination_number: 3.0,
                pka: 2.15,
            },
            BaseChemical::IronOxides => Properties {
                binding_energy: -395.0,
                activation_barrier: 85.0,
                electron_density: 0.61,
                homo_lumo_gap: 2.5,
                coordination_number: 3.0,
                pka: 5.8,
            },
            BaseChemical::FerricSulfate => Properties {
                binding_energy: -425.0,
                activation_barrier: 74.0,
                electron_density: 0.68,
                homo_lumo_gap: 2.9,
                coordination_number: 4.0,
                pka: 3.2,
            },
        }
    }
}

impl std::fmt::Display for BaseChemical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One value per screened property, for baselines and derived results
/// alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Properties {
    /// Binding energy, kJ/mol (more negative binds stronger).
    pub binding_energy: f64,
    /// Activation barrier, kJ/mol (lower reacts faster).
    pub activation_barrier: f64,
    /// Electron density, e/A3.
    pub electron_density: f64,
    /// HOMO-LUMO gap, eV (larger is more stable).
    pub homo_lumo_gap: f64,
    /// Coordination number.
    pub coordination_number: f64,
    /// Acid dissociation constant.
    pub pka: f64,
}

/// The screened properties, in report order.
pub const PROPERTY_KINDS: [PropertyKind; 6] = [
    PropertyKind::BindingEnergy,
    PropertyKind::ActivationBarrier,
    PropertyKind::ElectronDensity,
    PropertyKind::HomoLumoGap,
    PropertyKind::CoordinationNumber,
    PropertyKind::PKa,
];

/// Identifies one screened property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    BindingEnergy,
    ActivationBarrier,
    ElectronDensity,
    HomoLumoGap,
    CoordinationNumber,
    PKa,
}

impl PropertyKind {
    /// Display name.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyKind::BindingEnergy => "Binding Energy",
            PropertyKind::ActivationBarrier => "Activation Barrier",
            PropertyKind::ElectronDensity => "Electron Density",
            PropertyKind::HomoLumoGap => "HOMO-LUMO Gap",
            PropertyKind::CoordinationNumber => "Coordination Number",
            PropertyKind::PKa => "pKa",
        }
    }

    /// Measurement unit, empty for dimensionless properties.
    pub fn unit(&self) -> &'static str {
        match self {
            PropertyKind::BindingEnergy | PropertyKind::ActivationBarrier => "kJ/mol",
            PropertyKind::ElectronDensity => "e/A3",
            PropertyKind::HomoLumoGap => "eV",
            PropertyKind::CoordinationNumber | PropertyKind::PKa => "",
        }
    }

    /// Optimal target range `(min, max)`.
    pub fn optimal_range(&self) -> (f64, f64) {
        match self {
            PropertyKind::BindingEnergy => (-800.0, -600.0),
            PropertyKind::ActivationBarrier => (40.0, 70.0),
            PropertyKind::ElectronDensity => (0.8, 1.2),
            PropertyKind::HomoLumoGap => (4.0, 6.0),
            PropertyKind::CoordinationNumber => (5.0, 6.0),
            PropertyKind::PKa => (6.5, 8.5),
        }
    }

    /// Reads the property's value out of a `Properties` record.
    pub fn of(&self, properties: &Properties) -> f64 {
        match self {
            PropertyKind::BindingEnergy => properties.binding_energy,
            PropertyKind::ActivationBarrier => properties.activation_barrier,
            PropertyKind::ElectronDensity => properties.electron_density,
            PropertyKind::HomoLumoGap => properties.homo_lumo_gap,
            PropertyKind::CoordinationNumber => properties.coordination_number,
            PropertyKind::PKa => properties.pka,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_chemicals_target_lead() {
        assert_eq!(BaseChemical::TrisodiumPhosphate.target_metal(), Metal::Lead);
        assert_eq!(BaseChemical::PhosphoricAcid.target_metal(), Metal::Lead);
        assert_eq!(BaseChemical::IronOxides.target_metal(), Metal::Arsenic);
        assert_eq!(BaseChemical::FerricSulfate.target_metal(), Metal::Arsenic);
    }

    #[test]
    fn amine_contributes_two_sites() {
        assert_eq!(FunctionalGroupKind::Amine.data().coordination_sites, 2);
        assert_eq!(FunctionalGroupKind::Hydroxyl.data().coordination_sites, 1);
        assert_eq!(FunctionalGroupKind::Thiol.data().coordination_sites, 1);
    }

    #[test]
    fn property_kinds_cover_all_fields() {
        let baseline = BaseChemical::TrisodiumPhosphate.baseline();
        let read: Vec<f64> = PROPERTY_KINDS.iter().map(|k| k.of(&baseline)).collect();
        assert_eq!(read, vec![-485.0, 68.0, 0.72, 3.1, 4.0, 12.7]);
    }
}
