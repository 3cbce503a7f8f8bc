// src/infiltration/metal.rs

//! Heavy-metal profiles and site parameters.

use super::features;

/// The two modelled contaminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metal {
    /// Lead (Pb): pH-dominated mobility on the 0-100 response scale.
    Lead,
    /// Arsenic (As): pH response already fractional, soil term dominates.
    Arsenic,
}

impl Metal {
    /// Human-readable element name with symbol.
    pub fn label(&self) -> &'static str {
        match self {
            Metal::Lead => "Lead (Pb)",
            Metal::Arsenic => "Arsenic (As)",
        }
    }

    /// Weight of the soil-type response in the combined influence.
    pub fn soil_weight(&self) -> f64 {
        match self {
            Metal::Lead => 0.0878,
            Metal::Arsenic => 0.1148,
        }
    }

    /// Weight of the pH response in the combined influence.
    pub fn ph_weight(&self) -> f64 {
        match self {
            Metal::Lead => 0.9122,
            Metal::Arsenic => 0.8852,
        }
    }

    /// Per-layer downward transition probability under the given conditions.
    ///
    /// Lead combines its terms on the 0-100 scale and rescales; arsenic is
    /// already fractional. Both are clamped into [0, 1].
    pub fn step_probability(&self, conditions: &SiteConditions) -> f64 {
        let soil = features::soil_type_response(conditions.soil_index);
        match self {
            Metal::Lead => {
                let ph = features::ph_lead_response(conditions.ph);
                let combined = self.soil_weight() * soil + self.ph_weight() * ph;
                (combined / 100.0).min(1.0)
            }
            Metal::Arsenic => {
                let ph = features::ph_arsenic_response(conditions.ph);
                (self.soil_weight() * soil + self.ph_weight() * ph).min(1.0)
            }
        }
    }
}

impl std::fmt::Display for Metal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Measured conditions of the simulated site, passed explicitly into the
/// model (no global parameter state).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteConditions {
    /// Soil-type index fed into the soil response curve.
    pub soil_index: f64,
    /// Soil pH.
    pub ph: f64,
    /// Elapsed time for the runoff curve; 0 means the initial wet surface.
    pub time: f64,
}

impl SiteConditions {
    /// Surface (runoff) probability: full saturation at `time = 0`.
    pub fn runoff_probability(&self) -> f64 {
        if self.time > 0.0 {
            features::runoff_response(self.time)
        } else {
            1.0
        }
    }
}

impl Default for SiteConditions {
    /// The reference site of the study: loamy index 10, pH 4, initial time.
    fn default() -> Self {
        Self { soil_index: 10.0, ph: 4.0, time: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_step_probabilities() {
        let site = SiteConditions::default();
        assert!((Metal::Lead.step_probability(&site) - 0.246206325).abs() < 1e-8);
        assert!((Metal::Arsenic.step_probability(&site) - 0.115637836).abs() < 1e-8);
    }

    #[test]
    fn runoff_is_full_at_time_zero() {
        let site = SiteConditions::default();
        assert_eq!(site.runoff_probability(), 1.0);
        let later = SiteConditions { time: 5000.0, ..site };
        assert!(later.runoff_probability() < 1.0);
        assert!(later.runoff_probability() > 0.0);
    }

    #[test]
    fn weights_sum_to_one() {
        for metal in [Metal::Lead, Metal::Arsenic] {
            assert!((metal.soil_weight() + metal.ph_weight() - 1.0).abs() < 1e-12);
        }
    }
}
