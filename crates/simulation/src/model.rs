//! Coagulation efficiency model and the per-stage water quality series.
//!
//! Three operator inputs (coagulant dose, rapid-mix time, settling time) each
//! pass through a Gaussian "bell" response centred on its optimum. Their mean
//! maps to an efficiency in `[0.4, 1.3]`, which then modulates how much
//! turbidity the coagulation and sedimentation stages remove.
//!
//! Everything here is pure; [`recompute_simulation`] overwrites
//! [`SimulationResult`] wholesale whenever [`SimulationInput`] changes.

use bevy::prelude::*;

use crate::config::{DOSE_RANGE, MIX_TIME_RANGE, SETTLE_TIME_RANGE, STAGE_COUNT};

// =============================================================================
// Constants
// =============================================================================

/// Raw water entering the plant.
pub const BASE_TURBIDITY_NTU: f64 = 120.0;
pub const BASE_MICROBES: f64 = 1_000_000.0;

/// Optimum and tolerance width of each bell response.
pub const DOSE_OPTIMUM: (f64, f64) = (45.0, 18.0);
pub const MIX_OPTIMUM: (f64, f64) = (60.0, 22.0);
pub const SETTLE_OPTIMUM: (f64, f64) = (15.0, 6.0);

/// Efficiency floor when every input is far from its optimum.
pub const EFFICIENCY_FLOOR: f64 = 0.4;
/// Span added on top of the floor at the joint optimum.
pub const EFFICIENCY_SPAN: f64 = 0.9;

/// Nominal fraction of the incoming load that survives one stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageReduction {
    pub turbidity: f64,
    pub microbes: f64,
    /// When set, the turbidity factor is modulated by efficiency with this weight.
    pub efficiency_weight: Option<f64>,
}

pub const REDUCTION_MODEL: [StageReduction; STAGE_COUNT] = [
    StageReduction {
        turbidity: 1.0,
        microbes: 1.0,
        efficiency_weight: None,
    },
    StageReduction {
        turbidity: 0.55,
        microbes: 0.95,
        efficiency_weight: Some(1.0),
    },
    StageReduction {
        turbidity: 0.40,
        microbes: 0.90,
        efficiency_weight: Some(0.7),
    },
    StageReduction {
        turbidity: 0.25,
        microbes: 0.60,
        efficiency_weight: None,
    },
    StageReduction {
        turbidity: 0.95,
        microbes: 0.001,
        efficiency_weight: None,
    },
    StageReduction {
        turbidity: 0.98,
        microbes: 0.999,
        efficiency_weight: None,
    },
];

// =============================================================================
// Pure model
// =============================================================================

/// Gaussian bell: 1.0 at `center`, decaying symmetrically with `width`.
#[inline]
pub fn bell(x: f64, center: f64, width: f64) -> f64 {
    (-((x - center) / width).powi(2)).exp()
}

/// Composite coagulation efficiency for the three operator inputs.
pub fn coag_efficiency(dose: f64, mix_time: f64, settle_time: f64) -> f64 {
    let d = bell(dose, DOSE_OPTIMUM.0, DOSE_OPTIMUM.1);
    let m = bell(mix_time, MIX_OPTIMUM.0, MIX_OPTIMUM.1);
    let t = bell(settle_time, SETTLE_OPTIMUM.0, SETTLE_OPTIMUM.1);
    EFFICIENCY_FLOOR + EFFICIENCY_SPAN * ((d + m + t) / 3.0)
}

/// Efficiency-adjusted survival factor, never above 1 (no stage adds load).
#[inline]
pub fn adjusted_factor(nominal: f64, efficiency: f64, weight: f64) -> f64 {
    (nominal * (2.0 - efficiency * weight)).min(1.0)
}

/// Turbidity survival factor actually applied at `stage` for `efficiency`.
pub fn turbidity_factor(stage: &StageReduction, efficiency: f64) -> f64 {
    match stage.efficiency_weight {
        Some(weight) => adjusted_factor(stage.turbidity, efficiency, weight),
        None => stage.turbidity,
    }
}

/// Turbidity and microbe values after each stage for a given efficiency.
pub fn compute_series(efficiency: f64) -> SimulationResult {
    let mut turbidity = [0.0; STAGE_COUNT];
    let mut microbes = [0.0; STAGE_COUNT];
    turbidity[0] = BASE_TURBIDITY_NTU;
    microbes[0] = BASE_MICROBES;

    for i in 1..STAGE_COUNT {
        let reduction = &REDUCTION_MODEL[i];
        turbidity[i] = turbidity[i - 1] * turbidity_factor(reduction, efficiency);
        microbes[i] = microbes[i - 1] * reduction.microbes;
    }

    SimulationResult {
        efficiency,
        turbidity,
        microbes,
    }
}

// =============================================================================
// Resources
// =============================================================================

/// Operator-adjustable treatment parameters.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SimulationInput {
    /// Coagulant dose (mg/L).
    pub dose: f64,
    /// Rapid-mix time (s).
    pub mix_time: f64,
    /// Settling time (min).
    pub settle_time: f64,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            dose: 30.0,
            mix_time: 40.0,
            settle_time: 10.0,
        }
    }
}

impl SimulationInput {
    /// Build an input with every value clamped into its slider range.
    pub fn clamped(dose: f64, mix_time: f64, settle_time: f64) -> Self {
        Self {
            dose: dose.clamp(DOSE_RANGE.0, DOSE_RANGE.1),
            mix_time: mix_time.clamp(MIX_TIME_RANGE.0, MIX_TIME_RANGE.1),
            settle_time: settle_time.clamp(SETTLE_TIME_RANGE.0, SETTLE_TIME_RANGE.1),
        }
    }

    pub fn efficiency(&self) -> f64 {
        coag_efficiency(self.dose, self.mix_time, self.settle_time)
    }
}

/// Derived efficiency and series; replaced in full on every recompute.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub efficiency: f64,
    pub turbidity: [f64; STAGE_COUNT],
    pub microbes: [f64; STAGE_COUNT],
}

impl Default for SimulationResult {
    fn default() -> Self {
        compute_series(SimulationInput::default().efficiency())
    }
}

impl SimulationResult {
    pub fn final_turbidity(&self) -> f64 {
        self.turbidity[STAGE_COUNT - 1]
    }

    pub fn final_microbes(&self) -> f64 {
        self.microbes[STAGE_COUNT - 1]
    }

    /// Summary figures for the lab panel.
    pub fn metrics(&self) -> LabMetrics {
        let final_t = self.final_turbidity();
        let final_m = self.final_microbes();
        LabMetrics {
            efficiency_pct: self.efficiency * 100.0,
            final_turbidity: final_t,
            turbidity_removed_pct: (1.0 - final_t / self.turbidity[0]) * 100.0,
            microbe_log_reduction: (self.microbes[0] / final_m).log10(),
            microbes_removed_pct: (1.0 - final_m / self.microbes[0]) * 100.0,
        }
    }
}

/// Headline numbers shown next to the sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabMetrics {
    pub efficiency_pct: f64,
    pub final_turbidity: f64,
    pub turbidity_removed_pct: f64,
    pub microbe_log_reduction: f64,
    pub microbes_removed_pct: f64,
}

/// Sent after [`SimulationResult`] has been overwritten.
#[derive(Event, Debug, Clone, Copy)]
pub struct SimulationRecomputed {
    pub efficiency: f64,
}

// =============================================================================
// Systems
// =============================================================================

/// Recompute the series whenever the inputs change (including the first frame).
pub fn recompute_simulation(
    input: Res<SimulationInput>,
    mut result: ResMut<SimulationResult>,
    mut recomputed: EventWriter<SimulationRecomputed>,
) {
    if !input.is_changed() {
        return;
    }
    let efficiency = input.efficiency();
    *result = compute_series(efficiency);
    debug!(
        "Simulation: dose={:.1} mix={:.1} settle={:.1} -> efficiency {:.3}, final turbidity {:.2} NTU",
        input.dose,
        input.mix_time,
        input.settle_time,
        efficiency,
        result.final_turbidity()
    );
    recomputed.send(SimulationRecomputed { efficiency });
}
