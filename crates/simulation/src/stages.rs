//! Stage registry: the six treatment stages in pipeline order.
//!
//! This is static, read-only data. Ordering is the treatment sequence and the
//! navigator only ever moves along it.

use bevy::prelude::*;

use crate::config::STAGE_COUNT;

/// One step of the treatment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub index: usize,
    pub title: &'static str,
    pub summary: &'static str,
    pub bullets: &'static [&'static str],
    /// Short learning tip shown under the bullets.
    pub tip: &'static str,
    /// Accent color (sRGB bytes) used for the stage heading and block.
    pub color: [u8; 3],
}

impl Stage {
    /// Accent color as a Bevy color.
    pub fn accent(&self) -> Color {
        Color::srgb_u8(self.color[0], self.color[1], self.color[2])
    }
}

pub const STAGES: [Stage; STAGE_COUNT] = [
    Stage {
        index: 0,
        title: "Intake (Screening)",
        summary: "Raw water enters from a source like a river, lake, or reservoir. \
                  Large debris is removed by metal screens.",
        bullets: &[
            "Removes sticks, leaves, trash",
            "Protects downstream equipment",
            "Flow may be adjusted based on demand",
        ],
        tip: "Intake prevents damage later. Think: remove the big stuff early!",
        color: [0x2b, 0x6c, 0xb0],
    },
    Stage {
        index: 1,
        title: "Coagulation & Flocculation",
        summary: "Chemicals (coagulants) are added and gentle mixing forms larger \
                  clumps called floc.",
        bullets: &[
            "Coagulants neutralize particle charges",
            "Flocculation uses slow mixing",
            "Creates heavier floc that will settle",
        ],
        tip: "Coagulants make tiny particles stick together, like static-cling dust bunnies.",
        color: [0x2c, 0x52, 0x82],
    },
    Stage {
        index: 2,
        title: "Sedimentation (Clarification)",
        summary: "Water sits in large basins so floc can settle to the bottom as sludge.",
        bullets: &[
            "Reduces turbidity significantly",
            "Sludge is removed and treated",
            "Clearer water moves onward",
        ],
        tip: "Gravity helps here: heavier floc sinks, leaving clearer water above.",
        color: [0x2b, 0x43, 0x6b],
    },
    Stage {
        index: 3,
        title: "Filtration",
        summary: "Remaining tiny particles and some microbes are removed as water \
                  passes through layers of sand, gravel, or membranes.",
        bullets: &[
            "Can use rapid sand, slow sand, or membrane filters",
            "Removes fine suspended matter",
            "Filters are periodically backwashed",
        ],
        tip: "Filters act like a maze the particles can't easily get through.",
        color: [0x23, 0x4e, 0x52],
    },
    Stage {
        index: 4,
        title: "Disinfection",
        summary: "Pathogens are killed or inactivated using chlorine, ozone, or UV \
                  light to make water safe to drink.",
        bullets: &[
            "Destroys bacteria, viruses, protozoa",
            "Residual disinfectant protects distribution system",
            "Dosage carefully controlled",
        ],
        tip: "Disinfection targets invisible pathogens: safety you can't see.",
        color: [0x28, 0x5e, 0x61],
    },
    Stage {
        index: 5,
        title: "Distribution",
        summary: "Clean water is pumped through pipes and storage tanks to homes, \
                  schools, and businesses.",
        bullets: &[
            "Maintains pressure in the system",
            "Residual chlorine keeps water safe",
            "Continuous monitoring for quality",
        ],
        tip: "Distribution keeps water moving and safe until you turn the tap.",
        color: [0x27, 0x67, 0x49],
    },
];

/// Water tint per stage, murky at intake and clear at distribution.
/// Shared by the droplet and the pipe fills.
pub const WATER_COLOR_STOPS: [[u8; 3]; STAGE_COUNT] = [
    [0x8b, 0x6e, 0x46],
    [0x7a, 0x74, 0x58],
    [0x5f, 0x85, 0x8c],
    [0x46, 0x96, 0xbe],
    [0x3c, 0xa5, 0xdc],
    [0x50, 0xbe, 0xf0],
];

/// Look up a stage by index.
pub fn stage(index: usize) -> Option<&'static Stage> {
    STAGES.get(index)
}

/// Water color for a stage; indices past the end clamp to the last stop.
pub fn water_color(index: usize) -> Srgba {
    let [r, g, b] = WATER_COLOR_STOPS[index.min(STAGE_COUNT - 1)];
    Srgba::rgb_u8(r, g, b)
}
