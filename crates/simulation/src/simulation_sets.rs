//! Deterministic engine ordering via `SystemSet` phases.
//!
//! Every engine system runs in the `Update` schedule inside one of these sets,
//! so the one-way data flow is explicit:
//!
//! ```text
//! Input  →  Model  →  Navigate  →  StageChange  →  Animate  →  Present
//! ```
//!
//! * **Input** – egui panels, keyboard shortcuts and pointer picking emit
//!   `NavCommand`s and write `SimulationInput`.
//! * **Model** – the simulation series is recomputed when inputs change.
//! * **Navigate** – the navigator applies commands and runs auto-advance,
//!   committing the new stage index and broadcasting `StageChanged`.
//! * **StageChange** – the ordered subscriber list (see [`StageChangeSet`]).
//! * **Animate** – per-frame driver loops (droplet, pipes, particles, shimmer).
//!   Drivers read `NavigatorState` and `SimulationResult` but never write them.
//! * **Present** – scene attribute writes and gizmos.

use bevy::prelude::*;

/// Ordered phases for systems running in the `Update` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EngineSet {
    Input,
    Model,
    Navigate,
    StageChange,
    Animate,
    Present,
}

/// Stage-change subscribers, invoked in this order after the navigator has
/// committed a new index. Subscribers register once at plugin build time.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum StageChangeSet {
    /// Re-render the stage text panel.
    Content,
    /// Highlight the active stage block in the scene.
    Highlight,
    /// Start the droplet move toward the new stage anchor.
    DropletTransition,
    /// Animate the pipe segment for a single forward step.
    PipeFill,
    /// Retint the droplet for the new stage.
    DropletColor,
    /// Start or tear down the sedimentation particle system.
    Sedimentation,
    /// Rebuild both line charts.
    Charts,
}
