//! Line-chart geometry for the turbidity and microbe series.
//!
//! Graphs are built in a fixed 320x160 frame with y growing downward (the
//! way the panel painter expects it) and are always rebuilt from scratch:
//! there is no incremental patching of a previous graph.

use bevy::prelude::*;

use crate::config::STAGE_COUNT;
use crate::model::{SimulationRecomputed, SimulationResult, BASE_MICROBES, BASE_TURBIDITY_NTU};
use crate::navigator::{NavigatorState, StageChanged};
use crate::stages::STAGES;

pub const GRAPH_WIDTH: f32 = 320.0;
pub const GRAPH_HEIGHT: f32 = 160.0;
pub const GRAPH_PAD: f32 = 30.0;

pub const TURBIDITY_COLOR: [u8; 3] = [0x2b, 0x6c, 0xb0];
pub const MICROBE_COLOR: [u8; 3] = [0xc5, 0x30, 0x30];

/// Legend entries, in display order.
pub const LEGEND: [(&str, [u8; 3]); 2] = [("Turbidity", TURBIDITY_COLOR), ("Microbes", MICROBE_COLOR)];

#[derive(Debug, Clone, PartialEq)]
pub struct GraphPoint {
    pub stage: usize,
    /// Position inside the graph frame.
    pub position: Vec2,
    pub value: f64,
    /// e.g. `"Filtration: 9.9 NTU"`.
    pub label: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineGraph {
    /// Axis polyline: top of the y axis, origin, end of the x axis.
    pub axis: [Vec2; 3],
    pub points: Vec<GraphPoint>,
    pub color: Srgba,
    pub unit: &'static str,
    pub log_scale: bool,
    pub max_label: String,
    pub zero_label: String,
}

impl LineGraph {
    pub fn polyline(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().map(|p| p.position)
    }

    pub fn highlighted(&self) -> Option<&GraphPoint> {
        self.points.iter().find(|p| p.highlighted)
    }
}

fn scaled(value: f64, log_scale: bool) -> f64 {
    if log_scale {
        if value > 0.0 {
            value.log10()
        } else {
            0.0
        }
    } else {
        value
    }
}

/// Build a complete graph for `series`.
///
/// X maps the stage index evenly across the frame; y maps the value (after
/// `log10` when `log_scale` is set) normalized against `max_value`.
pub fn draw_line_graph(
    series: &[f64],
    max_value: f64,
    color: Srgba,
    unit: &'static str,
    log_scale: bool,
    highlight: Option<usize>,
) -> LineGraph {
    let w = GRAPH_WIDTH;
    let h = GRAPH_HEIGHT;
    let pad = GRAPH_PAD;
    let max = scaled(max_value, log_scale);
    let spans = series.len().saturating_sub(1).max(1) as f32;
    let precision = if log_scale { 0 } else { 1 };

    let points = series
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let norm = if max > 0.0 {
                (scaled(value, log_scale) / max) as f32
            } else {
                0.0
            };
            let x = pad + (i as f32 / spans) * (w - 2.0 * pad);
            let y = (h - pad) - norm * (h - 2.0 * pad);
            let title = STAGES.get(i).map_or("Stage", |s| s.title);
            GraphPoint {
                stage: i,
                position: Vec2::new(x, y),
                value,
                label: format!("{title}: {value:.precision$} {unit}"),
                highlighted: highlight == Some(i),
            }
        })
        .collect();

    let max_label = if log_scale {
        format!("10^{:.0}", max)
    } else {
        format!("{:.0}", max_value)
    };

    LineGraph {
        axis: [
            Vec2::new(pad, pad),
            Vec2::new(pad, h - pad),
            Vec2::new(w - pad, h - pad),
        ],
        points,
        color,
        unit,
        log_scale,
        max_label,
        zero_label: "0".to_string(),
    }
}

/// Both charts as last built. `generation` bumps on every rebuild.
#[derive(Resource, Debug, Clone)]
pub struct ChartCache {
    pub turbidity: LineGraph,
    pub microbes: LineGraph,
    pub generation: u64,
}

impl Default for ChartCache {
    fn default() -> Self {
        let (turbidity, microbes) = build_pair(&SimulationResult::default(), Some(0));
        Self {
            turbidity,
            microbes,
            generation: 0,
        }
    }
}

impl ChartCache {
    pub fn rebuild(&mut self, result: &SimulationResult, current_stage: usize) {
        let highlight = (current_stage < STAGE_COUNT).then_some(current_stage);
        let (turbidity, microbes) = build_pair(result, highlight);
        self.turbidity = turbidity;
        self.microbes = microbes;
        self.generation += 1;
    }
}

fn build_pair(result: &SimulationResult, highlight: Option<usize>) -> (LineGraph, LineGraph) {
    let [r, g, b] = TURBIDITY_COLOR;
    let turbidity = draw_line_graph(
        &result.turbidity,
        BASE_TURBIDITY_NTU,
        Srgba::rgb_u8(r, g, b),
        "NTU",
        false,
        highlight,
    );
    let [r, g, b] = MICROBE_COLOR;
    let microbes = draw_line_graph(
        &result.microbes,
        BASE_MICROBES,
        Srgba::rgb_u8(r, g, b),
        "Count",
        true,
        highlight,
    );
    (turbidity, microbes)
}

/// Rebuild both charts after any recompute or stage change this frame.
pub fn rebuild_charts(
    mut recomputed: EventReader<SimulationRecomputed>,
    mut stage_changed: EventReader<StageChanged>,
    result: Res<SimulationResult>,
    nav: Res<NavigatorState>,
    mut charts: ResMut<ChartCache>,
) {
    let recomputes = recomputed.read().count();
    let changes = stage_changed.read().count();
    if recomputes == 0 && changes == 0 {
        return;
    }
    charts.rebuild(&result, nav.current_stage());
}
