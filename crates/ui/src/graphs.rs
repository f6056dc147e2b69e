use bevy_egui::egui;

use simulation::chart_data::{LineGraph, GRAPH_HEIGHT, GRAPH_WIDTH};

use crate::theme::to_color32;

/// Hover distance (points) at which a data point shows its label.
const HOVER_RADIUS: f32 = 10.0;
const POINT_RADIUS: f32 = 3.0;
const HIGHLIGHT_RADIUS: f32 = 5.5;

/// Index of the point nearest `cursor` within the hover radius.
pub fn hovered_point(graph: &LineGraph, cursor: egui::Pos2) -> Option<usize> {
    graph
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, egui::pos2(p.position.x, p.position.y).distance(cursor)))
        .filter(|(_, d)| *d <= HOVER_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Paint a prebuilt graph into a fixed-size frame.
pub fn paint_line_graph(ui: &mut egui::Ui, graph: &LineGraph, title: &str) {
    ui.label(egui::RichText::new(title).strong());
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(GRAPH_WIDTH, GRAPH_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 2.0, egui::Color32::WHITE);

    let origin = rect.min.to_vec2();
    let to_screen = |p: bevy::math::Vec2| egui::pos2(p.x, p.y) + origin;

    let axis_stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(120));
    painter.line_segment([to_screen(graph.axis[0]), to_screen(graph.axis[1])], axis_stroke);
    painter.line_segment([to_screen(graph.axis[1]), to_screen(graph.axis[2])], axis_stroke);

    let label_font = egui::FontId::proportional(10.0);
    let label_color = egui::Color32::from_gray(90);
    painter.text(
        to_screen(graph.axis[0]) - egui::vec2(4.0, 0.0),
        egui::Align2::RIGHT_CENTER,
        &graph.max_label,
        label_font.clone(),
        label_color,
    );
    painter.text(
        to_screen(graph.axis[1]) - egui::vec2(4.0, 0.0),
        egui::Align2::RIGHT_CENTER,
        &graph.zero_label,
        label_font,
        label_color,
    );

    let color = to_color32(graph.color);
    let line: Vec<egui::Pos2> = graph.polyline().map(to_screen).collect();
    painter.add(egui::Shape::line(line, egui::Stroke::new(2.0, color)));

    for point in &graph.points {
        let radius = if point.highlighted {
            HIGHLIGHT_RADIUS
        } else {
            POINT_RADIUS
        };
        painter.circle_filled(to_screen(point.position), radius, color);
        if point.highlighted {
            painter.circle_stroke(
                to_screen(point.position),
                radius + 2.0,
                egui::Stroke::new(1.5, color.gamma_multiply(0.5)),
            );
        }
    }

    if let Some(cursor) = response.hover_pos() {
        if let Some(index) = hovered_point(graph, cursor - origin) {
            response.on_hover_text(&graph.points[index].label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::chart_data::draw_line_graph;

    #[test]
    fn test_hover_picks_nearest_point_in_range() {
        let graph = draw_line_graph(
            &[120.0, 60.0, 30.0],
            120.0,
            bevy::color::Srgba::rgb(0.1, 0.3, 0.7),
            "NTU",
            false,
            None,
        );
        let p = graph.points[1].position;
        assert_eq!(hovered_point(&graph, egui::pos2(p.x + 3.0, p.y)), Some(1));
        assert_eq!(hovered_point(&graph, egui::pos2(p.x, p.y + 50.0)), None);
    }
}
