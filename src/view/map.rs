use egui::Shape;

use crate::icons::{IconResolver, IconSource, MarkerIcon};
use crate::model::SpawnPoint;

use super::data::{CanvasData, ViewPortFilter, INITIAL_ZOOM, MAP_CENTER};
use super::outposts::OutpostPage;

const ROUTE_COLOR: egui::Color32 = egui::Color32::RED;
const PIN_COLOR: egui::Color32 = egui::Color32::from_rgb(203, 43, 62);
const GRID_COLOR: egui::Color32 = egui::Color32::DARK_GRAY;

/// A spawn point as it is drawn this frame.
pub(super) struct Marker {
    pub(super) index: usize,
    pub(super) position: egui::Pos2,
    pub(super) rect: egui::Rect,
    pub(super) icon: MarkerIcon,
}

/// What a click on the map landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MapClick {
    Marker(usize),
    Background,
}

impl OutpostPage {
    /// Draws the map and reports where it was clicked, if it was.
    #[allow(clippy::too_many_lines)] // UI Code, am I right, hahah
    pub(super) fn ui_map(&mut self, ui: &mut egui::Ui, icons: &IconResolver) -> Option<MapClick> {
        let spawn_points = self.spawn_points.items();
        let routes = self.routes.items();
        let selected_id = self.selection.selected().map(|point| point.id.clone());
        let popup_id = self.popup.clone();
        let mut clicked = None;

        egui::Frame::canvas(ui.style()).show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                ui.available_size_before_wrap(),
                egui::Sense::click_and_drag(),
            );

            let canvas = self
                .canvas
                .get_or_insert_with(|| CanvasData::centered_on(MAP_CENTER, response.rect, INITIAL_ZOOM));

            //DRAG
            canvas.world_offset -= canvas.scale_screen_to_world(response.drag_delta());

            // ZOOM
            if response.hovered() {
                let scroll_delta = ui.ctx().input(|input| input.raw_scroll_delta.y);
                if let Some(mouse_position) = response.hover_pos() {
                    if scroll_delta > 0.0 {
                        canvas.zoom_around(mouse_position.to_vec2(), 1.2);
                    } else if scroll_delta < 0.0 {
                        canvas.zoom_around(mouse_position.to_vec2(), 1.0 / 1.2);
                    }
                }
            }

            let filter = ViewPortFilter::new(canvas, response.rect);

            // DRAW GRID
            draw_graticule(&painter, canvas, &filter);

            // DRAW ROUTES
            for route in routes.iter() {
                let points: Vec<egui::Pos2> = route
                    .world_positions()
                    .map(|world| canvas.world_to_screen(world).to_pos2())
                    .collect();
                if points.len() >= 2 {
                    painter.add(Shape::line(points, egui::Stroke::new(2.0, ROUTE_COLOR)));
                }
            }

            // DRAW MARKERS
            let markers = place_markers(&spawn_points, canvas, &filter, icons);
            for marker in &markers {
                let selected = selected_id.as_deref() == Some(spawn_points[marker.index].id.as_str());
                paint_marker(ui, &painter, marker, selected);
            }

            // markers painted last are on top, so they win the hit test
            if response.clicked() {
                clicked = response.interact_pointer_pos().map(|pos| {
                    markers
                        .iter()
                        .rev()
                        .find(|marker| marker.rect.contains(pos))
                        .map_or(MapClick::Background, |marker| MapClick::Marker(marker.index))
                });
            }

            // POPUP WITH SPAWN POINT INFORMATION
            let popup = markers.iter().find(|marker| {
                popup_id.as_deref() == Some(spawn_points[marker.index].id.as_str())
            });
            if let Some(marker) = popup {
                ui_popup(ui.ctx(), marker, &spawn_points[marker.index]);
            }

            response
        });

        clicked
    }
}

/// One marker per spawn point inside the viewport, in list order.
pub(super) fn place_markers(
    spawn_points: &[SpawnPoint],
    canvas: &CanvasData,
    filter: &ViewPortFilter,
    icons: &IconResolver,
) -> Vec<Marker> {
    spawn_points
        .iter()
        .enumerate()
        .filter(|(_, point)| filter.position_in_viewport(point.world_position()))
        .map(|(index, point)| {
            let icon = icons.resolve(&point.name);
            let position = canvas.world_to_screen(point.world_position()).to_pos2();
            Marker {
                index,
                position,
                rect: icon.rect_at(position),
                icon,
            }
        })
        .collect()
}

fn draw_graticule(painter: &egui::Painter, canvas: &CanvasData, filter: &ViewPortFilter) {
    let solid = egui::Stroke::new(1.5, GRID_COLOR);
    for lon in (-6i16..=6).map(|i| f32::from(i) * 30.0) {
        let one = canvas.world_to_screen(egui::vec2(lon, -90.0)).to_pos2();
        let two = canvas.world_to_screen(egui::vec2(lon, 90.0)).to_pos2();
        painter.line_segment([one, two], solid);
    }
    for lat in (-3i16..=3).map(|i| f32::from(i) * 30.0) {
        let one = canvas.world_to_screen(egui::vec2(-180.0, lat)).to_pos2();
        let two = canvas.world_to_screen(egui::vec2(180.0, lat)).to_pos2();
        painter.line_segment([one, two], solid);
    }

    if canvas.zoom > 8.0 {
        let dashed = egui::Stroke::new(1.0, GRID_COLOR);
        for lon in (-18i16..=18)
            .map(|i| f32::from(i) * 10.0)
            .filter(|&lon| filter.x_in_viewport(lon))
        {
            let one = canvas.world_to_screen(egui::vec2(lon, -90.0)).to_pos2();
            let two = canvas.world_to_screen(egui::vec2(lon, 90.0)).to_pos2();
            painter.add(Shape::dashed_line(&[one, two], dashed, 7.0, 7.0));
        }
        for lat in (-9i16..=9)
            .map(|i| f32::from(i) * 10.0)
            .filter(|&lat| filter.y_in_viewport(lat))
        {
            let one = canvas.world_to_screen(egui::vec2(-180.0, lat)).to_pos2();
            let two = canvas.world_to_screen(egui::vec2(180.0, lat)).to_pos2();
            painter.add(Shape::dashed_line(&[one, two], dashed, 7.0, 7.0));
        }
    }
}

fn paint_marker(ui: &egui::Ui, painter: &egui::Painter, marker: &Marker, selected: bool) {
    if let Some(shadow) = marker.icon.shadow {
        let rect = egui::Rect::from_min_size(marker.position - shadow.anchor, shadow.size);
        painter.circle_filled(
            rect.center_bottom() - egui::vec2(0.0, rect.height() / 4.0),
            rect.width() / 4.0,
            egui::Color32::from_black_alpha(60),
        );
    }

    match &marker.icon.source {
        IconSource::Image(uri) => egui::Image::new(uri.as_str()).paint_at(ui, marker.rect),
        IconSource::Fallback => paint_pin(painter, marker.rect),
    }

    if selected {
        painter.rect_stroke(
            marker.rect.expand(2.0),
            egui::Rounding::same(4.0),
            egui::Stroke::new(2.0, egui::Color32::GOLD),
        );
    }
}

/// a tear drop shaped pin with its tip at the bottom center of `rect`
fn paint_pin(painter: &egui::Painter, rect: egui::Rect) {
    let radius = rect.width() / 2.0;
    let head = rect.center_top() + egui::vec2(0.0, radius);
    let tip = rect.center_bottom();
    painter.add(Shape::convex_polygon(
        vec![
            head + egui::vec2(-radius * 0.85, radius * 0.5),
            head + egui::vec2(radius * 0.85, radius * 0.5),
            tip,
        ],
        PIN_COLOR,
        egui::Stroke::NONE,
    ));
    painter.circle_filled(head, radius, PIN_COLOR);
    painter.circle_filled(head, radius / 2.5, egui::Color32::WHITE);
}

fn ui_popup(ctx: &egui::Context, marker: &Marker, point: &SpawnPoint) {
    egui::Area::new(egui::Id::new("spawn point popup"))
        .order(egui::Order::Tooltip)
        .fixed_pos(marker.position + marker.icon.popup_anchor)
        .pivot(egui::Align2::CENTER_BOTTOM)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(280.0);
                ui.strong(&point.name);
                for (label, value) in point.detail_rows() {
                    ui.label(format!("{label} {value}"));
                }
            });
        });
}
