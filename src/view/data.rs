use std::ops::{Add, Div, Mul, Sub};

/// where the map looks when a page is opened, as (longitude, -latitude)
pub const MAP_CENTER: egui::Vec2 = egui::vec2(70.0, -40.0);
/// screen points per degree, roughly a slippy map at zoom level 3
pub const INITIAL_ZOOM: f32 = 5.7;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 400.0;

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub struct CanvasData {
    /// world position (degrees) that is drawn at the screen origin
    pub world_offset: egui::Vec2,
    /// screen points per degree
    pub zoom: f32,
}

impl CanvasData {
    /// a canvas that shows `center` in the middle of `screen_rect`
    pub fn centered_on(center: egui::Vec2, screen_rect: egui::Rect, zoom: f32) -> Self {
        Self {
            world_offset: center - screen_rect.center().to_vec2() / zoom,
            zoom,
        }
    }

    pub fn world_to_screen<T>(&self, world: T) -> T
    where
        T: Mul<f32, Output = T>,
        T: Sub<egui::Vec2, Output = T>,
    {
        self.scale_world_to_screen(world - self.world_offset)
    }

    pub fn screen_to_world<T>(&self, screen: T) -> T
    where
        T: Div<f32, Output = T>,
        T: Add<egui::Vec2, Output = T>,
    {
        self.scale_screen_to_world(screen) + self.world_offset
    }

    pub fn scale_screen_to_world<T>(&self, screen: T) -> T
    where
        T: Div<f32, Output = T>,
    {
        screen / self.zoom
    }

    pub fn scale_world_to_screen<T>(&self, world: T) -> T
    where
        T: Mul<f32, Output = T>,
    {
        world * self.zoom
    }

    /// Zoom by `factor` while keeping the world position under `pivot` (screen) in place.
    pub fn zoom_around(&mut self, pivot: egui::Vec2, factor: f32) {
        // as per https://www.youtube.com/watch?v=ZQ8qtAizis4
        let before = self.screen_to_world(pivot);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let after = self.screen_to_world(pivot);
        self.world_offset += before - after;
    }
}

#[allow(clippy::struct_field_names)]
pub struct ViewPortFilter {
    world_l: f32,
    world_r: f32,
    world_b: f32,
    world_t: f32,
}

impl ViewPortFilter {
    pub fn new(canvas: &CanvasData, screen_rect: egui::Rect) -> Self {
        let top_left = canvas.screen_to_world(screen_rect.left_top().to_vec2());
        let bot_right = canvas.screen_to_world(screen_rect.right_bottom().to_vec2());
        Self {
            world_l: top_left.x,
            world_r: bot_right.x,
            world_t: top_left.y,
            world_b: bot_right.y,
        }
    }

    pub fn position_in_viewport(&self, world: egui::Vec2) -> bool {
        self.x_in_viewport(world.x) && self.y_in_viewport(world.y)
    }

    pub fn x_in_viewport(&self, x: f32) -> bool {
        self.world_l < x && x < self.world_r
    }

    pub fn y_in_viewport(&self, y: f32) -> bool {
        self.world_t < y && y < self.world_b
    }
}
