#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pointer-driven camera that pans the world map inside the viewport.
//!
//! The camera offset is presentation state owned by the input and render
//! loop, never by the navigation world. The offset is the screen position of
//! the map's top-left corner. Panning keeps the map covering the viewport
//! whenever the map is large enough to do so.

use glam::IVec2;
use quiztasy_core::MapPoint;

/// Pointer interactions consumed by the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerInput {
    /// Primary button went down at the provided screen position.
    Pressed(IVec2),
    /// Pointer moved to the provided screen position.
    Moved(IVec2),
    /// Primary button was released.
    Released,
}

/// Drag-to-pan camera clamped to the map bounds.
#[derive(Clone, Debug)]
pub struct Camera {
    viewport: IVec2,
    map_size: IVec2,
    offset: IVec2,
    last_pointer: Option<IVec2>,
}

impl Camera {
    /// Creates a camera showing the top-left corner of the map.
    #[must_use]
    pub fn new(viewport: IVec2, map_size: IVec2) -> Self {
        Self {
            viewport,
            map_size,
            offset: IVec2::ZERO,
            last_pointer: None,
        }
    }

    /// Screen position of the map's top-left corner.
    #[must_use]
    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Reports whether a drag gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.last_pointer.is_some()
    }

    /// Consumes a batch of pointer inputs in order.
    pub fn handle(&mut self, inputs: &[PointerInput]) {
        for input in inputs {
            match *input {
                PointerInput::Pressed(pointer) => self.press(pointer),
                PointerInput::Moved(pointer) => self.drag_to(pointer),
                PointerInput::Released => self.release(),
            }
        }
    }

    /// Starts a drag gesture at `pointer`.
    pub fn press(&mut self, pointer: IVec2) {
        self.last_pointer = Some(pointer);
    }

    /// Pans by the pointer delta since the previous position. Ignored unless dragging.
    pub fn drag_to(&mut self, pointer: IVec2) {
        let Some(last) = self.last_pointer else {
            return;
        };
        self.last_pointer = Some(pointer);
        self.pan_by(pointer - last);
    }

    /// Ends the current drag gesture.
    pub fn release(&mut self) {
        self.last_pointer = None;
    }

    /// Shifts the offset by `delta`, clamped to the map bounds.
    pub fn pan_by(&mut self, delta: IVec2) {
        self.offset = self.clamp(self.offset + delta);
    }

    /// Updates the viewport size, re-clamping the current offset.
    pub fn resize_viewport(&mut self, viewport: IVec2) {
        self.viewport = viewport;
        self.offset = self.clamp(self.offset);
    }

    /// Converts a screen position into map space.
    #[must_use]
    pub fn to_map_space(&self, screen: IVec2) -> MapPoint {
        let map = screen - self.offset;
        MapPoint::new(map.x, map.y)
    }

    /// Converts a map-space point into a screen position.
    #[must_use]
    pub fn to_screen_space(&self, point: MapPoint) -> IVec2 {
        IVec2::new(point.x(), point.y()) + self.offset
    }

    /// Keeps the offset at or above `viewport - map_size` and otherwise at or
    /// below zero; the lower bound wins when the map is smaller than the viewport.
    fn clamp(&self, offset: IVec2) -> IVec2 {
        offset.min(IVec2::ZERO).max(self.viewport - self.map_size)
    }
}
