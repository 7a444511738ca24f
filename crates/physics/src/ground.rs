//! Scrolling floor strip. Drawing only: collisions use the floor line in
//! [`CourseParams`](crate::CourseParams), never this strip.

/// Width of one ground tile at the reference scale.
pub const GROUND_WIDTH: f32 = 672.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ground {
    pub y: f32,
    pub x1: f32,
    pub x2: f32,
    pub width: f32,
}

impl Ground {
    #[must_use]
    pub const fn new(y: f32, width: f32) -> Self {
        Self { y, x1: 0.0, x2: width, width }
    }

    /// Scroll both tiles, moving a tile behind the other once it has fully
    /// left the screen.
    pub fn advance(&mut self, scroll_speed: f32) {
        self.x1 -= scroll_speed;
        self.x2 -= scroll_speed;

        if self.x1 + self.width < 0.0 {
            self.x1 = self.x2 + self.width;
        }
        if self.x2 + self.width < 0.0 {
            self.x2 = self.x1 + self.width;
        }
    }
}
