use crate::config::Config;
use crate::game::geometry::Bounds;
use crate::game::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Spans the top or bottom edge, moves along x
    Horizontal,
    /// Spans the left or right edge, moves along y
    Vertical,
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub orientation: Orientation,
    pub speed: f32,
    /// Field size along the movement axis
    travel: f32,
}

impl Paddle {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        orientation: Orientation,
        speed: f32,
        travel: f32,
    ) -> Self {
        let mut paddle = Self { x, y, width, height, orientation, speed, travel };
        paddle.clamp();
        paddle
    }

    /// Paddle guarding `side`, centered along its edge.
    pub fn for_side(side: Side, config: &Config) -> Self {
        let (w, h) = (config.field_width, config.field_height);
        let len = config.paddle_length;
        let thick = config.paddle_thickness;
        let margin = config.paddle_margin;
        let speed = config.paddle_speed;

        match side {
            Side::Top => Self::new(w / 2.0 - len / 2.0, margin, len, thick, Orientation::Horizontal, speed, w),
            Side::Bottom => Self::new(w / 2.0 - len / 2.0, h - margin - thick, len, thick, Orientation::Horizontal, speed, w),
            Side::Left => Self::new(margin, h / 2.0 - len / 2.0, thick, len, Orientation::Vertical, speed, h),
            Side::Right => Self::new(w - margin - thick, h / 2.0 - len / 2.0, thick, len, Orientation::Vertical, speed, h),
        }
    }

    /// Move toward the origin (left or up).
    pub fn move_negative(&mut self) {
        self.shift(-self.speed);
    }

    /// Move away from the origin (right or down).
    pub fn move_positive(&mut self) {
        self.shift(self.speed);
    }

    pub fn bounding_box(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Extent along the movement axis
    pub fn length(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    pub fn half_length(&self) -> f32 {
        self.length() / 2.0
    }

    /// Midpoint of the paddle along its movement axis
    pub fn center_along_axis(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.x + self.width / 2.0,
            Orientation::Vertical => self.y + self.height / 2.0,
        }
    }

    fn shift(&mut self, delta: f32) {
        match self.orientation {
            Orientation::Horizontal => self.x += delta,
            Orientation::Vertical => self.y += delta,
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        let max = (self.travel - self.length()).max(0.0);
        match self.orientation {
            Orientation::Horizontal => self.x = self.x.clamp(0.0, max),
            Orientation::Vertical => self.y = self.y.clamp(0.0, max),
        }
    }
}
