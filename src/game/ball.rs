use rand::Rng;

use crate::config::Config;
use crate::game::geometry::Bounds;
use crate::game::paddle::{Orientation, Paddle};
use crate::game::{Player, Side};

/// Tangential velocity added for a strike at the very tip of a paddle
pub const SPIN_FACTOR: f32 = 2.0;

// Launch angles stay this far (in degrees) from both axes so a fresh ball
// never travels straight at a single paddle.
const MIN_LAUNCH_DEG: f32 = 20.0;
const MAX_LAUNCH_DEG: f32 = 70.0;

#[derive(Debug, Clone)]
pub struct Ball {
    /// Top-left corner
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    speed: f32,
    field_width: f32,
    field_height: f32,
}

impl Ball {
    /// A centered ball with a random launch direction.
    pub fn new<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Self {
        let mut ball = Self {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            size: config.ball_size,
            speed: config.ball_speed,
            field_width: config.field_width,
            field_height: config.field_height,
        };
        ball.reset(rng);
        ball
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn velocity_magnitude(&self) -> f32 {
        self.vx.hypot(self.vy)
    }

    /// Back to the center of the field, launched at a fresh angle.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.x = (self.field_width - self.size) / 2.0;
        self.y = (self.field_height - self.size) / 2.0;

        let quadrant = rng.gen_range(0..4u8) as f32 * 90.0;
        let angle = (quadrant + rng.gen_range(MIN_LAUNCH_DEG..=MAX_LAUNCH_DEG)).to_radians();
        self.vx = self.speed * angle.cos();
        self.vy = self.speed * angle.sin();
    }

    /// One explicit Euler step.
    pub fn integrate(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    pub fn bounding_box(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.size, self.size)
    }

    /// Bounce off any paddle the ball overlaps while heading toward it.
    ///
    /// Paddles are checked one after another in top, bottom, left, right
    /// order, so a ball touching two paddles in the same tick gets both
    /// corrections applied in sequence. Returns how many bounces happened.
    pub fn resolve_paddle_collisions(
        &mut self,
        top: &Paddle,
        bottom: &Paddle,
        left: &Paddle,
        right: &Paddle,
    ) -> usize {
        let mut bounces = 0;
        for (side, paddle) in [
            (Side::Top, top),
            (Side::Bottom, bottom),
            (Side::Left, left),
            (Side::Right, right),
        ] {
            if self.bounce_off(side, paddle) {
                tracing::debug!(?side, vx = self.vx, vy = self.vy, "Ball bounced");
                bounces += 1;
            }
        }
        bounces
    }

    fn bounce_off(&mut self, side: Side, paddle: &Paddle) -> bool {
        if !self.bounding_box().intersects(&paddle.bounding_box()) {
            return false;
        }
        let approaching = match side {
            Side::Top => self.vy < 0.0,
            Side::Bottom => self.vy > 0.0,
            Side::Left => self.vx < 0.0,
            Side::Right => self.vx > 0.0,
        };
        if !approaching {
            return false;
        }

        match side {
            Side::Top => self.vy = self.vy.abs(),
            Side::Bottom => self.vy = -self.vy.abs(),
            Side::Left => self.vx = self.vx.abs(),
            Side::Right => self.vx = -self.vx.abs(),
        }
        self.apply_spin(paddle);
        true
    }

    /// Where the ball's center sits along the paddle, from -1 at the
    /// negative tip through 0 at the middle to 1 at the positive tip.
    pub fn strike_offset(&self, paddle: &Paddle) -> f32 {
        let half = self.size / 2.0;
        let ball_center = match paddle.orientation {
            Orientation::Horizontal => self.x + half,
            Orientation::Vertical => self.y + half,
        };
        let half_length = paddle.half_length();
        if half_length <= 0.0 {
            return 0.0;
        }
        ((ball_center - paddle.center_along_axis()) / half_length).clamp(-1.0, 1.0)
    }

    fn apply_spin(&mut self, paddle: &Paddle) {
        let spin = SPIN_FACTOR * self.strike_offset(paddle);
        match paddle.orientation {
            Orientation::Horizontal => self.vx += spin,
            Orientation::Vertical => self.vy += spin,
        }
        self.renormalize();
    }

    fn renormalize(&mut self) {
        let magnitude = self.velocity_magnitude();
        if magnitude > 0.0 {
            self.vx = self.vx / magnitude * self.speed;
            self.vy = self.vy / magnitude * self.speed;
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.x < 0.0 || self.x > self.field_width || self.y < 0.0 || self.y > self.field_height
    }

    /// Player charged with a life when the ball leaves the field here:
    /// anything in the top or left half belongs to player one.
    pub fn exit_side(&self) -> Player {
        if self.y < self.field_height / 2.0 || self.x < self.field_width / 2.0 {
            Player::One
        } else {
            Player::Two
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f32 = 1e-4;

    fn setup() -> (Config, Ball, [Paddle; 4]) {
        let config = Config::default();
        let mut rng = StdRng::seed_from_u64(7);
        let ball = Ball::new(&config, &mut rng);
        let paddles = Side::ALL.map(|side| Paddle::for_side(side, &config));
        (config, ball, paddles)
    }

    fn resolve(ball: &mut Ball, paddles: &[Paddle; 4]) -> usize {
        ball.resolve_paddle_collisions(&paddles[0], &paddles[1], &paddles[2], &paddles[3])
    }

    #[test]
    fn test_reset_centers_with_constant_speed() {
        let (config, mut ball, _) = setup();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..2 {
            ball.x = -50.0;
            ball.vx = 0.0;
            ball.reset(&mut rng);
            assert_eq!(ball.x + ball.size / 2.0, config.field_width / 2.0);
            assert_eq!(ball.y + ball.size / 2.0, config.field_height / 2.0);
            assert!((ball.velocity_magnitude() - config.ball_speed).abs() < EPSILON);
        }
    }

    #[test]
    fn test_reset_never_launches_along_an_axis() {
        let (_, mut ball, _) = setup();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            ball.reset(&mut rng);
            assert!(ball.vx.abs() > 1.0);
            assert!(ball.vy.abs() > 1.0);
        }
    }

    #[test]
    fn test_integrate_adds_velocity() {
        let (_, mut ball, _) = setup();
        ball.x = 100.0;
        ball.y = 200.0;
        ball.vx = 3.0;
        ball.vy = -4.0;
        ball.integrate();
        assert_eq!((ball.x, ball.y), (103.0, 196.0));
    }

    #[test]
    fn test_top_paddle_reflects_upward_ball() {
        let (config, mut ball, paddles) = setup();
        let top = &paddles[0];
        // Centered on the paddle, overlapping its lower edge
        ball.x = top.center_along_axis() - ball.size / 2.0;
        ball.y = top.y + top.height - 5.0;
        ball.vx = 0.0;
        ball.vy = -config.ball_speed;

        assert_eq!(resolve(&mut ball, &paddles), 1);
        assert!(ball.vy > 0.0);
        // Dead-center hit: pure reflection, no spin
        assert!(ball.vx.abs() < EPSILON);
        assert!((ball.vy - config.ball_speed).abs() < EPSILON);
    }

    #[test]
    fn test_ball_moving_away_is_not_reflected() {
        let (config, mut ball, paddles) = setup();
        let top = &paddles[0];
        ball.x = top.center_along_axis();
        ball.y = top.y + 2.0;
        ball.vx = 1.0;
        ball.vy = 3.0;

        assert_eq!(resolve(&mut ball, &paddles), 0);
        assert_eq!((ball.vx, ball.vy), (1.0, 3.0));

        let right = &paddles[3];
        ball.x = right.x;
        ball.y = right.center_along_axis();
        ball.vx = -config.ball_speed;
        ball.vy = 0.0;
        assert_eq!(resolve(&mut ball, &paddles), 0);
        assert_eq!(ball.vx, -config.ball_speed);
    }

    #[test]
    fn test_each_side_reflects_perpendicular_component() {
        let (config, _, paddles) = setup();
        let mut rng = StdRng::seed_from_u64(3);
        let s = config.ball_speed;

        let cases = [
            (Side::Top, (0.0, -s)),
            (Side::Bottom, (0.0, s)),
            (Side::Left, (-s, 0.0)),
            (Side::Right, (s, 0.0)),
        ];
        for (i, (side, (vx, vy))) in cases.into_iter().enumerate() {
            let paddle = &paddles[i];
            let mut ball = Ball::new(&config, &mut rng);
            let b = paddle.bounding_box();
            ball.x = b.x + b.width / 2.0 - ball.size / 2.0;
            ball.y = b.y + b.height / 2.0 - ball.size / 2.0;
            ball.vx = vx;
            ball.vy = vy;

            assert_eq!(resolve(&mut ball, &paddles), 1, "{:?}", side);
            match side {
                Side::Top => assert!(ball.vy > 0.0),
                Side::Bottom => assert!(ball.vy < 0.0),
                Side::Left => assert!(ball.vx > 0.0),
                Side::Right => assert!(ball.vx < 0.0),
            }
            assert!((ball.velocity_magnitude() - s).abs() < EPSILON);
        }
    }

    #[test]
    fn test_edge_strike_adds_maximum_spin() {
        let (config, mut ball, paddles) = setup();
        let bottom = &paddles[1];
        // Ball center past the paddle's right tip, still overlapping it
        ball.x = bottom.x + bottom.width - 2.0;
        ball.y = bottom.y - 5.0;
        assert_eq!(ball.strike_offset(bottom), 1.0);

        ball.x = bottom.x - ball.size + 2.0;
        assert_eq!(ball.strike_offset(bottom), -1.0);

        ball.x = bottom.center_along_axis() - ball.size / 2.0;
        assert_eq!(ball.strike_offset(bottom), 0.0);

        // Straight down onto the right tip: vx picks up the full spin before
        // the vector is scaled back to the configured speed.
        ball.x = bottom.x + bottom.width - 2.0;
        ball.vx = 0.0;
        ball.vy = config.ball_speed;
        resolve(&mut ball, &paddles);
        let expected = SPIN_FACTOR / SPIN_FACTOR.hypot(config.ball_speed) * config.ball_speed;
        assert!((ball.vx - expected).abs() < EPSILON);
        assert!(ball.vy < 0.0);
    }

    #[test]
    fn test_vertical_paddle_spin_follows_y() {
        let (config, mut ball, paddles) = setup();
        let left = &paddles[2];
        ball.x = left.x + 5.0;
        ball.y = left.y - ball.size / 2.0; // ball center on the upper tip
        ball.vx = -config.ball_speed;
        ball.vy = 0.0;

        assert_eq!(ball.strike_offset(left), -1.0);
        resolve(&mut ball, &paddles);
        assert!(ball.vx > 0.0);
        assert!(ball.vy < 0.0);
        assert!((ball.velocity_magnitude() - config.ball_speed).abs() < EPSILON);
    }

    #[test]
    fn test_corner_contact_bounces_off_both_paddles() {
        let (config, mut ball, mut paddles) = setup();
        // Top paddle pushed fully left, left paddle fully up: their boxes
        // overlap in the top-left corner.
        paddles[0].x = 0.0;
        paddles[2].y = 0.0;
        ball.x = 12.0;
        ball.y = 12.0;
        ball.vx = -3.0;
        ball.vy = -4.0;
        assert!(ball.bounding_box().intersects(&paddles[0].bounding_box()));
        assert!(ball.bounding_box().intersects(&paddles[2].bounding_box()));

        assert_eq!(resolve(&mut ball, &paddles), 2);
        assert!(ball.vx > 0.0);
        assert!(ball.vy > 0.0);
        assert!((ball.velocity_magnitude() - config.ball_speed).abs() < EPSILON);
    }

    #[test]
    fn test_speed_stays_constant_over_many_bounces() {
        let (config, mut ball, paddles) = setup();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let paddle = &paddles[rng.gen_range(0..4)];
            let b = paddle.bounding_box();
            ball.x = rng.gen_range(b.x - ball.size + 1.0..b.right() - 1.0);
            ball.y = rng.gen_range(b.y - ball.size + 1.0..b.bottom() - 1.0);
            ball.vx = rng.gen_range(-6.0..6.0);
            ball.vy = rng.gen_range(-6.0..6.0);
            if resolve(&mut ball, &paddles) > 0 {
                assert!((ball.velocity_magnitude() - config.ball_speed).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let (_, mut ball, _) = setup();
        let mut at = |x: f32, y: f32| {
            ball.x = x;
            ball.y = y;
            ball.is_out_of_bounds()
        };
        assert!(!at(400.0, 400.0));
        assert!(!at(0.0, 800.0));
        assert!(at(-1.0, 400.0));
        assert!(at(801.0, 400.0));
        assert!(at(400.0, -1.0));
        assert!(at(400.0, 801.0));
    }

    #[test]
    fn test_exit_side() {
        let (_, mut ball, _) = setup();
        for (x, y, player) in [
            (400.0, -1.0, Player::One),
            (-1.0, 700.0, Player::One),
            (801.0, 100.0, Player::One),
            (500.0, 801.0, Player::Two),
            (801.0, 600.0, Player::Two),
        ] {
            ball.x = x;
            ball.y = y;
            assert_eq!(ball.exit_side(), player, "exit at ({}, {})", x, y);
        }
    }
}
