use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const STAR_COUNT: usize = 500;
/// Depth units a star travels toward the viewer per frame.
pub const Z_STEP: f64 = 2.0;
/// Lateral drift is drawn from `[-MAX_DRIFT, MAX_DRIFT)`.
pub const MAX_DRIFT: f64 = 0.25;
/// Translucent fill painted before each frame; leaves short trails.
pub const BACKGROUND: &str = "rgba(5,5,20,0.6)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub dx: f64,
    pub dy: f64,
}

/// A star after perspective projection, ready to draw as a filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedStar {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub alpha: f64,
}

impl ProjectedStar {
    pub fn fill_style(&self) -> String {
        format!("rgba(255,255,255,{})", self.alpha)
    }
}

pub struct Starfield<R = StdRng> {
    stars: Vec<Star>,
    width: f64,
    height: f64,
    rng: R,
}

impl Starfield<StdRng> {
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Starfield<R> {
    pub fn with_rng(width: f64, height: f64, mut rng: R) -> Self {
        let (width, height) = (width.max(0.0), height.max(0.0));
        let stars = (0..STAR_COUNT)
            .map(|_| {
                let z = rng.r#gen::<f64>() * width;
                let mut star = spawn(&mut rng, width, height);
                star.z = z;
                star
            })
            .collect();
        Self {
            stars,
            width,
            height,
            rng,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Existing stars keep their coordinates; those now outside respawn on
    /// the next step.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Advance one frame and return what to draw. An empty surface draws
    /// nothing.
    pub fn step(&mut self) -> Vec<ProjectedStar> {
        let (w, h) = (self.width, self.height);
        if w <= 0.0 || h <= 0.0 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(self.stars.len());
        for i in 0..self.stars.len() {
            let star = &mut self.stars[i];
            star.z -= Z_STEP;
            star.x += star.dx;
            star.y += star.dy;
            let escaped = star.z <= 0.0 || star.x < 0.0 || star.x > w || star.y < 0.0 || star.y > h;
            if escaped {
                self.stars[i] = spawn(&mut self.rng, w, h);
            }
            out.push(project(&self.stars[i], w, h));
        }
        out
    }
}

/// Fresh star at the far plane (`z == width`).
fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64) -> Star {
    Star {
        x: rng.r#gen::<f64>() * width,
        y: rng.r#gen::<f64>() * height,
        z: width,
        dx: drift(rng),
        dy: drift(rng),
    }
}

fn drift<R: Rng>(rng: &mut R) -> f64 {
    (rng.r#gen::<f64>() - 0.5) * 2.0 * MAX_DRIFT
}

pub fn project(star: &Star, width: f64, height: f64) -> ProjectedStar {
    let depth = star.z / width;
    ProjectedStar {
        x: (star.x - width / 2.0) / star.z * width + width / 2.0,
        y: (star.y - height / 2.0) / star.z * height + height / 2.0,
        // Stars left deeper than a narrowed surface would go negative.
        radius: ((1.0 - depth) * 3.0).max(0.0),
        alpha: (1.0 - depth).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn seeds_full_field_within_bounds() {
        let field = Starfield::new(800.0, 600.0, 7);
        assert_eq!(field.stars().len(), STAR_COUNT);
        for s in field.stars() {
            assert!((0.0..800.0).contains(&s.x));
            assert!((0.0..600.0).contains(&s.y));
            assert!((0.0..800.0).contains(&s.z));
            assert!((-MAX_DRIFT..MAX_DRIFT).contains(&s.dx));
            assert!((-MAX_DRIFT..MAX_DRIFT).contains(&s.dy));
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let mut a = Starfield::new(320.0, 200.0, 42);
        let mut b = Starfield::new(320.0, 200.0, 42);
        for _ in 0..50 {
            assert_eq!(a.step(), b.step());
        }
    }

    #[test]
    fn stars_approach_and_respawn_at_far_plane() {
        let mut field = Starfield::new(400.0, 400.0, 1);
        for _ in 0..400 {
            field.step();
            for s in field.stars() {
                assert!(s.z > 0.0 && s.z <= 400.0);
                assert!(s.x >= 0.0 && s.x <= 400.0);
                assert!(s.y >= 0.0 && s.y <= 400.0);
            }
        }
    }

    #[test]
    fn projection_matches_perspective_formula() {
        let star = Star {
            x: 300.0,
            y: 100.0,
            z: 200.0,
            dx: 0.0,
            dy: 0.0,
        };
        let p = project(&star, 400.0, 300.0);
        assert_relative_eq!(p.x, (300.0 - 200.0) / 200.0 * 400.0 + 200.0);
        assert_relative_eq!(p.y, (100.0 - 150.0) / 200.0 * 300.0 + 150.0);
        assert_relative_eq!(p.radius, 1.5);
        assert_relative_eq!(p.alpha, 0.5);
        assert_eq!(p.fill_style(), "rgba(255,255,255,0.5)");
    }

    #[test]
    fn empty_surface_draws_nothing() {
        let mut field = Starfield::new(0.0, 0.0, 3);
        assert!(field.step().is_empty());
        field.resize(100.0, 100.0);
        assert_eq!(field.step().len(), STAR_COUNT);
    }
}
