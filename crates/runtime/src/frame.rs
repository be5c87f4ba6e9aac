use foundation::time::Time;

/// Longest step a single frame may take. Hidden tabs stop delivering
/// animation frames; the first frame after they return would otherwise
/// carry the whole gap.
pub const MAX_FRAME_DT_S: f64 = 0.25;

/// Frame metadata handed to per-frame consumers (starfield, orbit clock).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time since the previous frame (seconds).
    pub dt_s: f64,
    /// Time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    /// Variable-step successor.
    pub fn advance(self, dt_s: f64) -> Self {
        Self {
            index: self.index + 1,
            dt_s,
            time: self.time.after(dt_s),
        }
    }
}

/// Turns host timestamps (e.g. `requestAnimationFrame` milliseconds) into
/// frames with a clamped delta.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frame: Option<Frame>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now_ms: f64) -> Frame {
        let dt_s = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DT_S),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        let frame = match self.frame {
            Some(prev) => prev.advance(dt_s),
            None => Frame::new(0, dt_s),
        };
        self.frame = Some(frame);
        frame
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
        self.frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, FrameClock, MAX_FRAME_DT_S};
    use foundation::time::Time;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, 1.0 / 60.0);
        let b = Frame::new(10, 1.0 / 60.0);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(10.0 / 60.0));
    }

    #[test]
    fn advance_moves_index_and_time() {
        let f1 = Frame::new(0, 0.5).advance(0.25);
        assert_eq!(f1.index, 1);
        assert_eq!(f1.dt_s, 0.25);
        assert_eq!(f1.time, Time(0.25));
    }

    #[test]
    fn clock_first_tick_has_zero_dt() {
        let mut clock = FrameClock::new();
        let f = clock.tick(1000.0);
        assert_eq!(f.index, 0);
        assert_eq!(f.dt_s, 0.0);
    }

    #[test]
    fn clock_clamps_long_gaps() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        let f = clock.tick(100.0);
        assert_eq!(f.dt_s, 0.1);
        let f = clock.tick(60_000.0);
        assert_eq!(f.index, 2);
        assert_eq!(f.dt_s, MAX_FRAME_DT_S);
    }

    #[test]
    fn clock_ignores_time_going_backwards() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert_eq!(clock.tick(400.0).dt_s, 0.0);
    }
}
