/// Bookkeeping for a self-rescheduling animation loop: whether it still runs
/// and which requested frame, if any, has not fired yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLoop {
    running: bool,
    pending: Option<i32>,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            running: true,
            pending: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    /// Record a requested frame. Ignored once stopped.
    pub fn scheduled(&mut self, id: i32) {
        if self.running {
            self.pending = Some(id);
        }
    }

    /// A requested frame fired. Returns whether it should draw and requeue.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.running
    }

    /// Requesting the next frame failed; the loop cannot continue.
    pub fn fail(&mut self) {
        self.running = false;
        self.pending = None;
    }

    /// Stop the loop, handing back the frame that still needs cancelling.
    pub fn stop(&mut self) -> Option<i32> {
        self.running = false;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::FrameLoop;

    #[test]
    fn stop_hands_back_the_pending_frame_once() {
        let mut frames = FrameLoop::new();
        assert!(frames.is_running());
        frames.scheduled(7);
        assert_eq!(frames.stop(), Some(7));
        assert!(!frames.is_running());
        assert_eq!(frames.stop(), None);
    }

    #[test]
    fn fired_frame_is_no_longer_pending() {
        let mut frames = FrameLoop::new();
        frames.scheduled(1);
        assert!(frames.begin_frame());
        assert_eq!(frames.pending(), None);
        frames.scheduled(2);
        assert_eq!(frames.pending(), Some(2));
    }

    #[test]
    fn stopped_loop_neither_draws_nor_requeues() {
        let mut frames = FrameLoop::new();
        frames.scheduled(3);
        frames.stop();
        assert!(!frames.begin_frame());
        frames.scheduled(4);
        assert_eq!(frames.pending(), None);
        assert!(!frames.is_running());
    }

    #[test]
    fn failed_request_stops_the_loop() {
        let mut frames = FrameLoop::new();
        frames.scheduled(5);
        frames.begin_frame();
        frames.fail();
        assert!(!frames.is_running());
        assert_eq!(frames.stop(), None);
    }
}
