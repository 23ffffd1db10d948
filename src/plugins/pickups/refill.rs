/// Count-up timer behind a refill box.
///
/// Counts from zero to `duration`. Once it gets there it latches `ready` and
/// stops counting until claimed.
#[derive(Debug, Clone, PartialEq)]
pub struct RefillTimer {
    elapsed: f32,
    duration: f32,
    ready: bool,
}

impl RefillTimer {
    pub fn new(duration: f32) -> Self {
        Self { elapsed: 0.0, duration: duration.max(0.0), ready: false }
    }

    /// The readiness check runs before the increment, so the box turns ready
    /// on the first tick after `elapsed` reaches `duration`.
    pub fn tick(&mut self, dt: f32) {
        if self.elapsed >= self.duration {
            self.ready = true;
        } else {
            self.elapsed += dt.max(0.0);
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Player touched the box. Returns `true` if it granted a refill.
    pub fn try_claim(&mut self) -> bool {
        if !self.ready {
            return false;
        }
        self.ready = false;
        self.elapsed = 0.0;
        true
    }

    /// Whole seconds left for the label, `None` once nothing is left to show.
    pub fn countdown(&self) -> Option<u32> {
        if self.ready {
            return None;
        }
        let left = self.duration.trunc() - self.elapsed.round();
        (left > 0.0).then_some(left as u32)
    }
}
