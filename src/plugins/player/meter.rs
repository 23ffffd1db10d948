//! Dash power meter.

/// Upper bound for dash power and health.
pub const METER_MAX: f32 = 100.0;

/// Bounded dash resource with a start threshold.
///
/// The threshold only gates *starting* a dash. A dash already in progress keeps
/// draining down to zero, and cannot restart until power climbs back above it.
#[derive(Debug, Clone, PartialEq)]
pub struct DashMeter {
    value: f32,
    start_threshold: f32,
    recharge_rate: f32,
    drain_rate: f32,
}

impl DashMeter {
    /// A full meter.
    pub fn new(start_threshold: f32, recharge_rate: f32, drain_rate: f32) -> Self {
        Self {
            value: METER_MAX,
            start_threshold: start_threshold.clamp(0.0, METER_MAX),
            recharge_rate: recharge_rate.max(0.0),
            drain_rate: drain_rate.max(0.0),
        }
    }

    /// Drain while consuming, recharge otherwise.
    pub fn tick(&mut self, dt: f32, consuming: bool) {
        let dt = dt.max(0.0);
        let delta = if consuming {
            -self.drain_rate * dt
        } else {
            self.recharge_rate * dt
        };
        self.set(self.value + delta);
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        self.value / METER_MAX
    }

    #[inline]
    pub fn start_threshold(&self) -> f32 {
        self.start_threshold
    }

    #[inline]
    pub fn can_start(&self) -> bool {
        self.value >= self.start_threshold
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value <= 0.0
    }

    pub fn spend(&mut self, amount: f32) {
        self.set(self.value - amount.max(0.0));
    }

    pub fn refill(&mut self) {
        self.value = METER_MAX;
    }

    #[inline]
    fn set(&mut self, v: f32) {
        // NaN collapses to empty instead of poisoning the meter.
        self.value = if v.is_nan() { 0.0 } else { v.clamp(0.0, METER_MAX) };
    }
}
