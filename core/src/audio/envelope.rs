/// Smallest gain an exponential ramp may start from or aim at.
///
/// An exponential curve toward exactly zero never arrives, so every stop is
/// clamped to this floor.
pub const ENVELOPE_FLOOR: f32 = 1.0e-4;

/// Piecewise exponential gain curve.
///
/// Starts at `initial` at t = 0, ramps exponentially between consecutive
/// stops, and holds the last stop's value afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GainEnvelope {
    initial: f32,
    /// (time in seconds, gain), strictly increasing in time
    stops: Vec<(f32, f32)>,
}

impl GainEnvelope {
    pub fn starting_at(initial: f32) -> Self {
        Self {
            initial: initial.max(ENVELOPE_FLOOR),
            stops: Vec::new(),
        }
    }

    /// Append an exponential ramp reaching `value` at `at_secs`.
    ///
    /// A stop at or before the previous one is ignored.
    pub fn exp_ramp_to(mut self, value: f32, at_secs: f32) -> Self {
        let last_time = self.stops.last().map_or(0.0, |&(t, _)| t);
        if at_secs > last_time {
            self.stops.push((at_secs, value.max(ENVELOPE_FLOOR)));
        }
        self
    }

    pub fn initial(&self) -> f32 {
        self.initial
    }

    pub fn stops(&self) -> &[(f32, f32)] {
        &self.stops
    }

    /// Gain at `t` seconds after the voice starts
    pub fn value_at(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return self.initial;
        }

        let mut from = (0.0, self.initial);
        for &(to_t, to_v) in &self.stops {
            if t < to_t {
                let span = to_t - from.0;
                let progress = (t - from.0) / span;
                return from.1 * (to_v / from.1).powf(progress);
            }
            from = (to_t, to_v);
        }
        from.1
    }

    /// Largest gain the curve reaches
    pub fn peak(&self) -> f32 {
        self.stops
            .iter()
            .map(|&(_, v)| v)
            .fold(self.initial, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1.0e-4 * b.abs().max(1.0)
    }

    fn noise_envelope() -> GainEnvelope {
        GainEnvelope::starting_at(ENVELOPE_FLOOR)
            .exp_ramp_to(0.5, 0.01)
            .exp_ramp_to(ENVELOPE_FLOOR, 0.6)
    }

    #[test]
    fn test_hits_every_stop() {
        let env = noise_envelope();
        assert!(close(env.value_at(0.0), 1.0e-4));
        assert!(close(env.value_at(0.01), 0.5));
        assert!(close(env.value_at(0.6), 1.0e-4));
        assert!(close(env.value_at(5.0), 1.0e-4));
    }

    #[test]
    fn test_exponential_midpoint_is_geometric_mean() {
        let env = GainEnvelope::starting_at(0.01).exp_ramp_to(1.0, 1.0);
        assert!(close(env.value_at(0.5), 0.1));
    }

    #[test]
    fn test_zero_target_is_floored() {
        let env = GainEnvelope::starting_at(0.0)
            .exp_ramp_to(0.7, 0.02)
            .exp_ramp_to(0.0, 0.9);
        assert_eq!(env.initial(), ENVELOPE_FLOOR);
        assert_eq!(env.stops()[1].1, ENVELOPE_FLOOR);
        for i in 0..=1000 {
            let v = env.value_at(i as f32 / 1000.0);
            assert!(v.is_finite() && v >= ENVELOPE_FLOOR * 0.999, "t={i}ms v={v}");
        }
    }

    #[test]
    fn test_attack_rises_decay_falls() {
        let env = noise_envelope();
        assert!(env.value_at(0.002) < env.value_at(0.008));
        assert!(env.value_at(0.1) > env.value_at(0.3));
        assert!(env.value_at(0.3) > env.value_at(0.59));
    }

    #[test]
    fn test_out_of_order_stop_ignored() {
        let env = GainEnvelope::starting_at(0.1)
            .exp_ramp_to(0.5, 0.2)
            .exp_ramp_to(0.9, 0.1);
        assert_eq!(env.stops(), &[(0.2, 0.5)]);
    }

    #[test]
    fn test_peak() {
        assert_eq!(noise_envelope().peak(), 0.5);
    }
}
