//! Global runtime configuration.
//!
//! [`Config`] holds the knobs shared by one [`Supervisor`](crate::Supervisor)
//! instance. The supervision algorithm itself is deliberately knob-free (no
//! timeouts, no restart policies); the only tunable is the event bus.

/// Configuration for the supervisor runtime.
///
/// ## Field semantics
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the
///   supervisor before the bus is built). Slow subscribers that lag behind
///   more than `bus_capacity` events skip the oldest items.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast ring buffer.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration: `bus_capacity = 1024`.
    fn default() -> Self {
        Self { bus_capacity: 1024 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cfg = Config { bus_capacity: 0 };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
