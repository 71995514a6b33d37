//! Cooldown gate deciding whether a shot may be taken.
//!
//! The gate is a two-state machine (`Ready`, `Reloading`) driven by caller
//! supplied timestamps, so it stays deterministic and testable without a
//! clock. The reload window is fixed when a shot is accepted and always lasts
//! exactly that shot's cooldown, whatever the hit outcome.

use core::fmt;

/// Monotonic timestamp in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    pub const fn saturating_add(self, ms: u64) -> Millis {
        Millis(self.0.saturating_add(ms))
    }

    /// Milliseconds from `earlier` to `self` (zero if `earlier` is later).
    pub const fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateState {
    Ready,
    Reloading { remaining_ms: u64 },
}

impl GateState {
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Rejection returned while the gate is reloading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("weapon reloading, {remaining_ms}ms remaining")]
pub struct Reloading {
    pub remaining_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CooldownGate {
    last_shot: Option<Millis>,
    ready_at: Millis,
}

impl CooldownGate {
    pub const fn new() -> Self {
        Self {
            last_shot: None,
            ready_at: Millis::ZERO,
        }
    }

    pub fn state(&self, now: Millis) -> GateState {
        if self.last_shot.is_none() || now >= self.ready_at {
            GateState::Ready
        } else {
            GateState::Reloading {
                remaining_ms: self.ready_at.since(now),
            }
        }
    }

    /// Attempt a shot at `now` with the given cooldown.
    ///
    /// On success the gate enters `Reloading` until `now + cooldown_ms`. A
    /// rejected attempt leaves the gate untouched.
    pub fn try_fire(&mut self, now: Millis, cooldown_ms: u64) -> Result<(), Reloading> {
        if let GateState::Reloading { remaining_ms } = self.state(now) {
            return Err(Reloading { remaining_ms });
        }

        self.last_shot = Some(now);
        self.ready_at = now.saturating_add(cooldown_ms);
        Ok(())
    }

    /// Timestamp of the last accepted shot.
    pub const fn last_shot(&self) -> Option<Millis> {
        self.last_shot
    }

    /// Earliest time the next shot will be accepted.
    pub const fn ready_at(&self) -> Millis {
        self.ready_at
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapon::Weapon;

    #[test]
    fn fresh_gate_is_ready() {
        let gate = CooldownGate::new();
        assert_eq!(gate.state(Millis::ZERO), GateState::Ready);
        assert_eq!(gate.last_shot(), None);
    }

    #[test]
    fn pistol_shot_inside_cooldown_is_dropped() {
        let mut gate = CooldownGate::new();
        let cooldown = Weapon::Pistol.profile().cooldown_ms;

        gate.try_fire(Millis(1_000), cooldown).unwrap();
        let rejected = gate.try_fire(Millis(1_100), cooldown).unwrap_err();

        assert_eq!(rejected.remaining_ms, 100);
        assert_eq!(gate.last_shot(), Some(Millis(1_000)));
    }

    #[test]
    fn gate_reopens_exactly_at_cooldown() {
        let mut gate = CooldownGate::new();
        gate.try_fire(Millis(0), 400).unwrap();

        assert_eq!(
            gate.state(Millis(399)),
            GateState::Reloading { remaining_ms: 1 }
        );
        assert!(gate.state(Millis(400)).is_ready());
        assert!(gate.try_fire(Millis(400), 400).is_ok());
        assert_eq!(gate.ready_at(), Millis(800));
    }

    #[test]
    fn reload_window_is_fixed_by_fired_weapon() {
        let mut gate = CooldownGate::new();
        gate.try_fire(Millis(0), Weapon::Shotgun.profile().cooldown_ms)
            .unwrap();

        // Switching to a faster weapon does not shorten the running reload.
        let pistol = Weapon::Pistol.profile().cooldown_ms;
        assert!(gate.try_fire(Millis(250), pistol).is_err());
        assert!(gate.try_fire(Millis(600), pistol).is_ok());
    }

    #[test]
    fn reset_returns_to_ready() {
        let mut gate = CooldownGate::new();
        gate.try_fire(Millis(10), 600).unwrap();
        gate.reset();
        assert!(gate.state(Millis(11)).is_ready());
    }
}
