use crate::error::{OperationError, Result};

use super::{Placement, Track};

/// Motion state of one entity traveling around a track.
///
/// The distance is a closed-loop odometer: it grows by `speed * dt` each
/// step and drops back by one lap once it passes the track length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingEntity {
    distance: f64,
    speed: f64,
}

impl MovingEntity {
    /// Creates an entity at `distance` moving at `speed` (length units per second).
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if either value is not finite.
    pub fn new(distance: f64, speed: f64) -> Result<Self> {
        if !distance.is_finite() || !speed.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "entity state must be finite, got distance {distance}, speed {speed}"
            ))
            .into());
        }
        Ok(Self { distance, speed })
    }

    /// Distance traveled from the start of the loop, within one lap.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Speed along the track in length units per second.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Advances the odometer by `speed * dt`, wrapping at `total_length`.
    ///
    /// A distance equal to `total_length` is kept; anything beyond it, or
    /// below zero for negative speeds, is brought back into one lap.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if `dt` is not finite or
    /// `total_length` is not positive.
    pub fn advance(&mut self, dt: f64, total_length: f64) -> Result<()> {
        if !dt.is_finite() || !(total_length > 0.0 && total_length.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "cannot advance by dt {dt} on a loop of length {total_length}"
            ))
            .into());
        }
        self.distance += self.speed * dt;
        if self.distance > total_length || self.distance < 0.0 {
            self.distance = self.distance.rem_euclid(total_length);
        }
        Ok(())
    }

    /// Where this entity currently sits on `track`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Track::placement_at`].
    pub fn placement(&self, track: &Track) -> Result<Placement> {
        track.placement_at(self.distance)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn advance_accumulates() {
        let mut entity = MovingEntity::new(1.0, 2.5).unwrap();
        entity.advance(0.4, 100.0).unwrap();
        assert_relative_eq!(entity.distance(), 2.0);
        entity.advance(0.0, 100.0).unwrap();
        assert_relative_eq!(entity.distance(), 2.0);
    }

    #[test]
    fn advance_wraps_past_lap() {
        let mut entity = MovingEntity::new(9.0, 2.0).unwrap();
        entity.advance(1.0, 10.0).unwrap();
        assert_relative_eq!(entity.distance(), 1.0);

        // exactly one lap is not wrapped
        let mut entity = MovingEntity::new(8.0, 2.0).unwrap();
        entity.advance(1.0, 10.0).unwrap();
        assert_relative_eq!(entity.distance(), 10.0);

        // a step longer than a lap still lands inside
        let mut entity = MovingEntity::new(0.0, 25.0).unwrap();
        entity.advance(1.0, 10.0).unwrap();
        assert_relative_eq!(entity.distance(), 5.0);
    }

    #[test]
    fn reverse_speed_wraps_below_zero() {
        let mut entity = MovingEntity::new(1.0, -3.0).unwrap();
        entity.advance(1.0, 10.0).unwrap();
        assert_relative_eq!(entity.distance(), 8.0);
    }

    #[test]
    fn invalid_inputs_rejected() {
        assert!(MovingEntity::new(f64::NAN, 1.0).is_err());
        assert!(MovingEntity::new(0.0, f64::INFINITY).is_err());
        let mut entity = MovingEntity::new(0.0, 1.0).unwrap();
        assert!(entity.advance(f64::NAN, 10.0).is_err());
        assert!(entity.advance(0.1, 0.0).is_err());
        assert_relative_eq!(entity.distance(), 0.0);
    }
}
