use crate::error::{OperationError, Result};

use super::{MovingEntity, Placement, Track};

/// Spacing of the wagons in a [`Train`].
#[derive(Debug, Clone, Copy)]
pub struct ConsistParams {
    /// Length of one wagon along the track.
    pub wagon_length: f64,
    /// Free distance between neighbouring wagons.
    pub gap: f64,
}

impl Default for ConsistParams {
    fn default() -> Self {
        Self {
            wagon_length: 0.7,
            gap: 0.05,
        }
    }
}

impl ConsistParams {
    /// Distance between the reference points of neighbouring wagons.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.wagon_length + self.gap
    }
}

/// A line of wagons moving together at one speed.
///
/// Wagon 0 starts at distance 0 and each following wagon sits one
/// [`ConsistParams::pitch`] further along the track. Every wagon keeps its
/// own odometer so the train can straddle the lap seam.
#[derive(Debug, Clone)]
pub struct Train {
    wagons: Vec<MovingEntity>,
}

impl Train {
    /// Creates a train of `wagon_count` wagons on `track`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the spacing is negative or
    /// not finite, or if `speed` is not finite.
    pub fn new(track: &Track, wagon_count: usize, params: ConsistParams, speed: f64) -> Result<Self> {
        let pitch = params.pitch();
        if !(pitch >= 0.0 && pitch.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "wagon spacing must be finite and non-negative, got {pitch}"
            ))
            .into());
        }

        let total = track.total_length();
        let wagons = (0..wagon_count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let distance = (i as f64 * pitch).rem_euclid(total);
                MovingEntity::new(distance, speed)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { wagons })
    }

    /// Returns the wagons in creation order.
    #[must_use]
    pub fn wagons(&self) -> &[MovingEntity] {
        &self.wagons
    }

    /// Moves every wagon forward by `speed * dt`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` is not finite.
    pub fn advance(&mut self, dt: f64, track: &Track) -> Result<()> {
        let total = track.total_length();
        self.wagons
            .iter_mut()
            .try_for_each(|wagon| wagon.advance(dt, total))
    }

    /// Current placement of every wagon, front to back in creation order.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Track::placement_at`].
    pub fn placements(&self, track: &Track) -> Result<Vec<Placement>> {
        self.wagons.iter().map(|wagon| wagon.placement(track)).collect()
    }
}
