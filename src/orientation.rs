//! Conversion of per-axis calibration between the file's world convention
//! and the consumer's.
//!
//! MINC expresses axis orientation as direction cosines in the RAS
//! convention and allows a negative step between samples. The consumer
//! expects non-negative spacing and direction cosines in the LPS
//! convention. Both transforms are sign manipulations, and the contract
//! fixes their order: a negative step flips the whole cosine vector
//! *first*, and the RAS-to-LPS negation of the first two components is
//! applied *after*. The origin is never touched by either transform.

/// Normalize one axis as read from the file: a signed step and its raw
/// direction cosines become a non-negative spacing and cosines in the
/// consumer convention.
pub fn axis_from_file(step: f64, cosines: [f64; 3]) -> (f64, [f64; 3]) {
    let mut converted = cosines;

    // A negative step means the axis runs backwards; absorb the sign
    // into the direction.
    if step < 0.0 {
        for c in &mut converted {
            *c = -*c;
        }
    }

    // RAS world coordinates: flip X and Y to obtain the LPS equivalents.
    converted[0] = -converted[0];
    converted[1] = -converted[1];

    (step.abs(), converted)
}

/// Build the full direction vector of one axis, with one slot per
/// dimension of the volume. Axes below index 3 carry their converted
/// cosines in the first three slots (truncated to the rank for 2D
/// volumes); any higher axis is the identity basis vector for its own
/// index.
pub fn direction_vector(rank: usize, axis: usize, cosines: [f64; 3]) -> Vec<f64> {
    let mut direction = vec![0.0; rank];
    if axis < 3 {
        for (slot, c) in direction.iter_mut().zip(cosines.iter()) {
            *slot = *c;
        }
    } else {
        direction[axis] = 1.0;
    }
    direction
}
