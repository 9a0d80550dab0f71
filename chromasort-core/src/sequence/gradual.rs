//! Degree-by-degree servo motion

/// Angles visited when walking a servo from one angle to another
///
/// Yields every whole degree from `from` to `to`, both inclusive, so a
/// move to the current angle still writes that angle once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradualMove {
    next: Option<u8>,
    to: u8,
}

impl GradualMove {
    /// Create a walk from `from` to `to`
    pub const fn new(from: u8, to: u8) -> Self {
        Self {
            next: Some(from),
            to,
        }
    }

    /// Final angle of the walk
    pub const fn target(&self) -> u8 {
        self.to
    }
}

impl Iterator for GradualMove {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let current = self.next?;
        self.next = if current < self.to {
            Some(current + 1)
        } else if current > self.to {
            Some(current - 1)
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match self.next {
            Some(current) => current.abs_diff(self.to) as usize + 1,
            None => 0,
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for GradualMove {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_upward() {
        let angles: Vec<u8> = GradualMove::new(0, 3).collect();
        assert_eq!(angles, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_downward() {
        let angles: Vec<u8> = GradualMove::new(70, 67).collect();
        assert_eq!(angles, vec![70, 69, 68, 67]);
    }

    #[test]
    fn test_same_angle_writes_once() {
        let angles: Vec<u8> = GradualMove::new(90, 90).collect();
        assert_eq!(angles, vec![90]);
    }

    #[test]
    fn test_full_range_no_overflow() {
        assert_eq!(GradualMove::new(0, 255).count(), 256);
        assert_eq!(GradualMove::new(255, 0).last(), Some(0));
    }

    proptest! {
        #[test]
        fn prop_walk_is_contiguous(from in 0u8..=180, to in 0u8..=180) {
            let walk = GradualMove::new(from, to);
            prop_assert_eq!(walk.len(), from.abs_diff(to) as usize + 1);

            let angles: Vec<u8> = walk.collect();
            prop_assert_eq!(angles.first().copied(), Some(from));
            prop_assert_eq!(angles.last().copied(), Some(to));
            for pair in angles.windows(2) {
                prop_assert_eq!(pair[0].abs_diff(pair[1]), 1);
            }
        }
    }
}
