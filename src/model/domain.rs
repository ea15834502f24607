use serde::{Deserialize, Serialize};

/// Sides of the domain whose out-of-range beads are pinned as boundary beads.
///
/// `all` pins beads leaving the domain in any direction; the per-side flags
/// pin only beads beyond that particular edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundaryFixing {
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub north: bool,
    #[serde(default)]
    pub south: bool,
    #[serde(default)]
    pub east: bool,
    #[serde(default)]
    pub west: bool,
}

impl BoundaryFixing {
    pub fn all() -> Self {
        Self {
            all: true,
            ..Self::default()
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        self.all || self.north || self.south || self.east || self.west
    }
}

/// Rectangular simulation region `[0, size_x] × [0, size_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub size_x: f64,
    pub size_y: f64,
    #[serde(default)]
    pub fix_boundary: BoundaryFixing,
}

impl Domain {
    pub fn new(size_x: f64, size_y: f64) -> Self {
        Self {
            size_x,
            size_y,
            fix_boundary: BoundaryFixing::none(),
        }
    }

    pub fn with_fixed_boundary(mut self, fix: bool) -> Self {
        self.fix_boundary.all = fix;
        self
    }

    pub fn with_boundary_fixing(mut self, fixing: BoundaryFixing) -> Self {
        self.fix_boundary = fixing;
        self
    }

    #[inline]
    pub fn center(&self) -> [f64; 2] {
        [self.size_x / 2.0, self.size_y / 2.0]
    }

    /// Half extents `(Lx, Ly)` measured from [`center`](Self::center).
    #[inline]
    pub fn half_extents(&self) -> (f64, f64) {
        (self.size_x / 2.0, self.size_y / 2.0)
    }

    /// Returns `true` if a bead at `(x, y)` must be tagged as boundary.
    pub fn is_fixed_position(&self, x: f64, y: f64) -> bool {
        let [cx, cy] = self.center();
        let (lx, ly) = self.half_extents();
        let dx = x - cx;
        let dy = y - cy;
        let fix = &self.fix_boundary;

        (fix.all && (dx.abs() > lx || dy.abs() > ly))
            || (fix.east && dx > lx)
            || (fix.west && dx < -lx)
            || (fix.north && dy > ly)
            || (fix.south && dy < -ly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_and_half_extents_use_both_axes() {
        let domain = Domain::new(200.0, 100.0);
        assert_eq!(domain.center(), [100.0, 50.0]);
        assert_eq!(domain.half_extents(), (100.0, 50.0));
    }

    #[test]
    fn unfixed_domain_pins_nothing() {
        let domain = Domain::new(200.0, 200.0);
        assert!(!domain.is_fixed_position(-50.0, 500.0));
    }

    #[test]
    fn fixed_domain_pins_beads_outside_extents() {
        let domain = Domain::new(200.0, 200.0).with_fixed_boundary(true);
        assert!(domain.is_fixed_position(-0.5, 100.0));
        assert!(domain.is_fixed_position(100.0, 200.5));
        assert!(!domain.is_fixed_position(0.0, 200.0));
        assert!(!domain.is_fixed_position(150.0, 30.0));
    }

    #[test]
    fn single_side_fixing_only_pins_that_side() {
        let domain = Domain::new(10.0, 10.0).with_boundary_fixing(BoundaryFixing {
            east: true,
            ..BoundaryFixing::default()
        });
        assert!(domain.is_fixed_position(11.0, 5.0));
        assert!(!domain.is_fixed_position(-1.0, 5.0));
        assert!(!domain.is_fixed_position(5.0, 11.0));
    }

    #[test]
    fn boundary_fixing_is_any() {
        assert!(!BoundaryFixing::none().is_any());
        assert!(BoundaryFixing::all().is_any());
        assert!(
            BoundaryFixing {
                south: true,
                ..BoundaryFixing::default()
            }
            .is_any()
        );
    }
}
