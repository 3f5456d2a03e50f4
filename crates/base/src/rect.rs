use crate::Vec2;

/// Axis-aligned rectangle stored as origin (top-left) plus size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T: Default> Default for Rect<T> {
    fn default() -> Self {
        Self {
            origin: Vec2::zero(),
            size: Vec2::zero(),
        }
    }
}

impl<T> Rect<T> {
    pub fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: std::ops::Sub<Output = T> + Copy> Rect<T> {
    pub fn from_min_max(min: Vec2<T>, max: Vec2<T>) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }
}

impl<T: std::ops::Add<Output = T> + Copy> Rect<T> {
    pub fn min(&self) -> Vec2<T> {
        self.origin
    }

    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl<T: std::ops::Mul<Output = T> + Copy> Rect<T> {
    pub fn area(&self) -> T {
        self.size.x * self.size.y
    }
}

impl Rect<f64> {
    pub fn center(&self) -> Vec2<f64> {
        self.origin + self.size / 2.0
    }

    pub fn intersects(&self, other: Rect<f64>) -> bool {
        let self_max = self.max();
        let other_max = other.max();
        self.origin.x < other_max.x
            && other.origin.x < self_max.x
            && self.origin.y < other_max.y
            && other.origin.y < self_max.y
    }

    pub fn intersection(&self, other: Rect<f64>) -> Option<Rect<f64>> {
        if !self.intersects(other) {
            return None;
        }
        let min = Vec2::new(
            self.origin.x.max(other.origin.x),
            self.origin.y.max(other.origin.y),
        );
        let max = Vec2::new(
            self.max().x.min(other.max().x),
            self.max().y.min(other.max().y),
        );
        Some(Rect::from_min_max(min, max))
    }

    /// Intersection over union of two rectangles.
    ///
    /// Returns 0.0 for disjoint or zero-area rectangles.
    pub fn iou(&self, other: Rect<f64>) -> f64 {
        if self.size.x <= 0.0 || self.size.y <= 0.0 || other.size.x <= 0.0 || other.size.y <= 0.0 {
            return 0.0;
        }
        let intersection_area = self.intersection(other).map_or(0.0, |rect| rect.area());
        let union_area = self.area() + other.area() - intersection_area;
        if union_area <= 0.0 {
            return 0.0;
        }
        intersection_area / union_area
    }
}
