//! Minimum enclosing circle of a pixel blob.
//!
//! Callers pass the convex hull of a blob, which has the same enclosing circle
//! as the full pixel set. Solved with the incremental Welzl construction.

const EPSILON: f64 = 1e-7;

/// Circle in continuous pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: (f64, f64),
    pub radius: f64,
}

impl Circle {
    fn contains(&self, point: (f64, f64)) -> bool {
        let dx = point.0 - self.center.0;
        let dy = point.1 - self.center.1;
        (dx * dx + dy * dy).sqrt() <= self.radius + EPSILON * self.radius.max(1.0)
    }

    fn from_two(a: (f64, f64), b: (f64, f64)) -> Self {
        let center = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
        let radius = ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt() / 2.0;
        Self { center, radius }
    }

    fn from_three(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
        if d.abs() < EPSILON {
            // Collinear: the widest pair spans the other point
            return [Self::from_two(a, b), Self::from_two(a, c), Self::from_two(b, c)]
                .into_iter()
                .fold(Self::from_two(a, b), |widest, circle| {
                    if circle.radius > widest.radius {
                        circle
                    } else {
                        widest
                    }
                });
        }

        let a_sq = a.0 * a.0 + a.1 * a.1;
        let b_sq = b.0 * b.0 + b.1 * b.1;
        let c_sq = c.0 * c.0 + c.1 * c.1;
        let ux = (a_sq * (b.1 - c.1) + b_sq * (c.1 - a.1) + c_sq * (a.1 - b.1)) / d;
        let uy = (a_sq * (c.0 - b.0) + b_sq * (a.0 - c.0) + c_sq * (b.0 - a.0)) / d;
        let radius = ((a.0 - ux).powi(2) + (a.1 - uy).powi(2)).sqrt();

        Self {
            center: (ux, uy),
            radius,
        }
    }
}

/// Smallest circle containing every point, `None` for an empty set
pub fn min_enclosing_circle(points: &[(f64, f64)]) -> Option<Circle> {
    let first = *points.first()?;
    let mut circle = Circle {
        center: first,
        radius: 0.0,
    };

    for i in 1..points.len() {
        if circle.contains(points[i]) {
            continue;
        }
        circle = Circle {
            center: points[i],
            radius: 0.0,
        };
        for j in 0..i {
            if circle.contains(points[j]) {
                continue;
            }
            circle = Circle::from_two(points[i], points[j]);
            for k in 0..j {
                if !circle.contains(points[k]) {
                    circle = Circle::from_three(points[i], points[j], points[k]);
                }
            }
        }
    }

    Some(circle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single_point() {
        assert_eq!(min_enclosing_circle(&[]), None);

        let circle = min_enclosing_circle(&[(4.0, 7.0)]).unwrap();
        assert_eq!(circle.center, (4.0, 7.0));
        assert_eq!(circle.radius, 0.0);
    }

    #[test]
    fn test_collinear_points() {
        let circle = min_enclosing_circle(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]).unwrap();
        assert!((circle.center.0 - 5.0).abs() < 1e-9);
        assert!((circle.center.1 - 0.0).abs() < 1e-9);
        assert!((circle.radius - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_square_corners() {
        let corners = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let circle = min_enclosing_circle(&corners).unwrap();
        assert!((circle.center.0 - 5.0).abs() < 1e-9);
        assert!((circle.center.1 - 5.0).abs() < 1e-9);
        assert!((circle.radius - 50f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_circle_encloses_all_points() {
        let points: Vec<(f64, f64)> = (0..40)
            .map(|i| ((i * 7 % 23) as f64, (i * 13 % 17) as f64))
            .collect();
        let circle = min_enclosing_circle(&points).unwrap();
        for &(x, y) in &points {
            let d = ((x - circle.center.0).powi(2) + (y - circle.center.1).powi(2)).sqrt();
            assert!(d <= circle.radius + 1e-6);
        }
    }
}
