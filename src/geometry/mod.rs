use num_traits::Float;
use ordered_float::OrderedFloat;


/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}


/// Anything that can be placed on a 2D plane
/// Heuristics read nodes through this trait
pub trait Coordinates<T: Float> {
    fn coordinates(&self) -> (T, T);
}

/// Straight-line distance from a node to the goal
/// Admissible as long as no edge is shorter than the distance between its ends
pub fn euclidean_heuristic<N, T>(node: &N, goal: &N) -> T
where
    N: Coordinates<T>,
    T: Float,
{
    let (x1, y1) = node.coordinates();
    let (x2, y2) = goal.coordinates();
    euclidean(x1, y1, x2, y2)
}


/// 2D Point
/// Stored as OrderedFloat so points can be hashed and used as graph nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: OrderedFloat<f64>,
    pub y: OrderedFloat<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: OrderedFloat(x), y: OrderedFloat(y) }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(self.x.0, self.y.0, other.x.0, other.y.0)
    }
}

impl Coordinates<f64> for Point {
    fn coordinates(&self) -> (f64, f64) {
        (self.x.0, self.y.0)
    }
}

impl<T: Float> Coordinates<T> for (OrderedFloat<T>, OrderedFloat<T>) {
    fn coordinates(&self) -> (T, T) {
        (self.0.0, self.1.0)
    }
}

impl<T: Float> Coordinates<T> for [OrderedFloat<T>; 2] {
    fn coordinates(&self) -> (T, T) {
        (self[0].0, self[1].0)
    }
}

// grid cells
impl Coordinates<f64> for (i32, i32) {
    fn coordinates(&self) -> (f64, f64) {
        (f64::from(self.0), f64::from(self.1))
    }
}

impl Coordinates<f64> for (i64, i64) {
    fn coordinates(&self) -> (f64, f64) {
        (self.0 as f64, self.1 as f64)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_three_four_five() {
        assert_eq!(euclidean(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(euclidean(-1.0f32, -1.0, 2.0, 3.0), 5.0);
        assert_eq!(Point::new(1.0, 1.0).distance(&Point::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn test_heuristic_on_node_types() {
        let h: f64 = euclidean_heuristic(&(0i32, 0i32), &(3i32, 4i32));
        assert_eq!(h, 5.0);

        let h: f64 = euclidean_heuristic(&Point::new(0.0, 0.0), &Point::new(3.0, 4.0));
        assert_eq!(h, 5.0);

        let h: f32 = euclidean_heuristic(
            &(OrderedFloat(0.0f32), OrderedFloat(0.0f32)),
            &(OrderedFloat(3.0f32), OrderedFloat(4.0f32)),
        );
        assert_eq!(h, 5.0);
    }

    #[test]
    fn test_points_are_hashable_nodes() {
        use std::collections::HashSet;

        let points: HashSet<Point> = [Point::new(1.0, 2.0), Point::new(1.0, 2.0), Point::new(2.0, 1.0)]
            .into_iter()
            .collect();
        assert_eq!(points.len(), 2);
        assert_eq!(Point::new(1.0, 1.0).distance(&Point::new(4.0, 5.0)), 5.0);
    }
}
