//! Carving walker and the self-avoidance rule

use std::collections::HashSet;

use crate::Point;

/// Random walker that remembers where it has been
///
/// History keeps insertion order: revisiting a known point moves the
/// walker but does not re-record the point.
#[derive(Clone, Debug)]
pub struct Walker {
    position: Point,
    history: Vec<Point>,
    visited: HashSet<Point>,
}

impl Walker {
    /// Walker at `start`, with nothing visited yet
    ///
    /// The starting point itself is not part of the history.
    pub fn new(start: Point) -> Self {
        Self {
            position: start,
            history: Vec::new(),
            visited: HashSet::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Distinct visited points, in order of first visit
    pub fn history(&self) -> &[Point] {
        &self.history
    }

    pub fn visited(&self) -> &HashSet<Point> {
        &self.visited
    }

    pub fn has_visited(&self, pos: Point) -> bool {
        self.visited.contains(&pos)
    }

    /// Most recently recorded new point
    pub fn last(&self) -> Option<Point> {
        self.history.last().copied()
    }

    /// Move to `pos`; returns true on the first visit
    pub fn move_to(&mut self, pos: Point) -> bool {
        self.position = pos;
        let first_visit = self.visited.insert(pos);
        if first_visit {
            self.history.push(pos);
        }
        first_visit
    }
}

/// Check whether moving from `current` to `candidate` keeps the walk
/// from touching itself.
///
/// Rejected when any neighbour of `candidate`, other than `current`, has
/// already been visited.
pub fn is_self_avoiding(candidate: Point, current: Point, visited: &HashSet<Point>) -> bool {
    !candidate
        .neighbours()
        .any(|n| n != current && visited.contains(&n))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::walker::{is_self_avoiding, Walker};
    use crate::Point;

    fn points(coords: &[(usize, usize)]) -> HashSet<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn anything_goes_on_empty_history() {
        let visited = HashSet::new();
        assert!(is_self_avoiding(
            Point::new(2, 1),
            Point::new(1, 1),
            &visited
        ));
    }

    #[test]
    fn the_cell_moved_from_does_not_count() {
        // Walked (1,1) -> (2,1); stepping on to (3,1) only touches (2,1)
        let visited = points(&[(1, 1), (2, 1)]);
        assert!(is_self_avoiding(
            Point::new(3, 1),
            Point::new(2, 1),
            &visited
        ));
    }

    #[test]
    fn reject_touching_older_trail() {
        // Trail (1,1) (2,1) (2,2); moving to (1,2) would touch (1,1)
        let visited = points(&[(1, 1), (2, 1), (2, 2)]);
        assert!(!is_self_avoiding(
            Point::new(1, 2),
            Point::new(2, 2),
            &visited
        ));
        assert!(is_self_avoiding(
            Point::new(3, 2),
            Point::new(2, 2),
            &visited
        ));
        assert!(is_self_avoiding(
            Point::new(2, 3),
            Point::new(2, 2),
            &visited
        ));
    }

    #[test]
    fn candidate_on_zero_edge() {
        let visited = points(&[(0, 1)]);
        assert!(!is_self_avoiding(
            Point::new(0, 0),
            Point::new(1, 0),
            &visited
        ));
    }

    #[test]
    fn history_records_first_visits_in_order() {
        let mut walker = Walker::new(Point::new(1, 1));
        assert_eq!(walker.last(), None);
        assert!(!walker.has_visited(Point::new(1, 1)));

        assert!(walker.move_to(Point::new(2, 1)));
        assert!(walker.move_to(Point::new(3, 1)));
        assert!(!walker.move_to(Point::new(2, 1)));

        assert_eq!(walker.position(), Point::new(2, 1));
        assert_eq!(walker.last(), Some(Point::new(3, 1)));
        assert_eq!(walker.history(), &[Point::new(2, 1), Point::new(3, 1)]);
        assert_eq!(walker.visited().len(), 2);
    }
}
