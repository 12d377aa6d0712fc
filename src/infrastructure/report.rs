//! Frontier rendering: a header row followed by one tab-separated
//! cost/distance pair per point, in discovery order.

use crate::domain::value_objects::ParetoFrontier;
use std::fmt::Write;

pub fn render_frontier(frontier: &ParetoFrontier) -> String {
    let mut out = String::from("f1: cost\tf2: dist\n");
    for point in frontier {
        let _ = writeln!(out, "{}\t{}", point.cost, point.dist);
    }
    out
}

pub fn print_frontier(frontier: &ParetoFrontier) {
    print!("{}", render_frontier(frontier));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ParetoPoint;

    #[test]
    fn test_render_empty_frontier() {
        assert_eq!(render_frontier(&ParetoFrontier::new()), "f1: cost\tf2: dist\n");
    }

    #[test]
    fn test_render_points_in_discovery_order() {
        let mut frontier = ParetoFrontier::new();
        frontier.push(ParetoPoint::new(5, 11));
        frontier.push(ParetoPoint::new(10, 2));
        assert_eq!(
            render_frontier(&frontier),
            "f1: cost\tf2: dist\n5\t11\n10\t2\n"
        );
    }
}
