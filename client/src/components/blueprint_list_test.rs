use frames::Point;

use super::*;

#[test]
fn points_label_counts_points() {
    let summary = BlueprintSummary { name: "casa".to_owned(), points: vec![Point::new(1, 1), Point::new(2, 2)] };
    assert_eq!(points_label(&summary), "(2 pts)");
}

#[test]
fn total_label_formats_count() {
    assert_eq!(total_label(0), "Total: 0 plano(s)");
    assert_eq!(total_label(3), "Total: 3 plano(s)");
}
