use lumen_core::{math, Point, Vertex};
use lumen_geometry::polygon::{orient, polygon_area, rect_polygon, triangles_area, winding};
use lumen_geometry::{combine, resolve, triangulate, GeometryError, Winding};

fn regular_polygon(sides: usize, radius: f32) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            // Negative angle step walks clockwise.
            let angle = -(i as f32) * std::f32::consts::TAU / sides as f32;
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn star() -> Vec<Point> {
    vec![
        Point::new(1.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(0.0, 1.0),
        Point::new(-2.0, 2.0),
        Point::new(-1.0, 0.0),
        Point::new(-2.0, -2.0),
        Point::new(0.0, -1.0),
        Point::new(2.0, -2.0),
    ]
}

#[test]
fn convex_polygons_yield_n_minus_two_triangles_covering_the_area() {
    for sides in 3..=12 {
        let poly = regular_polygon(sides, 1.5);
        assert_eq!(winding(&poly), Some(Winding::Clockwise));

        let expected_area = polygon_area(&poly);
        let mut work = poly.clone();
        let tris = resolve(&mut work).unwrap();

        assert_eq!(tris.len(), sides - 2, "sides = {sides}");
        assert!((triangles_area(&tris) - expected_area).abs() < 1e-4);
    }
}

#[test]
fn unit_square_in_either_winding_after_orienting() {
    let mut square = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ];
    assert!(matches!(
        resolve(&mut square.clone()),
        Err(GeometryError::NoEar { .. })
    ));

    assert!(orient(&mut square, Winding::Clockwise));
    let tris = resolve(&mut square).unwrap();
    assert_eq!(tris.len(), 2);
    assert!((triangles_area(&tris) - 1.0).abs() < 1e-6);
}

#[test]
fn concave_star_is_fully_covered() {
    let mut outline = star();
    assert_eq!(winding(&outline), Some(Winding::CounterClockwise));
    orient(&mut outline, Winding::Clockwise);

    let indices = triangulate(&outline).unwrap();
    assert_eq!(indices.len(), outline.len() - 2);

    let tris: Vec<_> = indices.iter().map(|t| t.map(|i| outline[i])).collect();
    assert!((triangles_area(&tris) - 8.0).abs() < 1e-5);
}

#[test]
fn index_variant_matches_in_place_variant() {
    let mut outline = star();
    orient(&mut outline, Winding::Clockwise);

    let indices = triangulate(&outline).unwrap();
    let mut work = outline.clone();
    let tris = resolve(&mut work).unwrap();

    let from_indices: Vec<_> = indices.iter().map(|t| t.map(|i| outline[i])).collect();
    assert_eq!(from_indices, tris);
    assert_eq!(work.len(), 3);
}

#[test]
fn rect_polygon_is_ready_for_ear_clipping() {
    let mut rect = rect_polygon(-1.0, -0.5, 1.0, 0.5).to_vec();
    let tris = resolve(&mut rect).unwrap();
    assert!((triangles_area(&tris) - 2.0).abs() < 1e-6);
}

#[test]
fn grid_tessellation_count() {
    for (cols, rows) in [(2usize, 2usize), (3, 5), (10, 4)] {
        let grid: Vec<Point> = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Point::new(c as f32, r as f32)))
            .collect();
        let tris = combine(&grid, cols).unwrap();
        assert_eq!(tris.len(), 2 * (cols - 1) * (rows - 1));

        let area: f32 = triangles_area(&tris);
        assert!((area - ((cols - 1) * (rows - 1)) as f32).abs() < 1e-4);
    }
}

#[test]
fn wave_surface_tessellates_vertices() {
    let wave = math::sine(0.1, 8.0, 0.0);
    let wave = &wave;
    let cols = 11;
    let grid: Vec<Vertex> = (0..6)
        .flat_map(|row| {
            (0..cols).map(move |col| {
                let x = -1.0 + col as f32 * 0.2;
                Vertex::new(x, wave(x), -1.0 + row as f32 * 0.4)
            })
        })
        .collect();

    let tris = combine(&grid, cols).unwrap();
    assert_eq!(tris.len(), 2 * 10 * 5);
    assert_eq!(tris[0][0], grid[cols]);
}
