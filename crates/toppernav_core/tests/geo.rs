use toppernav_core::{bearing_degrees, distance_meters, to_cardinal, Cardinal, GeoPoint};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

const CAMPUS: GeoPoint = GeoPoint::new(36.98596, -86.44990);

#[test]
fn distance_to_self_is_zero() {
    assert_eq!(distance_meters(CAMPUS, CAMPUS), 0.0);
    let origin = GeoPoint::new(0.0, 0.0);
    assert_eq!(distance_meters(origin, origin), 0.0);
}

#[test]
fn distance_is_symmetric() {
    let a = GeoPoint::new(36.98571, -86.45172);
    let b = GeoPoint::new(36.98710, -86.45210);
    assert_eq!(distance_meters(a, b), distance_meters(b, a));
}

#[test]
fn one_degree_of_longitude_at_equator() {
    let d = distance_meters(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
    assert!(approx_eq(d, 111_195.0, 111_195.0 * 0.01), "got {d}");
}

#[test]
fn london_to_paris() {
    let london = GeoPoint::new(51.5074, -0.1278);
    let paris = GeoPoint::new(48.8566, 2.3522);
    assert!(approx_eq(distance_meters(london, paris), 343_560.0, 5_000.0));
}

#[test]
fn bearing_due_north_and_due_east() {
    let origin = GeoPoint::new(0.0, 0.0);
    assert!(approx_eq(bearing_degrees(origin, GeoPoint::new(1.0, 0.0)), 0.0, 0.01));
    assert!(approx_eq(bearing_degrees(origin, GeoPoint::new(0.0, 1.0)), 90.0, 0.01));
}

#[test]
fn bearing_due_south_and_due_west() {
    let origin = GeoPoint::new(0.0, 0.0);
    assert!(approx_eq(bearing_degrees(origin, GeoPoint::new(-1.0, 0.0)), 180.0, 0.01));
    assert!(approx_eq(bearing_degrees(origin, GeoPoint::new(0.0, -1.0)), 270.0, 0.01));
}

#[test]
fn bearing_stays_in_range() {
    let targets = [
        GeoPoint::new(36.99, -86.46),
        GeoPoint::new(36.98, -86.44),
        GeoPoint::new(36.98596, -86.44991),
        GeoPoint::new(-36.98, 93.55),
    ];
    for target in targets {
        let bearing = bearing_degrees(CAMPUS, target);
        assert!((0.0..360.0).contains(&bearing), "bearing {bearing} out of range");
    }
}

#[test]
fn bearing_to_same_point_is_zero() {
    assert_eq!(bearing_degrees(CAMPUS, CAMPUS), 0.0);
}

#[test]
fn reciprocal_bearing_is_not_exactly_opposite_on_a_sphere() {
    let a = GeoPoint::new(40.0, -74.0);
    let b = GeoPoint::new(51.5, 0.0);
    let forward = bearing_degrees(a, b);
    let back = bearing_degrees(b, a);
    assert!(!approx_eq((forward + 180.0) % 360.0, back, 1.0));
}

#[test]
fn cardinal_boundaries() {
    assert_eq!(to_cardinal(0.0), Cardinal::N);
    assert_eq!(to_cardinal(22.4), Cardinal::N);
    assert_eq!(to_cardinal(22.6), Cardinal::NE);
    assert_eq!(to_cardinal(90.0), Cardinal::E);
    assert_eq!(to_cardinal(180.0), Cardinal::S);
    assert_eq!(to_cardinal(270.0), Cardinal::W);
    assert_eq!(to_cardinal(330.0), Cardinal::NW);
    assert_eq!(to_cardinal(348.75), Cardinal::N);
    assert_eq!(to_cardinal(359.9), Cardinal::N);
}

#[test]
fn cardinal_renders_short_names() {
    assert_eq!(to_cardinal(135.0).to_string(), "SE");
    assert_eq!(Cardinal::SW.as_str(), "SW");
}

#[test]
fn eastward_walk_on_campus_reads_east() {
    let from = GeoPoint::new(36.98596, -86.45);
    let to = GeoPoint::new(36.98596, -86.44);
    let bearing = bearing_degrees(from, to);
    assert!((70.0..110.0).contains(&bearing));
    assert_eq!(to_cardinal(bearing), Cardinal::E);
}
