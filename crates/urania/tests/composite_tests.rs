mod common;

use common::{delhi_birth, new_york_birth, EraProvider, FixtureProvider, FIXTURE_EPOCH};
use urania::ephemeris::{Ayanamsa, GeoLocation};
use urania::time::julian_day_for;
use urania::zodiac::{angular_separation, normalize_degrees};
use urania::{
    BirthData, Body, ChartEngine, ChartPoint, ChartRole, ChartSettings, CompositeAngleMode,
    CompositeReference, ErrorKind, JulianDay, ReferenceFrame, SwissEphemerisAdapter,
};

fn birth(date: &str, time: &str, latitude: f64, longitude: f64, offset: f64) -> BirthData {
    BirthData::parse(date, time, latitude, longitude, offset).unwrap()
}

#[test]
fn test_composite_of_chart_with_itself_is_the_chart() {
    let engine = ChartEngine::new(SwissEphemerisAdapter::built_in());
    let result = engine
        .compute_composite(&delhi_birth(), &delhi_birth(), None)
        .unwrap();

    assert_eq!(result.composite.role, ChartRole::Composite);
    for (composite, natal) in result
        .composite
        .positions
        .iter()
        .zip(&result.natal_a.positions)
    {
        assert_eq!(composite.position.body, natal.position.body);
        assert!((composite.position.longitude - natal.position.longitude).abs() < 1e-9);
        assert_eq!(composite.position.retrograde, natal.position.retrograde);
        assert_eq!(composite.house, natal.house);
    }
    assert!(
        (result.composite.houses.angles.ascendant - result.natal_a.houses.angles.ascendant).abs()
            < 1e-9
    );
    assert!(matches!(result.angle_mode, CompositeAngleMode::Midpoint { .. }));
}

#[test]
fn test_midpoint_takes_the_shorter_arc() {
    // The Sun moves 1°/day from 350° at the epoch; B is born 20 days later at 10°.
    let provider = FixtureProvider::new().with_position(Body::Sun, 350.0, 1.0, false);
    let engine = ChartEngine::new(provider);
    let a = birth("2000-01-01", "12:00", 0.0, 0.0, 0.0);
    let b = birth("2000-01-21", "12:00", 0.0, 0.0, 0.0);
    let result = engine.compute_composite(&a, &b, None).unwrap();

    let sun = &result.composite.position(Body::Sun).unwrap().position;
    assert!(angular_separation(sun.longitude, 0.0) < 1e-9);
    assert!((0.0..360.0).contains(&sun.longitude));
    assert_eq!(
        result.angle_mode.julian_day(),
        JulianDay::new(2_451_555.0)
    );
}

#[test]
fn test_composite_south_node_is_antipode_of_north_node() {
    let engine = ChartEngine::new(SwissEphemerisAdapter::built_in());
    let result = engine
        .compute_composite(&delhi_birth(), &new_york_birth(), None)
        .unwrap();

    let north = &result.composite.position(Body::NorthNode).unwrap().position;
    let south = &result.composite.position(Body::SouthNode).unwrap().position;
    let expected = normalize_degrees(north.longitude + 180.0);
    assert!((south.longitude - expected).abs() < 1e-9);
    assert!(south.retrograde);
}

#[test]
fn test_composite_retrograde_if_either_chart_is() {
    let engine = ChartEngine::new(SwissEphemerisAdapter::built_in());
    let direct = birth("2020-06-01", "00:00", 0.0, 0.0, 0.0);
    let result = engine
        .compute_composite(&delhi_birth(), &direct, None)
        .unwrap();

    assert!(result.natal_a.position(Body::Mercury).unwrap().position.retrograde);
    assert!(!result.natal_b.position(Body::Mercury).unwrap().position.retrograde);
    assert!(result.composite.position(Body::Mercury).unwrap().position.retrograde);
}

#[test]
fn test_composite_aspects_keep_retrograde_flag_of_mixed_motion() {
    // A sees Mercury slowly retrograde, B sees it fast and direct, so the
    // composite speed is positive while the composite Mercury is retrograde.
    let provider = EraProvider {
        early: FixtureProvider::new().with_position(Body::Mercury, 25.0, -0.5, true),
        late: FixtureProvider::new().with_position(Body::Mercury, 25.0, 1.5, false),
        boundary: FIXTURE_EPOCH + 1.0,
    };
    let engine = ChartEngine::new(provider);
    let a = birth("2000-01-01", "12:00", 0.0, 0.0, 0.0);
    let b = birth("2000-01-03", "12:00", 0.0, 0.0, 0.0);
    let result = engine.compute_composite(&a, &b, None).unwrap();

    let mercury = &result.composite.position(Body::Mercury).unwrap().position;
    assert!(mercury.speed > 0.0);
    assert!(mercury.retrograde);

    let touching: Vec<_> = result
        .composite
        .aspects
        .pairs
        .iter()
        .filter(|pair| {
            pair.from.point == ChartPoint::Body(Body::Mercury)
                || pair.to.point == ChartPoint::Body(Body::Mercury)
        })
        .collect();
    assert!(!touching.is_empty());
    assert!(touching.iter().all(|pair| pair.aspect.is_retrograde));
}

#[test]
fn test_reference_moment_uses_first_location_and_offset() {
    let engine = ChartEngine::new(FixtureProvider::new());
    let a = delhi_birth();
    let reference = CompositeReference::parse("2000-01-01", "12:00", None).unwrap();
    let result = engine
        .compute_composite(&a, &new_york_birth(), Some(&reference))
        .unwrap();

    let expected_jd = julian_day_for(reference.date, reference.time, a.timezone_offset).unwrap();
    assert_eq!(
        result.angle_mode,
        CompositeAngleMode::Reference {
            julian_day: expected_jd,
            location: a.location(),
        }
    );
    assert_eq!(result.composite.julian_day, expected_jd);
}

#[test]
fn test_reference_offset_overrides_first_offset() {
    let engine = ChartEngine::new(FixtureProvider::new());
    let reference = CompositeReference::parse("2000-01-01", "12:00", Some(0.0)).unwrap();
    let result = engine
        .compute_composite(&delhi_birth(), &new_york_birth(), Some(&reference))
        .unwrap();
    assert_eq!(result.angle_mode.julian_day(), JulianDay::new(2_451_545.0));
}

#[test]
fn test_midpoint_location_crosses_antimeridian() {
    let engine = ChartEngine::new(FixtureProvider::new());
    let a = birth("1990-05-15", "12:00", 10.0, 170.0, 0.0);
    let b = birth("1990-05-15", "12:00", -20.0, -170.0, 0.0);
    let result = engine.compute_composite(&a, &b, None).unwrap();

    assert_eq!(
        result.angle_mode.location(),
        GeoLocation {
            lat: -5.0,
            lon: 180.0
        }
    );
}

#[test]
fn test_mismatched_frames_are_rejected() {
    let mut settings = ChartSettings::default();
    settings.composite.frame = ReferenceFrame::Sidereal(Ayanamsa::Lahiri);
    let engine = ChartEngine::with_settings(FixtureProvider::new(), settings).unwrap();
    let b = new_york_birth().with_ayanamsa_name("fagan_bradley").unwrap();
    let err = engine
        .compute_composite(&delhi_birth(), &b, None)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InputValidation);
    assert_eq!(err.role(), Some(ChartRole::Composite));
    assert_eq!(err.field(), Some("ayanamsa"));
}

#[test]
fn test_invalid_reference_offset_is_rejected() {
    let err = CompositeReference::parse("2000-01-01", "12:00", Some(15.0)).unwrap_err();
    assert_eq!(err.field(), Some("timezone_offset"));
}
