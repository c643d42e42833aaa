mod common;

use common::{date, delhi_birth, new_york_birth, FixtureProvider};
use chrono::NaiveTime;
use urania::aspects::{Angle, AspectSetKind};
use urania::interpretation::InterpretationCategory;
use urania::{
    AspectType, BirthData, Body, ChartEngine, ChartPoint, ChartRole, ChartSettings, ErrorKind,
    SwissEphemerisAdapter,
};

#[test]
fn test_synastry_is_deterministic() {
    let engine = ChartEngine::new(SwissEphemerisAdapter::built_in());
    let first = engine
        .compute_synastry(&delhi_birth(), &new_york_birth())
        .unwrap();
    let second = engine
        .compute_synastry(&delhi_birth(), &new_york_birth())
        .unwrap();

    let first = serde_json::to_string(&first).unwrap();
    let second = serde_json::to_string(&second).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_identical_charts_conjoin_every_point() {
    let engine = ChartEngine::new(FixtureProvider::new());
    let result = engine
        .compute_synastry(&delhi_birth(), &delhi_birth())
        .unwrap();

    assert_eq!(result.cross_aspects.kind, AspectSetKind::Synastry);
    assert_eq!(
        result.cross_aspects.charts,
        vec![ChartRole::NatalA, ChartRole::NatalB]
    );

    let conjunctions: Vec<_> = result
        .cross_aspects
        .pairs
        .iter()
        .filter(|pair| pair.from.point == pair.to.point)
        .collect();
    // 12 bodies plus the Ascendant, each against itself
    assert_eq!(conjunctions.len(), 13);
    assert!(conjunctions
        .iter()
        .all(|pair| pair.aspect.aspect_type == AspectType::Conjunction && pair.aspect.is_exact));
    assert!(conjunctions
        .iter()
        .any(|pair| pair.from.point == ChartPoint::Angle(Angle::Ascendant)));
    assert!(result
        .cross_aspects
        .pairs
        .iter()
        .all(|pair| pair.from.chart == ChartRole::NatalA && pair.to.chart == ChartRole::NatalB));
}

#[test]
fn test_south_node_aspects_are_retrograde() {
    // Both nodes stand still in the fixture sky; only the South Node is flagged.
    let engine = ChartEngine::new(FixtureProvider::new());
    let chart = engine
        .compute_natal(&delhi_birth(), ChartRole::Natal)
        .unwrap();
    assert_eq!(chart.position(Body::SouthNode).unwrap().position.speed, 0.0);

    let south = ChartPoint::Body(Body::SouthNode);
    let touching: Vec<_> = chart
        .aspects
        .pairs
        .iter()
        .filter(|pair| pair.from.point == south || pair.to.point == south)
        .collect();
    // Mercury sextile, Pluto square and the nodal opposition
    assert!(touching.len() >= 3);
    assert!(touching.iter().all(|pair| pair.aspect.is_retrograde));
}

#[test]
fn test_house_overlays_cover_both_directions() {
    let engine = ChartEngine::new(FixtureProvider::new());
    let result = engine
        .compute_synastry(&delhi_birth(), &new_york_birth())
        .unwrap();

    assert_eq!(result.house_overlays.len(), 24);
    let (a_in_b, b_in_a) = result.house_overlays.split_at(12);
    assert!(a_in_b
        .iter()
        .all(|o| o.owner == ChartRole::NatalA && o.host == ChartRole::NatalB));
    assert!(b_in_a
        .iter()
        .all(|o| o.owner == ChartRole::NatalB && o.host == ChartRole::NatalA));

    // Sun at 10 falls between cusp 10 (0) and cusp 11 (35)
    let sun = a_in_b.iter().find(|o| o.body == Body::Sun).unwrap();
    assert_eq!(sun.house, 10);
}

#[test]
fn test_no_nodal_contacts_outside_orb() {
    let engine = ChartEngine::new(FixtureProvider::new());
    let result = engine
        .compute_synastry(&delhi_birth(), &new_york_birth())
        .unwrap();
    assert!(result.nodal_contacts.is_empty());
}

#[test]
fn test_nodal_contacts_within_orb() {
    let provider = FixtureProvider::new().with_position(Body::Venus, 143.0, 0.0, false);
    let engine = ChartEngine::new(provider);
    let result = engine
        .compute_synastry(&delhi_birth(), &new_york_birth())
        .unwrap();

    assert_eq!(result.nodal_contacts.len(), 4);
    for contact in &result.nodal_contacts {
        assert_eq!(contact.body, Body::Venus);
        assert_eq!(contact.node, Body::NorthNode);
        assert!((contact.separation - 3.0).abs() < 1e-9);
    }
    assert_eq!(result.nodal_contacts[0].planet_chart, ChartRole::NatalA);
    assert_eq!(result.nodal_contacts[0].node_chart, ChartRole::NatalA);
    assert_eq!(result.nodal_contacts[1].node_chart, ChartRole::NatalB);
    assert_eq!(result.nodal_contacts[2].planet_chart, ChartRole::NatalB);

    assert!(result
        .interpretations
        .iter()
        .any(|i| i.category == InterpretationCategory::NodalContact));
}

#[test]
fn test_nodal_orb_is_inclusive() {
    let provider = FixtureProvider::new().with_position(Body::Mars, 325.0, 0.0, false);
    let engine = ChartEngine::new(provider);
    let result = engine
        .compute_synastry(&delhi_birth(), &new_york_birth())
        .unwrap();

    // 325 sits exactly 5° from the South Node at 320
    assert_eq!(result.nodal_contacts.len(), 4);
    assert!(result
        .nodal_contacts
        .iter()
        .all(|c| c.node == Body::SouthNode && c.body == Body::Mars));
}

#[test]
fn test_invalid_second_birth_names_its_chart() {
    let engine = ChartEngine::new(FixtureProvider::new());
    let invalid = BirthData::new(
        date(1990, 1, 1),
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        95.0,
        0.0,
        0.0,
    );
    let err = engine.compute_synastry(&delhi_birth(), &invalid).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InputValidation);
    assert_eq!(err.role(), Some(ChartRole::NatalB));
    assert_eq!(err.field(), Some("latitude"));
}

#[test]
fn test_interpretations_can_be_disabled() {
    let settings = ChartSettings {
        include_interpretations: false,
        ..ChartSettings::default()
    };
    let engine = ChartEngine::with_settings(FixtureProvider::new(), settings).unwrap();
    let result = engine
        .compute_synastry(&delhi_birth(), &new_york_birth())
        .unwrap();

    assert!(result.interpretations.is_empty());
    assert!(result.natal_a.interpretations.is_empty());
    assert!(!result.cross_aspects.pairs.is_empty());
}
