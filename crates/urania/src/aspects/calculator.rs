use crate::aspects::types::{
    AspectCore, AspectObjectRef, AspectPair, AspectPoint, AspectSet, AspectSetKind,
    AspectSettings, AspectType,
};
use crate::error::ChartRole;
use crate::zodiac::angular_separation;

/// Aspect calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectCalculator;

impl AspectCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Aspects between every unordered pair of points in one chart.
    pub fn compute_intra_chart_aspects(
        &self,
        role: ChartRole,
        kind: AspectSetKind,
        points: &[AspectPoint],
        settings: &AspectSettings,
    ) -> AspectSet {
        let mut pairs = Vec::new();
        for (i, first) in points.iter().enumerate() {
            for second in &points[i + 1..] {
                self.push_pairs(&mut pairs, (role, first), (role, second), settings);
            }
        }

        AspectSet {
            id: role.id().to_string(),
            label: format!("{} Aspects", capitalize_first(role.id())),
            kind,
            charts: vec![role],
            pairs,
        }
    }

    /// Aspects across the full cross product of two charts' points.
    ///
    /// Pairs of the same body in both charts are kept: a person's Sun
    /// conjunct the partner's Sun is a contact in its own right.
    pub fn compute_inter_chart_aspects(
        &self,
        (role_a, points_a): (ChartRole, &[AspectPoint]),
        (role_b, points_b): (ChartRole, &[AspectPoint]),
        kind: AspectSetKind,
        settings: &AspectSettings,
    ) -> AspectSet {
        let mut pairs = Vec::new();
        for first in points_a {
            for second in points_b {
                self.push_pairs(&mut pairs, (role_a, first), (role_b, second), settings);
            }
        }

        AspectSet {
            id: format!("{}:{}", role_a.id(), role_b.id()),
            label: format!(
                "{} / {} Aspects",
                capitalize_first(role_a.id()),
                capitalize_first(role_b.id())
            ),
            kind,
            charts: vec![role_a, role_b],
            pairs,
        }
    }

    fn push_pairs(
        &self,
        pairs: &mut Vec<AspectPair>,
        (role_a, a): (ChartRole, &AspectPoint),
        (role_b, b): (ChartRole, &AspectPoint),
        settings: &AspectSettings,
    ) {
        for aspect in self.calculate_aspects(a, b, settings) {
            pairs.push(AspectPair {
                from: AspectObjectRef {
                    chart: role_a,
                    point: a.point,
                },
                to: AspectObjectRef {
                    chart: role_b,
                    point: b.point,
                },
                aspect,
            });
        }
    }

    /// Every aspect type whose orb admits the separation of two points.
    ///
    /// Types are tested in order of canonical angle and all matches are
    /// returned; with orbs wider than 30° one separation can match two types.
    /// An aspect is retrograde when either point's position is.
    pub fn calculate_aspects(
        &self,
        first: &AspectPoint,
        second: &AspectPoint,
        settings: &AspectSettings,
    ) -> Vec<AspectCore> {
        let separation = angular_separation(first.longitude, second.longitude);

        AspectType::ALL
            .iter()
            .filter_map(|&aspect_type| {
                let exact_angle = aspect_type.angle();
                let orb = (separation - exact_angle).abs();
                if orb > settings.orb_for(aspect_type) {
                    return None;
                }
                Some(AspectCore {
                    aspect_type,
                    exact_angle,
                    separation,
                    orb,
                    is_applying: self.is_aspect_applying(
                        first.longitude,
                        second.longitude,
                        first.speed,
                        second.speed,
                        exact_angle,
                        separation,
                    ),
                    is_exact: orb < settings.exact_threshold,
                    is_retrograde: first.retrograde || second.retrograde,
                })
            })
            .collect()
    }

    /// Whether the separation is moving towards the exact angle.
    fn is_aspect_applying(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        aspect_angle: f64,
        current_angle: f64,
    ) -> bool {
        let relative_speed = speed1 - speed2;

        // Direction is unreliable when the points move together.
        if relative_speed.abs() < 0.01 {
            return current_angle < aspect_angle + 0.5;
        }

        let signed_diff = wrap_signed(lon1 - lon2);
        let current_distance = (current_angle - aspect_angle).abs();

        // Project a tenth of a day ahead.
        let future_angle = wrap_signed(signed_diff + relative_speed * 0.1).abs();
        let future_distance = (future_angle - aspect_angle).abs();

        future_distance < current_distance
    }
}

fn wrap_signed(mut diff: f64) -> f64 {
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff < -180.0 {
        diff += 360.0;
    }
    diff
}

/// Capitalize first letter of a string
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
