//! Static interpretive text keyed by placement.
//!
//! Each text is assembled from a fixed theme per body, a style per sign, an
//! area of life per house and a dynamic per aspect. Nothing here depends on
//! chart numbers beyond the classification it is handed.

use serde::{Deserialize, Serialize};

use crate::aspects::{Angle, AspectPair, AspectType, ChartPoint};
use crate::ephemeris::Body;
use crate::error::ChartRole;
use crate::zodiac::Sign;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpretationCategory {
    PlanetInSign,
    PlanetInHouse,
    Aspect,
    HouseOverlay,
    NodalContact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub category: InterpretationCategory,
    /// Stable lookup key, e.g. `sun:taurus` or `natal_a:venus:trine:natal_b:mars`
    pub key: String,
    pub text: String,
}

fn point_theme(point: ChartPoint) -> &'static str {
    match point {
        ChartPoint::Body(body) => body_theme(body),
        ChartPoint::Angle(Angle::Ascendant) => "the outward persona and first impressions",
        ChartPoint::Angle(Angle::Midheaven) => "public standing and vocation",
    }
}

fn body_theme(body: Body) -> &'static str {
    match body {
        Body::Sun => "core identity and vitality",
        Body::Moon => "emotional needs and instinctive responses",
        Body::Mercury => "thinking, speech and learning",
        Body::Venus => "affection, values and attraction",
        Body::Mars => "drive, desire and assertion",
        Body::Jupiter => "growth, faith and generosity",
        Body::Saturn => "structure, duty and limits",
        Body::Uranus => "independence and sudden change",
        Body::Neptune => "imagination, ideals and dissolution",
        Body::Pluto => "power, depth and transformation",
        Body::NorthNode => "the direction of growth",
        Body::SouthNode => "familiar habits carried from the past",
    }
}

fn sign_style(sign: Sign) -> &'static str {
    match sign {
        Sign::Aries => "boldly and with initiative",
        Sign::Taurus => "steadily, seeking comfort and security",
        Sign::Gemini => "curiously and through exchange",
        Sign::Cancer => "protectively, guided by feeling",
        Sign::Leo => "warmly and with a wish to be seen",
        Sign::Virgo => "carefully, through service and detail",
        Sign::Libra => "diplomatically, seeking balance",
        Sign::Scorpio => "intensely and privately",
        Sign::Sagittarius => "expansively, in search of meaning",
        Sign::Capricorn => "deliberately, with an eye on the long term",
        Sign::Aquarius => "unconventionally and with detachment",
        Sign::Pisces => "receptively and with compassion",
    }
}

const HOUSE_AREAS: [&str; 12] = [
    "self-image and approach to life",
    "money, possessions and self-worth",
    "communication, siblings and the near environment",
    "home, family and roots",
    "creativity, romance and play",
    "work, health and daily routine",
    "partnership and open relating",
    "shared resources, intimacy and crisis",
    "travel, belief and higher learning",
    "career, reputation and authority",
    "friendship, groups and hopes",
    "retreat, the unconscious and endings",
];

fn house_area(house: u8) -> &'static str {
    HOUSE_AREAS
        .get(usize::from(house.saturating_sub(1)))
        .copied()
        .unwrap_or("an undefined area of life")
}

fn aspect_dynamic(aspect_type: AspectType) -> &'static str {
    match aspect_type {
        AspectType::Conjunction => "fuses with",
        AspectType::Sextile => "cooperates easily with",
        AspectType::Square => "is challenged by",
        AspectType::Trine => "flows harmoniously with",
        AspectType::Opposition => "is held in tension with",
    }
}

fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

pub fn planet_in_sign(body: Body, sign: Sign) -> Interpretation {
    Interpretation {
        category: InterpretationCategory::PlanetInSign,
        key: format!("{}:{}", body.id(), sign.name().to_lowercase()),
        text: format!(
            "{} in {}: {} expressed {}.",
            body.name(),
            sign.name(),
            capitalize(body_theme(body)),
            sign_style(sign)
        ),
    }
}

pub fn planet_in_house(body: Body, house: u8) -> Interpretation {
    Interpretation {
        category: InterpretationCategory::PlanetInHouse,
        key: format!("{}:house_{}", body.id(), house),
        text: format!(
            "{} in the {} house: {} focused on {}.",
            body.name(),
            ordinal(house),
            capitalize(body_theme(body)),
            house_area(house)
        ),
    }
}

pub fn aspect(pair: &AspectPair) -> Interpretation {
    let from = pair.from.point;
    let to = pair.to.point;
    let aspect_type = pair.aspect.aspect_type;
    let same_chart = pair.from.chart == pair.to.chart;

    let label = |role: ChartRole, point: ChartPoint| {
        if same_chart {
            point.name().to_string()
        } else {
            format!("{} {}", role, point.name())
        }
    };

    Interpretation {
        category: InterpretationCategory::Aspect,
        key: format!(
            "{}:{}:{}:{}:{}",
            pair.from.chart.id(),
            from.id(),
            aspect_type.id(),
            pair.to.chart.id(),
            to.id()
        ),
        text: format!(
            "{} {} {}: {} {} {} (orb {:.2}°).",
            label(pair.from.chart, from),
            aspect_type.id(),
            label(pair.to.chart, to),
            capitalize(point_theme(from)),
            aspect_dynamic(aspect_type),
            point_theme(to),
            pair.aspect.orb
        ),
    }
}

/// One person's body falling in the other person's house.
pub fn house_overlay(owner: ChartRole, body: Body, host: ChartRole, house: u8) -> Interpretation {
    Interpretation {
        category: InterpretationCategory::HouseOverlay,
        key: format!("{}:{}:{}:house_{}", owner.id(), body.id(), host.id(), house),
        text: format!(
            "{} {} falls in {}'s {} house: their {} touches the partner's {}.",
            owner,
            body.name(),
            host,
            ordinal(house),
            body_theme(body),
            house_area(house)
        ),
    }
}

pub fn nodal_contact(
    planet_chart: ChartRole,
    body: Body,
    node_chart: ChartRole,
    node: Body,
    separation: f64,
) -> Interpretation {
    let meaning = match node {
        Body::SouthNode => "stirs a sense of old familiarity",
        _ => "points toward shared growth",
    };
    Interpretation {
        category: InterpretationCategory::NodalContact,
        key: format!(
            "{}:{}:{}:{}",
            planet_chart.id(),
            body.id(),
            node_chart.id(),
            node.id()
        ),
        text: format!(
            "{} {} within {:.2}° of {} {}: {} {}.",
            planet_chart,
            body.name(),
            separation,
            node_chart,
            node.name(),
            capitalize(body_theme(body)),
            meaning
        ),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
