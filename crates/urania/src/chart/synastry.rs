//! Two-person comparison.

use serde::{Deserialize, Serialize};

use crate::aspects::{AspectCalculator, AspectSet, AspectSetKind};
use crate::birth::BirthData;
use crate::chart::{ChartEngine, ChartResult};
use crate::ephemeris::{Body, EphemerisProvider};
use crate::error::{ChartError, ChartRole};
use crate::interpretation::{self, Interpretation};
use crate::zodiac::angular_separation;

/// One person's body placed in the other person's houses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseOverlay {
    /// Chart the body belongs to
    pub owner: ChartRole,
    pub body: Body,
    pub longitude: f64,
    /// Chart whose cusps define the house
    pub host: ChartRole,
    pub house: u8,
}

/// A body within the nodal orb of a lunar node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodalContact {
    pub planet_chart: ChartRole,
    pub body: Body,
    pub node_chart: ChartRole,
    pub node: Body,
    pub separation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynastryResult {
    pub natal_a: ChartResult,
    pub natal_b: ChartResult,
    /// A's points (Ascendant included) against B's
    pub cross_aspects: AspectSet,
    /// A's bodies in B's houses, then B's bodies in A's houses
    pub house_overlays: Vec<HouseOverlay>,
    pub nodal_contacts: Vec<NodalContact>,
    pub interpretations: Vec<Interpretation>,
}

impl<P: EphemerisProvider> ChartEngine<P> {
    /// Compare two births. Either natal chart failing aborts the request.
    pub fn compute_synastry(
        &self,
        a: &BirthData,
        b: &BirthData,
    ) -> Result<SynastryResult, ChartError> {
        log::debug!("computing synastry");
        let profile = self.settings.synastry;
        let natal_a = self.natal_chart(a, ChartRole::NatalA, profile)?;
        let natal_b = self.natal_chart(b, ChartRole::NatalB, profile)?;

        let points_a = natal_a.aspect_points();
        let points_b = natal_b.aspect_points();
        let cross_aspects = AspectCalculator.compute_inter_chart_aspects(
            (ChartRole::NatalA, points_a.as_slice()),
            (ChartRole::NatalB, points_b.as_slice()),
            AspectSetKind::Synastry,
            &self.settings.aspects,
        );

        let mut house_overlays = overlays(&natal_a, &natal_b);
        house_overlays.extend(overlays(&natal_b, &natal_a));

        let nodal_contacts =
            nodal_contacts(&[&natal_a, &natal_b], self.settings.nodal_contact_orb);

        let mut interpretations = Vec::new();
        if self.settings.include_interpretations {
            interpretations.extend(cross_aspects.pairs.iter().map(interpretation::aspect));
            interpretations.extend(house_overlays.iter().map(|o| {
                interpretation::house_overlay(o.owner, o.body, o.host, o.house)
            }));
            interpretations.extend(nodal_contacts.iter().map(|c| {
                interpretation::nodal_contact(
                    c.planet_chart,
                    c.body,
                    c.node_chart,
                    c.node,
                    c.separation,
                )
            }));
        }

        Ok(SynastryResult {
            natal_a,
            natal_b,
            cross_aspects,
            house_overlays,
            nodal_contacts,
            interpretations,
        })
    }
}

/// `owner`'s bodies placed in `host`'s houses.
fn overlays(owner: &ChartResult, host: &ChartResult) -> Vec<HouseOverlay> {
    owner
        .positions
        .iter()
        .map(|placed| HouseOverlay {
            owner: owner.role,
            body: placed.position.body,
            longitude: placed.position.longitude,
            host: host.role,
            house: host.houses.house_of(placed.position.longitude),
        })
        .collect()
}

/// Every non-node body of every chart against every chart's nodes.
fn nodal_contacts(charts: &[&ChartResult], orb: f64) -> Vec<NodalContact> {
    let mut contacts = Vec::new();
    for planet_chart in charts {
        let planets = planet_chart
            .positions
            .iter()
            .filter(|p| !p.position.body.is_node());
        for planet in planets {
            for node_chart in charts {
                let nodes = node_chart.positions.iter().filter(|p| p.position.body.is_node());
                for node in nodes {
                    let separation =
                        angular_separation(planet.position.longitude, node.position.longitude);
                    if separation <= orb {
                        contacts.push(NodalContact {
                            planet_chart: planet_chart.role,
                            body: planet.position.body,
                            node_chart: node_chart.role,
                            node: node.position.body,
                            separation,
                        });
                    }
                }
            }
        }
    }
    contacts
}
