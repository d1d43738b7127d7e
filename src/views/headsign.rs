use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::RoutePattern;

/// The representative headsign for one direction of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionSummary {
    pub direction_id: u8,
    pub headsign: String,
}

/// Picks the most frequent headsign for every direction present in `patterns`.
///
/// Patterns without a direction or with a blank headsign are ignored.
/// Headsigns are compared after trimming. When two headsigns tie, the one seen
/// first in `patterns` wins. The result is ordered by direction id.
pub fn resolve_directions(patterns: &[RoutePattern]) -> Vec<DirectionSummary> {
    // Per direction, headsign counts in first-seen order.
    let mut grouped: BTreeMap<u8, Vec<(&str, usize)>> = BTreeMap::new();

    for pattern in patterns {
        let attrs = &pattern.attributes;
        let Some(direction_id) = attrs.direction_id else {
            continue;
        };
        let headsign = attrs.direction_headsign.as_deref().unwrap_or("").trim();
        if headsign.is_empty() {
            continue;
        }

        let counts = grouped.entry(direction_id).or_default();
        match counts.iter_mut().find(|(seen, _)| *seen == headsign) {
            Some((_, count)) => *count += 1,
            None => counts.push((headsign, 1)),
        }
    }

    grouped
        .into_iter()
        .filter_map(|(direction_id, counts)| {
            let mut best: Option<(&str, usize)> = None;
            for (headsign, count) in counts {
                // strict `>` keeps the earliest headsign on ties
                if best.is_none_or(|(_, best_count)| count > best_count) {
                    best = Some((headsign, count));
                }
            }
            best.map(|(headsign, _)| DirectionSummary {
                direction_id,
                headsign: headsign.to_string(),
            })
        })
        .collect()
}
