//! Track preview and targets panel
//!
//! Before each session the camera tours every terrain patch and collectible
//! in track order. Hazards and rare items get a longer look.

use serde::{Deserialize, Serialize};

use super::state::{Collectible, PreviewBadge, PreviewTarget, TerrainKind, TerrainSegment};
use crate::consts::{PREVIEW_LEAD_IN_MS, PREVIEW_TAIL_MS};
use crate::px_to_label_meters;

/// One camera stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewStop {
    pub position: f32,
    pub meters: i32,
    pub target: PreviewTarget,
    pub badge: PreviewBadge,
    /// 3 = rare collectible, 2 = lava, 1 = everything else
    pub priority: u8,
    /// When the stop is shown, from the start of the preview
    pub at_ms: u32,
}

impl PreviewStop {
    /// How long the camera lingers here
    pub fn dwell_ms(&self) -> u32 {
        match self.priority {
            3 => 1500,
            2 => 1200,
            _ => 1000,
        }
    }

    pub fn label(&self) -> String {
        match self.target {
            PreviewTarget::Terrain { kind, .. } => format!("{} @ {}m", kind.as_str(), self.meters),
            PreviewTarget::Collectible { rare: true, .. } => format!("SECRET @ {}m!", self.meters),
            PreviewTarget::Collectible { rare: false, .. } => {
                format!("Collectible @ {}m", self.meters)
            }
        }
    }
}

/// Timed tour over the session's points of interest
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSequence {
    pub stops: Vec<PreviewStop>,
    pub total_ms: u32,
    elapsed_ms: u32,
    next_stop: usize,
}

impl PreviewSequence {
    pub fn new(terrains: &[TerrainSegment], collectibles: &[Collectible]) -> Self {
        let terrain_stops = terrains.iter().map(|t| {
            let lava = t.kind == TerrainKind::Lava;
            (
                t.midpoint(),
                t.start,
                PreviewTarget::Terrain {
                    id: t.id,
                    kind: t.kind,
                },
                if lava { PreviewBadge::Danger } else { PreviewBadge::Preview },
                if lava { 2 } else { 1 },
            )
        });
        let collectible_stops = collectibles.iter().map(|c| {
            (
                c.position,
                c.position,
                PreviewTarget::Collectible {
                    id: c.id,
                    rare: c.is_rare,
                },
                if c.is_rare { PreviewBadge::Secret } else { PreviewBadge::Preview },
                if c.is_rare { 3 } else { 1 },
            )
        });

        let mut stops: Vec<PreviewStop> = terrain_stops
            .chain(collectible_stops)
            .map(|(position, label_px, target, badge, priority)| PreviewStop {
                position,
                meters: px_to_label_meters(label_px),
                target,
                badge,
                priority,
                at_ms: 0,
            })
            .collect();
        // Stable: terrain before collectible at the same spot
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));

        let mut at = PREVIEW_LEAD_IN_MS;
        for stop in &mut stops {
            stop.at_ms = at;
            at += stop.dwell_ms();
        }

        Self {
            stops,
            total_ms: at + PREVIEW_TAIL_MS,
            elapsed_ms: 0,
            next_stop: 0,
        }
    }

    /// Advance the tour; returns the stops reached during this step
    pub fn advance(&mut self, dt_ms: u32) -> Vec<PreviewStop> {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.total_ms);
        let mut reached = Vec::new();
        while let Some(stop) = self.stops.get(self.next_stop) {
            if stop.at_ms > self.elapsed_ms {
                break;
            }
            reached.push(stop.clone());
            self.next_stop += 1;
        }
        reached
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.total_ms
    }
}

/// An item in the targets panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleTarget {
    pub meters: i32,
    pub rare: bool,
}

/// Persistent panel listing what lies ahead
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSummary {
    /// Sorted by distance
    pub collectibles: Vec<CollectibleTarget>,
    /// `(start, end)` meters, track order
    pub ice: Vec<(i32, i32)>,
    pub lava: Vec<(i32, i32)>,
}

impl TargetSummary {
    pub fn build(terrains: &[TerrainSegment], collectibles: &[Collectible]) -> Self {
        let mut items: Vec<CollectibleTarget> = collectibles
            .iter()
            .map(|c| CollectibleTarget {
                meters: px_to_label_meters(c.position),
                rare: c.is_rare,
            })
            .collect();
        items.sort_by_key(|c| c.meters);

        let ranges = |kind: TerrainKind| -> Vec<(i32, i32)> {
            terrains
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| (px_to_label_meters(t.start), px_to_label_meters(t.end)))
                .collect()
        };

        Self {
            collectibles: items,
            ice: ranges(TerrainKind::Ice),
            lava: ranges(TerrainKind::Lava),
        }
    }

    /// Plain-text rendering, one line per group; empty groups are skipped
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec!["Targets:".to_string()];
        if !self.collectibles.is_empty() {
            let parts: Vec<String> = self
                .collectibles
                .iter()
                .map(|c| if c.rare { format!("{}m*", c.meters) } else { format!("{}m", c.meters) })
                .collect();
            lines.push(format!("Collectibles: {}", parts.join(", ")));
        }
        let fmt_ranges = |ranges: &[(i32, i32)]| {
            ranges
                .iter()
                .map(|(s, e)| format!("{s}-{e}m"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        if !self.ice.is_empty() {
            lines.push(format!("Ice: {}", fmt_ranges(&self.ice)));
        }
        if !self.lava.is_empty() {
            lines.push(format!("Lava: {}", fmt_ranges(&self.lava)));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ColorTag;

    fn track() -> (Vec<TerrainSegment>, Vec<Collectible>) {
        let terrains = vec![
            TerrainSegment::new(1, TerrainKind::Ice, 200.0, 200.0),
            TerrainSegment::new(2, TerrainKind::Lava, 800.0, 160.0),
        ];
        let collectibles = vec![
            Collectible::new(3, 1250.0, ColorTag::Black),
            Collectible::new(4, 260.0, ColorTag::Green),
        ];
        (terrains, collectibles)
    }

    #[test]
    fn test_stops_sorted_and_timed() {
        let (terrains, collectibles) = track();
        let preview = PreviewSequence::new(&terrains, &collectibles);
        let positions: Vec<f32> = preview.stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![260.0, 300.0, 880.0, 1250.0]);

        let at: Vec<u32> = preview.stops.iter().map(|s| s.at_ms).collect();
        assert_eq!(at, vec![800, 1800, 2800, 4000]);
        // 800 lead-in + 1000 + 1000 + 1200 + 1500 + 500 tail
        assert_eq!(preview.total_ms, 6000);

        assert_eq!(preview.stops[2].badge, PreviewBadge::Danger);
        assert_eq!(preview.stops[3].badge, PreviewBadge::Secret);
        assert_eq!(preview.stops[1].label(), "Ice @ 5m");
        assert_eq!(preview.stops[3].label(), "SECRET @ 40m!");
    }

    #[test]
    fn test_advance_emits_each_stop_once() {
        let (terrains, collectibles) = track();
        let mut preview = PreviewSequence::new(&terrains, &collectibles);
        let mut seen = Vec::new();
        while !preview.is_finished() {
            seen.extend(preview.advance(10));
        }
        assert_eq!(seen.len(), 4);
        assert!(preview.advance(10).is_empty());
    }

    #[test]
    fn test_large_step_reaches_everything() {
        let (terrains, collectibles) = track();
        let mut preview = PreviewSequence::new(&terrains, &collectibles);
        assert_eq!(preview.advance(u32::MAX).len(), 4);
        assert!(preview.is_finished());
    }

    #[test]
    fn test_empty_track_preview() {
        let preview = PreviewSequence::new(&[], &[]);
        assert_eq!(preview.total_ms, PREVIEW_LEAD_IN_MS + PREVIEW_TAIL_MS);
    }

    #[test]
    fn test_target_summary() {
        let (terrains, collectibles) = track();
        let summary = TargetSummary::build(&terrains, &collectibles);
        assert_eq!(
            summary.collectibles,
            vec![
                CollectibleTarget { meters: 7, rare: false },
                CollectibleTarget { meters: 40, rare: true },
            ]
        );
        assert_eq!(summary.ice, vec![(5, 12)]);
        assert_eq!(summary.lava, vec![(25, 30)]);
        assert_eq!(
            summary.lines(),
            vec![
                "Targets:".to_string(),
                "Collectibles: 7m, 40m*".to_string(),
                "Ice: 5-12m".to_string(),
                "Lava: 25-30m".to_string(),
            ]
        );
    }
}
