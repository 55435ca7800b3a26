use courtside_api::MatchId;
use serde::Serialize;

use super::RoundInput;
use super::order::display_label;

// ---------------------------------------------------------------------------
// Layout constants (abstract units; 1 unit = 1 px in the reference layout)
// ---------------------------------------------------------------------------

/// Fixed height of the bracket container.
pub const CONTAINER_HEIGHT: f64 = 1000.0;

/// Assumed height of one match box.
pub const MATCH_HEIGHT: f64 = 85.0;

/// Horizontal gap between round columns.
pub const COLUMN_GAP: f64 = 20.0;

/// Columns never shrink below this; the bracket overflows instead.
pub const MIN_COLUMN_WIDTH: f64 = 220.0;

/// Number of distinct round accent colors; later rounds reuse the last one.
pub const ACCENT_COUNT: usize = 6;

// ---------------------------------------------------------------------------
// Output model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxRect {
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Visual emphasis derived from the round heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    #[default]
    Standard,
    Final,
    ThirdPlace,
}

impl Emphasis {
    /// Case-sensitive substring match, so "Semifinals" stays standard.
    pub fn for_label(label: Option<&str>) -> Self {
        match label {
            Some(l) if l.contains("Final") => Emphasis::Final,
            Some(l) if l.contains("3rd Place") => Emphasis::ThirdPlace,
            _ => Emphasis::Standard,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundColumn {
    pub index: usize,
    pub label: String,
    pub x: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchBox {
    pub id: MatchId,
    pub round: usize,
    pub index: usize,
    /// Position in an idealized, fully populated bracket. Not used for placement.
    pub bracket_slot: u64,
    pub rect: BoxRect,
    /// Index into the round accent palette.
    pub accent: usize,
    pub emphasis: Emphasis,
}

/// Cubic connector from a match's right edge to the left edge of the match it feeds.
#[derive(Debug, Clone, Serialize)]
pub struct Connector {
    pub from: MatchId,
    pub to: MatchId,
    pub start: Point,
    pub end: Point,
    pub control: [Point; 2],
    /// SVG path data, e.g. `M 100 50 C 120 50, 120 90, 140 90`.
    pub path: String,
}

impl Connector {
    /// S-curve with both control points on the horizontal midpoint.
    pub fn between(from: MatchId, to: MatchId, start: Point, end: Point) -> Self {
        let control_x = start.x + (end.x - start.x) / 2.0;
        let control = [Point::new(control_x, start.y), Point::new(control_x, end.y)];
        let path = format!(
            "M {} {} C {} {}, {} {}, {} {}",
            start.x, start.y, control[0].x, control[0].y, control[1].x, control[1].y, end.x, end.y
        );
        Self { from, to, start, end, control, path }
    }

    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let [c1, c2] = self.control;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * self.start.x + b * c1.x + c * c2.x + d * self.end.x,
            a * self.start.y + b * c1.y + c * c2.y + d * self.end.y,
        )
    }

    /// Polyline approximation with `segments` straight pieces.
    pub fn sample(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DesktopLayout {
    pub width: f64,
    pub height: f64,
    pub columns: Vec<RoundColumn>,
    pub matches: Vec<MatchBox>,
    pub connectors: Vec<Connector>,
}

impl DesktopLayout {
    pub fn find(&self, id: &MatchId) -> Option<&MatchBox> {
        self.matches.iter().find(|m| &m.id == id)
    }
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// `match_index × 2^(total_rounds − round_index − 1)`, saturating.
pub fn bracket_slot(round_index: usize, match_index: usize, total_rounds: usize) -> u64 {
    let depth = total_rounds.saturating_sub(round_index + 1);
    let scale = u32::try_from(depth)
        .ok()
        .and_then(|d| 1u64.checked_shl(d))
        .unwrap_or(u64::MAX);
    (match_index as u64).saturating_mul(scale)
}

/// Tops of `count` evenly spaced matches; the `count + 1` gaps are equal.
pub fn first_round_tops(count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f64;
    let spacing = (CONTAINER_HEIGHT - n * MATCH_HEIGHT) / (n + 1.0);
    (0..count)
        .map(|k| spacing + k as f64 * (MATCH_HEIGHT + spacing))
        .collect()
}

/// Center of match `k` from the centers of its feeders `2k` and `2k + 1`.
/// A missing first feeder counts as the top edge, a missing second as the bottom.
pub fn child_center(parent_centers: &[f64], k: usize) -> f64 {
    let upper = parent_centers.get(2 * k).copied().unwrap_or(0.0);
    let lower = parent_centers.get(2 * k + 1).copied().unwrap_or(CONTAINER_HEIGHT);
    (upper + lower) / 2.0
}

/// Vertical centers per round. A round with no matches, or whose previous
/// round was not placed, gets an empty vector and is skipped.
pub fn vertical_centers(round_sizes: &[usize]) -> Vec<Vec<f64>> {
    let mut centers: Vec<Vec<f64>> = Vec::with_capacity(round_sizes.len());
    for (i, &count) in round_sizes.iter().enumerate() {
        let placed = if i == 0 {
            first_round_tops(count)
                .into_iter()
                .map(|top| top + MATCH_HEIGHT / 2.0)
                .collect()
        } else {
            let parents = &centers[i - 1];
            if count == 0 || parents.is_empty() {
                Vec::new()
            } else {
                (0..count).map(|k| child_center(parents, k)).collect()
            }
        };
        centers.push(placed);
    }
    centers
}

/// `(x, width)` of each round column for the given container width.
pub fn column_geometry(round_count: usize, container_width: f64) -> Vec<(f64, f64)> {
    if round_count == 0 {
        return Vec::new();
    }
    let n = round_count as f64;
    let width = ((container_width - COLUMN_GAP * (n - 1.0)) / n).max(MIN_COLUMN_WIDTH);
    (0..round_count)
        .map(|i| (i as f64 * (width + COLUMN_GAP), width))
        .collect()
}

/// Full desktop pass: columns, positioned match boxes and connectors.
/// Everything is rebuilt from the round structure; nothing is carried over.
pub fn desktop_layout(rounds: &[RoundInput], container_width: f64) -> DesktopLayout {
    let total_rounds = rounds.len();
    let geometry = column_geometry(total_rounds, container_width);
    let sizes: Vec<usize> = rounds.iter().map(|r| r.matches.len()).collect();
    let centers = vertical_centers(&sizes);

    let columns: Vec<RoundColumn> = rounds
        .iter()
        .zip(&geometry)
        .enumerate()
        .map(|(index, (round, &(x, width)))| RoundColumn {
            index,
            label: display_label(round.label.as_deref(), index),
            x,
            width,
        })
        .collect();

    let mut matches = Vec::with_capacity(sizes.iter().sum());
    for (round_index, round) in rounds.iter().enumerate() {
        let round_centers = &centers[round_index];
        if round_centers.is_empty() {
            continue;
        }
        let (x, width) = geometry[round_index];
        let emphasis = Emphasis::for_label(round.label.as_deref());
        for (index, (id, &center)) in round.matches.iter().zip(round_centers).enumerate() {
            matches.push(MatchBox {
                id: id.clone(),
                round: round_index,
                index,
                bracket_slot: bracket_slot(round_index, index, total_rounds),
                rect: BoxRect { x, y: center - MATCH_HEIGHT / 2.0, width, height: MATCH_HEIGHT },
                accent: round_index.min(ACCENT_COUNT - 1),
                emphasis,
            });
        }
    }

    let connectors = build_connectors(rounds, &centers, &geometry);
    let width = geometry.last().map(|&(x, w)| x + w).unwrap_or(0.0);

    DesktopLayout { width, height: CONTAINER_HEIGHT, columns, matches, connectors }
}

fn build_connectors(
    rounds: &[RoundInput],
    centers: &[Vec<f64>],
    geometry: &[(f64, f64)],
) -> Vec<Connector> {
    let mut connectors = Vec::new();
    if rounds.len() <= 1 {
        return connectors;
    }
    for i in 0..rounds.len() - 1 {
        let (current, next) = (&centers[i], &centers[i + 1]);
        if current.is_empty() || next.is_empty() {
            continue;
        }
        let (x, width) = geometry[i];
        let (next_x, _) = geometry[i + 1];
        for (k, (from, &y1)) in rounds[i].matches.iter().zip(current).enumerate() {
            let target = k / 2;
            let (Some(to), Some(&y2)) = (rounds[i + 1].matches.get(target), next.get(target)) else {
                continue;
            };
            connectors.push(Connector::between(
                from.clone(),
                to.clone(),
                Point::new(x + width, y1),
                Point::new(next_x, y2),
            ));
        }
    }
    connectors
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const EPS: f64 = 1e-9;

    fn rounds_of(sizes: &[usize]) -> Vec<RoundInput> {
        sizes
            .iter()
            .enumerate()
            .map(|(r, &n)| RoundInput {
                label: None,
                matches: (0..n).map(|k| MatchId::new(format!("r{r}m{k}"))).collect(),
            })
            .collect()
    }

    #[test]
    fn bracket_slot_scales_by_remaining_depth() {
        // 4 rounds: round 0 slots step by 8, the final sits at 0.
        assert_eq!(bracket_slot(0, 3, 4), 24);
        assert_eq!(bracket_slot(1, 3, 4), 12);
        assert_eq!(bracket_slot(2, 1, 4), 2);
        assert_eq!(bracket_slot(3, 0, 4), 0);
    }

    #[test]
    fn bracket_slot_saturates_on_absurd_depth() {
        assert_eq!(bracket_slot(0, 2, 200), u64::MAX);
    }

    #[test]
    fn first_round_gaps_are_uniform_and_fill_the_container() {
        let tops = first_round_tops(8);
        let spacing = tops[0];
        for pair in tops.windows(2) {
            let gap = pair[1] - (pair[0] + MATCH_HEIGHT);
            assert!((gap - spacing).abs() < EPS, "gap {gap} != {spacing}");
        }
        let bottom_gap = CONTAINER_HEIGHT - (tops[7] + MATCH_HEIGHT);
        assert!((bottom_gap - spacing).abs() < EPS);
        let total = 8.0 * MATCH_HEIGHT + 9.0 * spacing;
        assert!((total - CONTAINER_HEIGHT).abs() < EPS);
    }

    #[test]
    fn single_match_round_is_centered() {
        let tops = first_round_tops(1);
        assert!((tops[0] + MATCH_HEIGHT / 2.0 - CONTAINER_HEIGHT / 2.0).abs() < EPS);
    }

    #[test]
    fn later_rounds_sit_at_parent_midpoints() {
        let centers = vertical_centers(&[8, 4, 2, 1]);
        for i in 1..centers.len() {
            for (k, &c) in centers[i].iter().enumerate() {
                let expected = (centers[i - 1][2 * k] + centers[i - 1][2 * k + 1]) / 2.0;
                assert!((c - expected).abs() < EPS, "round {i} match {k}");
            }
        }
        // A balanced bracket converges on the container's middle.
        assert!((centers[3][0] - CONTAINER_HEIGHT / 2.0).abs() < EPS);
    }

    #[test]
    fn missing_second_parent_defaults_to_bottom_edge() {
        let parents = [100.0, 300.0, 500.0];
        assert!((child_center(&parents, 1) - (500.0 + CONTAINER_HEIGHT) / 2.0).abs() < EPS);
    }

    #[test]
    fn missing_both_parents_defaults_to_middle() {
        let parents = [100.0];
        assert!((child_center(&parents, 3) - CONTAINER_HEIGHT / 2.0).abs() < EPS);
    }

    #[test]
    fn empty_round_short_circuits_later_rounds() {
        let centers = vertical_centers(&[4, 0, 1]);
        assert_eq!(centers[0].len(), 4);
        assert!(centers[1].is_empty());
        assert!(centers[2].is_empty());

        let layout = desktop_layout(&rounds_of(&[4, 0, 1]), 1200.0);
        assert_eq!(layout.matches.len(), 4);
        assert!(layout.connectors.is_empty());
    }

    #[test]
    fn empty_first_round_places_nothing() {
        let layout = desktop_layout(&rounds_of(&[0, 2, 1]), 1200.0);
        assert!(layout.matches.is_empty());
        assert!(layout.connectors.is_empty());
        assert_eq!(layout.columns.len(), 3);
    }

    #[test]
    fn columns_share_width_with_a_minimum() {
        let cols = column_geometry(4, 1200.0);
        assert!((cols[0].1 - 285.0).abs() < EPS);
        assert!((cols[1].0 - 305.0).abs() < EPS);

        let narrow = column_geometry(6, 800.0);
        assert!(narrow.iter().all(|&(_, w)| (w - MIN_COLUMN_WIDTH).abs() < EPS));
        assert!(column_geometry(0, 800.0).is_empty());
    }

    #[test]
    fn connectors_map_each_match_to_floor_half() {
        let rounds = rounds_of(&[8, 4, 2, 1]);
        let layout = desktop_layout(&rounds, 1200.0);
        assert_eq!(layout.connectors.len(), 8 + 4 + 2);

        let mut outgoing: HashMap<&MatchId, usize> = HashMap::new();
        let mut incoming: HashMap<&MatchId, usize> = HashMap::new();
        for c in &layout.connectors {
            *outgoing.entry(&c.from).or_default() += 1;
            *incoming.entry(&c.to).or_default() += 1;
        }

        for (i, round) in rounds.iter().enumerate() {
            for (k, id) in round.matches.iter().enumerate() {
                let out = outgoing.get(id).copied().unwrap_or(0);
                if i + 1 < rounds.len() {
                    assert_eq!(out, 1, "{id} should feed exactly one match");
                    let c = layout.connectors.iter().find(|c| &c.from == id).unwrap();
                    assert_eq!(c.to, rounds[i + 1].matches[k / 2]);
                } else {
                    assert_eq!(out, 0, "final-round match {id} feeds nothing");
                }
                let inc = incoming.get(id).copied().unwrap_or(0);
                if i == 0 {
                    assert_eq!(inc, 0);
                } else {
                    // Every later match is fed by exactly its two feeders.
                    assert_eq!(inc, 2, "{id} should have two feeders");
                }
            }
        }
    }

    #[test]
    fn connector_anchors_on_box_edges() {
        let layout = desktop_layout(&rounds_of(&[2, 1]), 1000.0);
        let from = layout.find(&MatchId::from("r0m1")).unwrap();
        let to = layout.find(&MatchId::from("r1m0")).unwrap();
        let c = layout.connectors.iter().find(|c| c.from == from.id).unwrap();
        assert_eq!(c.start, Point::new(from.rect.x + from.rect.width, from.rect.center_y()));
        assert_eq!(c.end, Point::new(to.rect.x, to.rect.center_y()));
        assert!((c.control[0].x - (c.start.x + c.end.x) / 2.0).abs() < EPS);
        assert_eq!(c.control[0].y, c.start.y);
        assert_eq!(c.control[1].y, c.end.y);
    }

    #[test]
    fn connector_path_data_is_a_cubic_s_curve() {
        let c = Connector::between(
            MatchId::from("a"),
            MatchId::from("b"),
            Point::new(100.0, 50.0),
            Point::new(140.0, 90.0),
        );
        assert_eq!(c.path, "M 100 50 C 120 50, 120 90, 140 90");
    }

    #[test]
    fn sampled_curve_hits_both_endpoints() {
        let c = Connector::between(
            MatchId::from("a"),
            MatchId::from("b"),
            Point::new(0.0, 0.0),
            Point::new(20.0, 40.0),
        );
        let pts = c.sample(8);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], c.start);
        assert!((pts[8].x - 20.0).abs() < EPS && (pts[8].y - 40.0).abs() < EPS);
        // Midpoint of a symmetric S-curve is the segment midpoint.
        assert!((pts[4].x - 10.0).abs() < EPS && (pts[4].y - 20.0).abs() < EPS);
    }

    #[test]
    fn boxes_carry_slot_accent_and_emphasis() {
        let mut rounds = rounds_of(&[2, 1]);
        rounds[1].label = Some("Final".into());
        let layout = desktop_layout(&rounds, 1000.0);
        let second = layout.find(&MatchId::from("r0m1")).unwrap();
        assert_eq!(second.bracket_slot, 2);
        assert_eq!(second.accent, 0);
        assert_eq!(second.emphasis, Emphasis::Standard);
        let last = layout.find(&MatchId::from("r1m0")).unwrap();
        assert_eq!(last.accent, 1);
        assert_eq!(last.emphasis, Emphasis::Final);
    }

    #[test]
    fn emphasis_is_case_sensitive() {
        assert_eq!(Emphasis::for_label(Some("Final")), Emphasis::Final);
        assert_eq!(Emphasis::for_label(Some("Semifinals")), Emphasis::Standard);
        assert_eq!(Emphasis::for_label(Some("3rd Place Match")), Emphasis::ThirdPlace);
        assert_eq!(Emphasis::for_label(None), Emphasis::Standard);
    }
}
