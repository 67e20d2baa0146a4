use itertools::Itertools;
use scalarbar_text::types::{TextAlign, VerticalAlign};

use super::{LabelExtent, LabelPlacer, LeaderPath, PlacementRecord, PlacerOutput};

/// Places labels along a horizontal bar.
///
/// The middle label is centered on its anchor. Labels to its left are left
/// justified and labels to its right are right justified, so text grows away
/// from the middle. A label that would collide with its neighbor toward the
/// middle is displaced away from the bar, and leader lines are broken around
/// any label they would otherwise cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPlacer {
    /// y of the top edge of the bar
    pub bar_y: f64,
    pub bar_height: f64,
    pub pad: f64,
    pub leader_pad: f64,
    /// Ticks precede the bar, so annotations are drawn above it
    pub precede: bool,
}

/// Working rectangle of a label with `y0` on the bar side
#[derive(Debug, Default, Clone, Copy)]
struct Slot {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    anchor_x: f64,
}

impl Slot {
    fn y_range(&self) -> (f64, f64) {
        (self.y0.min(self.y1), self.y0.max(self.y1))
    }

    fn collides(&self, other: &Slot) -> bool {
        let (a0, a1) = self.y_range();
        let (b0, b1) = other.y_range();
        self.x0 < other.x1 && other.x0 < self.x1 && a0 < b1 && b0 < a1
    }
}

impl HorizontalPlacer {
    fn dir(&self) -> f64 {
        if self.precede {
            1.0
        } else {
            -1.0
        }
    }

    /// Edge of the bar that leaders start from
    fn edge(&self) -> f64 {
        if self.precede {
            self.bar_y
        } else {
            self.bar_y - self.bar_height
        }
    }

    fn base_level(&self) -> f64 {
        self.edge() + self.dir() * (self.leader_pad + self.pad)
    }

    /// Indices in placement order: middle first, then alternating outward
    fn placement_order(n: usize) -> Vec<usize> {
        let ic = n / 2;
        let odd = n % 2 == 1;
        let rt = if odd { ic + 1 } else { ic };
        odd.then_some(ic)
            .into_iter()
            .chain((0..ic).rev().interleave(rt..n))
            .collect()
    }

    fn place_one(
        &self,
        i: usize,
        label: &LabelExtent,
        ctr: usize,
        slots: &[Option<Slot>],
        placed: &[usize],
    ) -> (Slot, TextAlign) {
        let dir = self.dir();
        let pad = self.pad;
        let xb = label.anchor;
        let wd = label.width;

        if placed.is_empty() || i == ctr {
            let y0 = self.base_level();
            let slot = Slot {
                x0: xb - wd / 2.0 - pad,
                x1: xb + wd / 2.0 + pad,
                y0,
                y1: y0 + dir * label.height,
                anchor_x: xb,
            };
            return (slot, TextAlign::Center);
        }

        let (mut slot, align, medial, displace) = if i > ctr {
            let medial = slots[i - 1];
            let slot = Slot {
                x0: xb - wd - 2.0 * pad,
                x1: xb,
                anchor_x: xb,
                ..Default::default()
            };
            let displace = medial.is_some_and(|m| xb - wd < m.x1);
            (slot, TextAlign::Right, medial, displace)
        } else {
            let medial = slots.get(i + 1).copied().flatten();
            let slot = Slot {
                x0: xb,
                x1: xb + wd + 2.0 * pad,
                anchor_x: xb,
                ..Default::default()
            };
            let displace = medial.is_some_and(|m| xb + wd > m.x0);
            (slot, TextAlign::Left, medial, displace)
        };

        slot.y0 = match (medial, displace) {
            (Some(m), true) => m.y1 + dir * pad,
            (Some(m), false) => m.y0,
            (None, _) => self.base_level(),
        };
        slot.y1 = slot.y0 + dir * label.height;

        // Push past anything already placed until the slot is clear. Every push
        // moves the slot strictly outward past one label, so this terminates.
        loop {
            let blocker = placed
                .iter()
                .filter_map(|&j| slots[j])
                .find(|other| slot.collides(other));
            match blocker {
                Some(other) => {
                    slot.y0 = other.y1 + dir * pad;
                    slot.y1 = slot.y0 + dir * label.height;
                }
                None => break,
            }
        }
        (slot, align)
    }

    /// Leader from the bar to label `idx`, broken around labels it passes under
    fn leader(&self, idx: usize, slots: &[Slot]) -> Vec<LeaderPath> {
        let dir = self.dir();
        let me = slots[idx];
        let ax = me.anchor_x;
        let mut blockers: Vec<&Slot> = slots
            .iter()
            .enumerate()
            .filter(|(j, other)| {
                *j != idx && ax > other.x0 && ax < other.x1 && dir * (me.y0 - other.y0) > 0.0
            })
            .map(|(_, other)| other)
            .collect();
        blockers.sort_by(|a, b| (dir * a.y0).total_cmp(&(dir * b.y0)));

        let mut paths = Vec::with_capacity(blockers.len() + 1);
        let mut from = self.edge() + dir * self.pad / 2.0;
        for other in blockers {
            paths.push(LeaderPath {
                label: idx,
                points: [[ax, from], [ax, other.y0]],
            });
            from = other.y1;
        }
        paths.push(LeaderPath {
            label: idx,
            points: [[ax, from], [ax, me.y0 - dir * self.pad / 2.0]],
        });
        paths
    }
}

impl LabelPlacer for HorizontalPlacer {
    fn place(&self, labels: &[LabelExtent]) -> PlacerOutput {
        let n = labels.len();
        if n == 0 {
            return PlacerOutput::default();
        }
        let ctr = if n % 2 == 1 { n / 2 } else { n / 2 - 1 };

        let mut slots: Vec<Option<Slot>> = vec![None; n];
        let mut aligns = vec![TextAlign::Center; n];
        let mut placed = Vec::with_capacity(n);
        for i in Self::placement_order(n) {
            let (slot, align) = self.place_one(i, &labels[i], ctr, &slots, &placed);
            slots[i] = Some(slot);
            aligns[i] = align;
            placed.push(i);
        }

        let slots: Vec<Slot> = slots.into_iter().flatten().collect();
        let vertical_align = if self.precede {
            VerticalAlign::Bottom
        } else {
            VerticalAlign::Top
        };
        let placements = slots
            .iter()
            .zip(aligns)
            .map(|(slot, justification)| {
                let (y0, y1) = slot.y_range();
                PlacementRecord {
                    bounds: [slot.x0, slot.x1, y0, y1],
                    justification,
                    vertical_align,
                    anchor: [slot.anchor_x, slot.y0],
                }
            })
            .collect();
        let leaders = (0..n).flat_map(|i| self.leader(i, &slots)).collect();

        PlacerOutput {
            placements,
            leaders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn placer(precede: bool) -> HorizontalPlacer {
        HorizontalPlacer {
            bar_y: 20.0,
            bar_height: 10.0,
            pad: 2.0,
            leader_pad: 8.0,
            precede,
        }
    }

    fn extents(anchors: &[f64], width: f64) -> Vec<LabelExtent> {
        anchors
            .iter()
            .map(|&anchor| LabelExtent {
                anchor,
                width,
                height: 10.0,
            })
            .collect()
    }

    fn overlaps(a: &PlacementRecord, b: &PlacementRecord) -> bool {
        a.bounds[0] < b.bounds[1]
            && b.bounds[0] < a.bounds[1]
            && a.bounds[2] < b.bounds[3]
            && b.bounds[2] < a.bounds[3]
    }

    #[test]
    fn test_placement_order() {
        assert_eq!(HorizontalPlacer::placement_order(5), vec![2, 1, 3, 0, 4]);
        assert_eq!(HorizontalPlacer::placement_order(4), vec![1, 2, 0, 3]);
        assert_eq!(HorizontalPlacer::placement_order(1), vec![0]);
    }

    #[test]
    fn test_sparse_labels_share_base_level() {
        let out = placer(true).place(&extents(&[5.0, 50.0, 95.0], 6.0));
        let aligns: Vec<_> = out.placements.iter().map(|p| p.justification).collect();
        assert_eq!(
            aligns,
            vec![TextAlign::Left, TextAlign::Center, TextAlign::Right]
        );
        for record in &out.placements {
            // bar top plus leader padding plus pad
            assert_approx_eq!(f64, record.anchor[1], 30.0);
            assert_eq!(record.vertical_align, VerticalAlign::Bottom);
        }
        assert_eq!(out.leaders.len(), 3);
        assert_eq!(out.leaders[1].points, [[50.0, 21.0], [50.0, 29.0]]);
    }

    #[test]
    fn test_labels_below_bar() {
        let out = placer(false).place(&extents(&[50.0], 6.0));
        let record = out.placements[0];
        // bar bottom is at 10
        assert_approx_eq!(f64, record.anchor[1], 0.0);
        assert_eq!(record.bounds[2..], [-10.0, 0.0]);
        assert_eq!(record.vertical_align, VerticalAlign::Top);
        assert_eq!(out.leaders[0].points, [[50.0, 9.0], [50.0, 1.0]]);
    }

    #[test]
    fn test_wide_labels_are_displaced_outward() {
        let anchors = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0];
        let out = placer(true).place(&extents(&anchors, 40.0));
        let places = &out.placements;

        for i in 0..places.len() {
            for j in (i + 1)..places.len() {
                assert!(!overlaps(&places[i], &places[j]), "{i} overlaps {j}");
            }
        }

        // the middle label stays on the base level
        assert_approx_eq!(f64, places[3].anchor[1], 30.0);
        let inner_max = [1, 2, 4, 5]
            .iter()
            .map(|&i| places[i].anchor[1])
            .fold(f64::MIN, f64::max);
        assert!(places[0].anchor[1] > inner_max);
        assert!(places[6].anchor[1] > inner_max);

        // the outermost leader is broken around the label it passes under
        let pieces = out.leaders.iter().filter(|l| l.label == 6).count();
        assert_eq!(pieces, 2);
    }
}
