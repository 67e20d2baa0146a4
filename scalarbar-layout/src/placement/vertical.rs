use itertools::Itertools;
use scalarbar_text::types::{TextAlign, VerticalAlign};

use super::{LabelExtent, LabelPlacer, LeaderPath, PlacementRecord, PlacerOutput};

/// Stacks labels beside a vertical bar.
///
/// Placement starts at the middle label (or middle pair) and alternates one
/// step down and one step up. Two running bounds track the lowest and highest
/// occupied y so far; a label whose natural position would cross the bound on
/// its side is pushed just past it. Bounds only ever grow outward, so placed
/// labels never overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalPlacer {
    /// x of the bar edge facing the labels
    pub bar_x: f64,
    pub bar_y: f64,
    pub bar_height: f64,
    pub pad: f64,
    pub leader_pad: f64,
    /// Ticks precede the bar, so annotations are drawn on its right
    pub precede: bool,
}

struct Sweep<'a> {
    placer: &'a VerticalPlacer,
    labels: &'a [LabelExtent],
    output: PlacerOutput,
    /// Lowest occupied y, extended by labels below the center
    dn_cum: f64,
    /// Highest occupied y, extended by labels above the center
    up_cum: f64,
}

impl Sweep<'_> {
    fn side(&self) -> f64 {
        if self.placer.precede {
            1.0
        } else {
            -1.0
        }
    }

    fn place(&mut self, j: usize, dir: i32) {
        let p = self.placer;
        let s = self.side();
        let label = self.labels[j];
        let hh = (label.height + p.pad) / 2.0;

        let mut ctr = label.anchor;
        if dir < 0 && ctr + hh > self.dn_cum {
            ctr = self.dn_cum - hh;
        } else if dir > 0 && ctr - hh < self.up_cum {
            ctr = self.up_cum + hh;
        }

        let xl0 = p.bar_x + s * p.pad / 2.0;
        let xl1 = p.bar_x + s * (p.pad / 2.0 + p.leader_pad);
        self.output.leaders.push(LeaderPath {
            label: j,
            points: [[xl0, label.anchor], [xl1, ctr]],
        });

        let text_x = p.bar_x + s * (p.pad + p.leader_pad);
        let (justification, x0, x1) = if p.precede {
            (TextAlign::Left, text_x, text_x + label.width)
        } else {
            (TextAlign::Right, text_x - label.width, text_x)
        };
        self.output.placements[j] = PlacementRecord {
            bounds: [x0, x1, ctr - hh, ctr + hh],
            justification,
            vertical_align: VerticalAlign::Center,
            anchor: [text_x, ctr],
        };

        self.up_cum = self.up_cum.max(ctr + hh);
        self.dn_cum = self.dn_cum.min(ctr - hh);
    }
}

impl LabelPlacer for VerticalPlacer {
    fn place(&self, labels: &[LabelExtent]) -> PlacerOutput {
        let n = labels.len();
        let mut sweep = Sweep {
            placer: self,
            labels,
            output: PlacerOutput {
                placements: vec![PlacementRecord::default(); n],
                leaders: Vec::with_capacity(n),
            },
            dn_cum: self.bar_y + self.bar_height,
            up_cum: self.bar_y,
        };
        if n == 0 {
            return sweep.output;
        }

        let ic = n / 2;
        let mut up = ic;
        if n % 2 == 1 {
            sweep.place(ic, 0);
            up = ic + 1;
        }
        let below = (0..ic).rev().map(|j| (j, -1));
        let above = (up..n).map(|j| (j, 1));
        for (j, dir) in below.interleave(above) {
            sweep.place(j, dir);
        }
        sweep.output
    }
}
