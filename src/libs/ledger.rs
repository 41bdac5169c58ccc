use std::collections::BTreeMap;

use crate::libs::segment::Segment;

/// Boundary events accumulated at a single locus.
#[derive(Debug, Clone, Default)]
pub struct LocusEvent {
    /// Segments starting exactly here
    pub begin_count: i32,
    /// Segments whose exclusive end is exactly here
    pub end_count: i32,
    /// Match names for the starting segments, in input order
    pub begin_identities: Vec<String>,
    /// Match names for the ending segments, in input order
    pub end_identities: Vec<String>,
    /// Active overlap from this locus up to the next recorded one;
    /// zero until [`LocusLedger::aggregate`] runs
    pub cumulative_overlap: i32,
}

/// The depth step function as (x, y) pairs, x in megabases.
///
/// Each flat stretch between consecutive boundary loci contributes two
/// points at the same height, so the series plots directly as a step line.
#[derive(Debug, Clone)]
pub struct StepSeries {
    pub points: Vec<(f64, f64)>,
    /// Width-weighted mean depth over the covered domain
    pub average: f64,
}

const BASES_PER_MEGABASE: f64 = 1_000_000.0;

/// Per-chromosome ledger of segment boundary events, keyed by locus.
///
/// The map only ever holds loci that are a begin- or end-point of an
/// accepted segment, and iterates them in ascending numeric order, so the
/// sweep visits compressed coordinates and nothing else.
///
/// ```
/// # use segpile::libs::ledger::LocusLedger;
/// # use segpile::libs::segment::Segment;
/// let mut ledger = LocusLedger::new(1, 0.0);
/// ledger.register(&Segment::new(1, 100, 200, "Alice", 7.5).unwrap());
/// ledger.register(&Segment::new(1, 150, 250, "Bob", 5.2).unwrap());
/// ledger.aggregate();
///
/// let depths: Vec<(i64, i32)> = ledger
///     .iter()
///     .map(|(locus, event)| (locus, event.cumulative_overlap))
///     .collect();
/// assert_eq!(depths, vec![(100, 1), (150, 2), (200, 1), (250, 0)]);
/// ```
#[derive(Debug, Clone)]
pub struct LocusLedger {
    chromosome: i32,
    min_strength: f64,
    events: BTreeMap<i64, LocusEvent>,
}

impl LocusLedger {
    /// A fresh ledger for one chromosome/threshold selection. Ledgers are
    /// single-use; a different selection needs a new one.
    pub fn new(chromosome: i32, min_strength: f64) -> Self {
        Self {
            chromosome,
            min_strength,
            events: BTreeMap::new(),
        }
    }

    pub fn chromosome(&self) -> i32 {
        self.chromosome
    }

    /// Number of distinct boundary loci recorded so far
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fold one segment into the ledger.
    ///
    /// Segments on another chromosome, or below the centimorgan threshold,
    /// are deliberate no-ops; returns whether the segment was taken.
    pub fn register(&mut self, segment: &Segment) -> bool {
        if segment.chromosome != self.chromosome {
            return false;
        }
        if segment.strength < self.min_strength {
            return false;
        }

        let begin = self.events.entry(segment.begin).or_default();
        begin.begin_count += 1;
        begin.begin_identities.push(segment.identity.clone());

        let end = self.events.entry(segment.end).or_default();
        end.end_count += 1;
        end.end_identities.push(segment.identity.clone());

        true
    }

    /// Sweep the recorded loci in ascending order and store the running
    /// overlap count at each one.
    ///
    /// A segment's end locus is where it stops counting: the stored depth at
    /// locus L covers `[L, next_locus - 1]`. Recomputes from the event
    /// counts alone, so calling this again changes nothing.
    pub fn aggregate(&mut self) {
        let mut depth = 0;
        for event in self.events.values_mut() {
            depth += event.begin_count - event.end_count;
            event.cumulative_overlap = depth;
        }
    }

    /// Recorded loci with their events, in ascending locus order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &LocusEvent)> {
        self.events.iter().map(|(locus, event)| (*locus, event))
    }

    /// Build the plottable step series from the aggregated depths.
    ///
    /// Between consecutive loci (prev, curr) the depth at prev holds from
    /// prev through curr - 1; both x-values are emitted at that height. The
    /// average weights each stretch by its width in bases. Returns `None`
    /// below two distinct loci, where no stretch exists and the average is
    /// undefined.
    pub fn step_series(&self) -> Option<StepSeries> {
        if self.events.len() < 2 {
            return None;
        }

        let mut points = Vec::with_capacity(2 * (self.events.len() - 1));
        let mut total_width: i64 = 0;
        let mut weighted_sum: i64 = 0;

        let mut prev: Option<(i64, i32)> = None;
        for (&locus, event) in &self.events {
            if let Some((prev_locus, prev_depth)) = prev {
                points.push((prev_locus as f64 / BASES_PER_MEGABASE, prev_depth as f64));
                points.push(((locus - 1) as f64 / BASES_PER_MEGABASE, prev_depth as f64));

                let width = locus - prev_locus;
                total_width += width;
                weighted_sum += width * prev_depth as i64;
            }
            prev = Some((locus, event.cumulative_overlap));
        }

        Some(StepSeries {
            points,
            average: weighted_sum as f64 / total_width as f64,
        })
    }
}
