use thiserror::Error;

/// Fatal defects in a match-segment record.
///
/// Records with an unexpected field count are tolerated (header rows look
/// like that), but numeric garbage and nonsensical intervals abort the run.
#[derive(Error, Debug, PartialEq)]
pub enum SegmentError {
    #[error("corrupt input: {field} is not numeric: {text:?}")]
    Corrupt { field: &'static str, text: String },
    #[error("negative coordinate: {0}")]
    NegativeCoordinate(i64),
    #[error("inverted interval: begin {begin} > end {end}")]
    InvertedInterval { begin: i64, end: i64 },
}

/// One DNA match interval on a chromosome.
///
/// Coordinates are base pairs. `end` is one past the last covered base, so
/// the segment covers `[begin, end)`.
#[derive(Debug, Clone, Default)]
pub struct Segment {
    pub chromosome: i32,
    pub begin: i64,
    pub end: i64,
    pub identity: String,
    /// Shared centimorgans; 0.0 when the source field is empty
    pub strength: f64,
}

/// Well-formed rows of the observed export carry exactly this many fields
const FIELDS_PER_RECORD: usize = 10;

impl Segment {
    /// Build a validated segment.
    ///
    /// ```
    /// # use segpile::libs::segment::Segment;
    /// let seg = Segment::new(1, 100, 200, "Alice Example", 7.5).unwrap();
    /// # assert_eq!(seg.begin, 100);
    /// # assert_eq!(seg.end, 200);
    /// ```
    pub fn new(
        chromosome: i32,
        begin: i64,
        end: i64,
        identity: &str,
        strength: f64,
    ) -> Result<Self, SegmentError> {
        if begin < 0 {
            return Err(SegmentError::NegativeCoordinate(begin));
        }
        if end < 0 {
            return Err(SegmentError::NegativeCoordinate(end));
        }
        if begin > end {
            return Err(SegmentError::InvertedInterval { begin, end });
        }

        Ok(Self {
            chromosome,
            begin,
            end,
            identity: identity.to_string(),
            strength,
        })
    }

    /// Extract a segment from one record of a match-segment CSV export.
    ///
    /// Expects the 10-field layout: match name at index 2, chromosome at 3,
    /// begin at 4, end at 5, centimorgans at 8. Any other field count yields
    /// `Ok(None)`, which skips header rows and truncated lines alike.
    ///
    /// ```
    /// # use segpile::libs::segment::Segment;
    /// let rec = csv::StringRecord::from(vec![
    ///     "A1B2", "Tester", "Alice Example", "1", "100", "200",
    ///     "rs101", "rs102", "7.5", "500",
    /// ]);
    /// let seg = Segment::from_record(&rec).unwrap().unwrap();
    /// assert_eq!(seg.identity, "Alice Example");
    /// assert_eq!(seg.chromosome, 1);
    /// # assert_eq!(seg.strength, 7.5);
    /// ```
    pub fn from_record(record: &csv::StringRecord) -> Result<Option<Self>, SegmentError> {
        if record.len() != FIELDS_PER_RECORD {
            return Ok(None);
        }

        let identity = record.get(2).unwrap_or_default();
        let chromosome = parse_field::<i32>("chromosome", record.get(3).unwrap_or_default())?;
        let begin = parse_field::<i64>("begin locus", record.get(4).unwrap_or_default())?;
        let end = parse_field::<i64>("end locus", record.get(5).unwrap_or_default())?;

        // An absent centimorgan value admits the segment under any zero threshold
        let cm_text = record.get(8).unwrap_or_default().trim();
        let strength = if cm_text.is_empty() {
            0.0
        } else {
            parse_field::<f64>("centimorgans", cm_text)?
        };

        Self::new(chromosome, begin, end, identity, strength).map(Some)
    }
}

fn parse_field<T: std::str::FromStr>(
    field: &'static str,
    text: &str,
) -> Result<T, SegmentError> {
    text.trim().parse::<T>().map_err(|_| SegmentError::Corrupt {
        field,
        text: text.to_string(),
    })
}
