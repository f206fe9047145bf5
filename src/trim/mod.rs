//! Frame-indexed trim ranges and their resolution against a source

use crate::error::{AudioCutError, AudioCutResult};
use crate::utils::frames::FrameRate;

pub mod cutter;
pub mod parser;

pub use cutter::{cut_tracks, CutOutput};
pub use parser::parse_trim_list;

/// A single trim expressed in frame numbers.
///
/// Either endpoint may be omitted (start of file / end of file) or negative
/// (counted back from the end of file).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TrimRange {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// Resolve the endpoints to absolute frame numbers.
    ///
    /// `None` maps to the file boundary, negative values count back from the
    /// end, and a positive end is decremented by one (the trim convention
    /// this tool has always used).
    pub fn resolve(&self, frame_count: u64) -> AudioCutResult<(u64, u64)> {
        let total = frame_count as i64;

        let start = match self.start {
            None => 0,
            Some(s) if s < 0 => total + s,
            Some(s) => s,
        };
        let end = match self.end {
            None => total,
            Some(e) if e < 0 => total + e,
            Some(e) => e - 1,
        };

        if start < 0 || end < 0 || start > total || end > total {
            return Err(AudioCutError::TrimOutOfRange {
                start,
                end,
                frame_count,
            });
        }
        if start >= end {
            return Err(AudioCutError::InvalidTrimRange { start, end });
        }

        Ok((start as u64, end as u64))
    }

    /// Resolve to a pair of times in seconds
    pub fn resolve_seconds(&self, frame_count: u64, rate: FrameRate) -> AudioCutResult<(f64, f64)> {
        let (start, end) = self.resolve(frame_count)?;
        Ok((rate.frame_to_seconds(start), rate.frame_to_seconds(end)))
    }
}

/// A trim specification: one range, or an ordered list of ranges whose
/// results are concatenated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimList {
    Single(TrimRange),
    Multi(Vec<TrimRange>),
}

impl TrimList {
    /// All ranges in order
    pub fn ranges(&self) -> Vec<TrimRange> {
        match self {
            TrimList::Single(range) => vec![*range],
            TrimList::Multi(ranges) => ranges.clone(),
        }
    }

    /// Number of segments the cut will produce before concatenation
    pub fn segment_count(&self) -> usize {
        match self {
            TrimList::Single(_) => 1,
            TrimList::Multi(ranges) => ranges.len(),
        }
    }
}

impl std::str::FromStr for TrimList {
    type Err = AudioCutError;

    fn from_str(s: &str) -> AudioCutResult<Self> {
        parse_trim_list(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let range = TrimRange::new(None, None);
        assert_eq!(range.resolve(34049).unwrap(), (0, 34049));
    }

    #[test]
    fn test_resolve_positive_end_decrement() {
        // A positive end is shifted back one frame before time conversion
        let range = TrimRange::new(Some(24), Some(500));
        assert_eq!(range.resolve(34049).unwrap(), (24, 499));
    }

    #[test]
    fn test_resolve_negative_endpoints() {
        let range = TrimRange::new(Some(-100), Some(-24));
        assert_eq!(range.resolve(34049).unwrap(), (33949, 34025));

        let range = TrimRange::new(None, Some(-1));
        assert_eq!(range.resolve(34049).unwrap(), (0, 34048));
    }

    #[test]
    fn test_resolve_rejects_inverted_range() {
        let range = TrimRange::new(Some(500), Some(100));
        assert!(matches!(
            range.resolve(34049),
            Err(AudioCutError::InvalidTrimRange { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        let range = TrimRange::new(Some(-40000), None);
        assert!(matches!(
            range.resolve(34049),
            Err(AudioCutError::TrimOutOfRange { .. })
        ));

        let range = TrimRange::new(Some(40000), None);
        assert!(matches!(
            range.resolve(34049),
            Err(AudioCutError::TrimOutOfRange { .. })
        ));
    }

    #[test]
    fn test_resolve_zero_end() {
        // end=0 decrements to -1 and can never form a valid range
        let range = TrimRange::new(None, Some(0));
        assert!(range.resolve(34049).is_err());
    }

    #[test]
    fn test_resolve_seconds() {
        let range = TrimRange::new(Some(24), None);
        let (start, end) = range.resolve_seconds(240, FrameRate::NTSC_FILM).unwrap();
        assert!((start - 1.001).abs() < 1e-9);
        assert!((end - 10.01).abs() < 1e-9);
    }
}
