//! Frame rate parsing and frame/time arithmetic

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AudioCutError, AudioCutResult};

/// Exact rational frame rate, e.g. 24000/1001
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (frames)
    pub num: u64,
    /// Denominator (seconds)
    pub den: u64,
}

impl FrameRate {
    /// NTSC film rate, the default for the Blu-ray sources this tool targets
    pub const NTSC_FILM: FrameRate = FrameRate {
        num: 24000,
        den: 1001,
    };

    /// Create a frame rate from a numerator/denominator pair
    pub fn new(num: u64, den: u64) -> AudioCutResult<Self> {
        if num == 0 || den == 0 {
            return Err(AudioCutError::InvalidFrameRate {
                value: format!("{}/{}", num, den),
            });
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float
    pub fn fps(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Seconds per frame
    pub fn seconds_per_frame(&self) -> f64 {
        self.den as f64 / self.num as f64
    }

    /// Time in seconds at which the given frame starts
    pub fn frame_to_seconds(&self, frame: u64) -> f64 {
        frame as f64 * self.seconds_per_frame()
    }

    /// Number of frames covering `duration` seconds, rounded up
    pub fn frames_in(&self, duration: f64) -> u64 {
        (duration * self.fps()).ceil() as u64
    }
}

impl FromStr for FrameRate {
    type Err = AudioCutError;

    /// Parse `24000/1001` or a plain integer like `24`
    fn from_str(s: &str) -> AudioCutResult<Self> {
        let s = s.trim();
        let invalid = || AudioCutError::InvalidFrameRate {
            value: s.to_string(),
        };

        if let Some((num, den)) = s.split_once('/') {
            let num: u64 = num.trim().parse().map_err(|_| invalid())?;
            let den: u64 = den.trim().parse().map_err(|_| invalid())?;
            FrameRate::new(num, den)
        } else {
            let num: u64 = s.parse().map_err(|_| invalid())?;
            FrameRate::new(num, 1)
        }
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rational() {
        let rate: FrameRate = "24000/1001".parse().unwrap();
        assert_eq!(rate, FrameRate::NTSC_FILM);
        assert!((rate.fps() - 23.976).abs() < 0.001);
    }

    #[test]
    fn test_parse_integer() {
        let rate: FrameRate = "25".parse().unwrap();
        assert_eq!(rate, FrameRate { num: 25, den: 1 });
        assert_eq!(rate.fps(), 25.0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<FrameRate>().is_err());
        assert!("abc".parse::<FrameRate>().is_err());
        assert!("24000/0".parse::<FrameRate>().is_err());
        assert!("0/1001".parse::<FrameRate>().is_err());
        assert!("23.976".parse::<FrameRate>().is_err());
    }

    #[test]
    fn test_frame_to_seconds() {
        let rate = FrameRate::NTSC_FILM;
        assert_eq!(rate.frame_to_seconds(0), 0.0);
        let one = rate.frame_to_seconds(1);
        assert!((one - 0.0417083).abs() < 1e-6);
        let thousand = rate.frame_to_seconds(1000);
        assert!((thousand - 41.7083333).abs() < 1e-6);
    }

    #[test]
    fn test_frames_in_duration() {
        let rate = FrameRate::NTSC_FILM;
        // 1420.085 seconds of 23.976 fps video -> 34048 frames, rounded up
        assert_eq!(rate.frames_in(1420.085), 34048);
        assert_eq!(FrameRate { num: 25, den: 1 }.frames_in(10.0), 250);
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(FrameRate::NTSC_FILM.to_string(), "24000/1001");
        assert_eq!(FrameRate { num: 25, den: 1 }.to_string(), "25");
    }
}
