//! Quality presets for re-encoding.

use std::fmt;
use std::str::FromStr;

/// Target quality for a re-encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreset {
    /// 480 lines, H.264.
    Sd480,
    /// 720 lines, H.264.
    Hd720,
    /// 1080 lines, H.264.
    #[default]
    FullHd1080,
    /// 2160 lines, H.265.
    Uhd2160,
}

impl QualityPreset {
    /// All presets, lowest quality first.
    pub const ALL: [QualityPreset; 4] = [
        QualityPreset::Sd480,
        QualityPreset::Hd720,
        QualityPreset::FullHd1080,
        QualityPreset::Uhd2160,
    ];

    /// Preset name as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            QualityPreset::Sd480 => "480p",
            QualityPreset::Hd720 => "720p",
            QualityPreset::FullHd1080 => "1080p",
            QualityPreset::Uhd2160 => "2160p",
        }
    }

    /// Output frame height in lines.
    pub fn height(&self) -> u32 {
        match self {
            QualityPreset::Sd480 => 480,
            QualityPreset::Hd720 => 720,
            QualityPreset::FullHd1080 => 1080,
            QualityPreset::Uhd2160 => 2160,
        }
    }

    /// ffmpeg video encoder.
    pub fn codec(&self) -> &'static str {
        match self {
            QualityPreset::Uhd2160 => "libx265",
            _ => "libx264",
        }
    }

    /// Constant rate factor for the encoder.
    pub fn crf(&self) -> u8 {
        match self {
            QualityPreset::Sd480 => 24,
            QualityPreset::Hd720 => 23,
            QualityPreset::FullHd1080 => 22,
            QualityPreset::Uhd2160 => 24,
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "480p" | "sd" => Ok(QualityPreset::Sd480),
            "720p" | "hd" => Ok(QualityPreset::Hd720),
            "1080p" | "fhd" => Ok(QualityPreset::FullHd1080),
            "2160p" | "4k" | "uhd" => Ok(QualityPreset::Uhd2160),
            _ => Err(format!(
                "unknown quality preset '{}' (expected one of: {})",
                s,
                QualityPreset::ALL.map(|p| p.name()).join(", ")
            )),
        }
    }
}
