//! # Color Mapping Module
//!
//! Maps a pitch class and octave to the color of its patch.
//!
//! Every pitch class keeps only the hue of its authored base color. At the
//! middle octave that hue is shown fully saturated at medium lightness; each
//! octave above or below shifts the lightness by a fixed step. Octaves at or
//! beyond the ends of the range collapse to pure black or pure white.
//!
//! All functions here are pure and can be called from any thread.

use crate::error::TrainerError;
use crate::registry::{NoteId, NoteRegistry, PitchClass};

/// Lowest octave that still has a hue. At or below it the patch is black.
pub const MIN_OCTAVE: i32 = 0;
/// Highest octave that still has a hue. At or above it the patch is white.
pub const MAX_OCTAVE: i32 = 8;
/// Reference octave: hue at saturation 1.0 and lightness 0.5.
pub const MIDDLE_OCTAVE: i32 = 4;
/// Lightness change per octave away from the middle octave.
pub const LIGHTNESS_STEP: f32 = 0.1;

const REFERENCE_LIGHTNESS: f32 = 0.5;
const REFERENCE_SATURATION: f32 = 1.0;

/// Color shown for note identifiers that cannot be resolved.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0.1, 0.1, 0.1);

/// An RGB triple with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamps every channel into [0, 1].
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Converts to hue/saturation/lightness.
    ///
    /// Hue is expressed as a fraction of a full turn in [0, 1). Achromatic
    /// colors report a hue and saturation of zero.
    pub fn to_hsl(self) -> Hsl {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let lightness = (max + min) / 2.0;

        let delta = max - min;
        if delta == 0.0 {
            return Hsl { hue: 0.0, saturation: 0.0, lightness };
        }

        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let rc = (max - self.r) / delta;
        let gc = (max - self.g) / delta;
        let bc = (max - self.b) / delta;
        let sector = if self.r == max {
            bc - gc
        } else if self.g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        let hue = (sector / 6.0).rem_euclid(1.0);

        Hsl { hue, saturation, lightness }
    }
}

/// A color in hue/saturation/lightness space, all components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    /// Converts back to RGB, clamping each channel into [0, 1].
    pub fn to_rgb(self) -> Rgb {
        let Hsl { hue, saturation, lightness } = self;
        if saturation == 0.0 {
            return Rgb::new(lightness, lightness, lightness).clamped();
        }

        let m2 = if lightness <= 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let m1 = 2.0 * lightness - m2;

        Rgb::new(
            hue_channel(m1, m2, hue + 1.0 / 3.0),
            hue_channel(m1, m2, hue),
            hue_channel(m1, m2, hue - 1.0 / 3.0),
        )
        .clamped()
    }
}

fn hue_channel(m1: f32, m2: f32, hue: f32) -> f32 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// Lightness used for an in-range octave.
pub fn octave_lightness(octave: i32) -> f32 {
    let offset = octave.saturating_sub(MIDDLE_OCTAVE) as f32;
    (REFERENCE_LIGHTNESS + offset * LIGHTNESS_STEP).clamp(0.0, 1.0)
}

/// Calculates the patch color for a pitch class in a given octave.
pub fn map_pitch_color(pitch: PitchClass, octave: i32) -> Rgb {
    if octave <= MIN_OCTAVE {
        return Rgb::BLACK;
    }
    if octave >= MAX_OCTAVE {
        return Rgb::WHITE;
    }

    // Only the hue of the authored color survives normalization.
    let hue = pitch.definition().base_color.to_hsl().hue;
    let lightness = if octave == MIDDLE_OCTAVE {
        REFERENCE_LIGHTNESS
    } else {
        octave_lightness(octave)
    };

    Hsl {
        hue,
        saturation: REFERENCE_SATURATION,
        lightness,
    }
    .to_rgb()
}

/// Calculates the patch color for a registry letter in a given octave.
///
/// # Returns
/// * `Ok(color)` - The patch color
/// * `Err(TrainerError::UnknownNoteLetter)` - The letter is not registered
pub fn map_color(letter: char, octave: i32) -> Result<Rgb, TrainerError> {
    let definition = NoteRegistry::standard().lookup(letter)?;
    Ok(map_pitch_color(definition.pitch, octave))
}

/// Patch color for a note identifier.
pub fn color_for(id: &NoteId) -> Rgb {
    map_pitch_color(id.pitch, id.octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn mapping_is_repeatable() {
        for pitch in PitchClass::ALL {
            for octave in -2..=10 {
                assert_eq!(map_pitch_color(pitch, octave), map_pitch_color(pitch, octave));
            }
        }
    }

    #[test]
    fn range_ends_are_black_and_white() {
        for pitch in PitchClass::ALL {
            assert_eq!(map_pitch_color(pitch, MIN_OCTAVE), Rgb::BLACK);
            assert_eq!(map_pitch_color(pitch, -3), Rgb::BLACK);
            assert_eq!(map_pitch_color(pitch, MAX_OCTAVE), Rgb::WHITE);
            assert_eq!(map_pitch_color(pitch, 11), Rgb::WHITE);
        }
    }

    #[test]
    fn middle_octave_is_fully_saturated_medium_lightness() {
        for pitch in PitchClass::ALL {
            let hsl = map_pitch_color(pitch, MIDDLE_OCTAVE).to_hsl();
            assert!(close(hsl.saturation, 1.0), "{pitch:?}: {hsl:?}");
            assert!(close(hsl.lightness, 0.5), "{pitch:?}: {hsl:?}");
        }
    }

    #[test]
    fn middle_octave_normalizes_dull_base_colors() {
        // Green is authored at half brightness; the anchor is pure green.
        let green = map_pitch_color(PitchClass::J, MIDDLE_OCTAVE);
        assert!(close(green.r, 0.0) && close(green.g, 1.0) && close(green.b, 0.0));

        let red = map_pitch_color(PitchClass::P, MIDDLE_OCTAVE);
        assert!(close(red.r, 1.0) && close(red.g, 0.0) && close(red.b, 0.0));
    }

    #[test]
    fn hue_is_preserved_across_octaves() {
        for pitch in PitchClass::ALL {
            let hue = pitch.definition().base_color.to_hsl().hue;
            for octave in 1..MAX_OCTAVE {
                let got = map_pitch_color(pitch, octave).to_hsl().hue;
                let diff = (got - hue).abs();
                assert!(diff < 1e-3 || (1.0 - diff) < 1e-3, "{pitch:?} octave {octave}");
            }
        }
    }

    #[test]
    fn lightness_steps_by_a_tenth_per_octave() {
        for pitch in PitchClass::ALL {
            let mut previous = f32::MIN;
            for octave in 1..MAX_OCTAVE {
                let lightness = map_pitch_color(pitch, octave).to_hsl().lightness;
                let expected = 0.5 + (octave - MIDDLE_OCTAVE) as f32 * 0.1;
                assert!(close(lightness, expected), "{pitch:?} octave {octave}: {lightness}");
                assert!(lightness > previous);
                previous = lightness;
            }
        }
    }

    #[test]
    fn octave_lightness_saturates_at_extreme_octaves() {
        assert_eq!(octave_lightness(i32::MIN), 0.0);
        assert_eq!(octave_lightness(i32::MAX), 1.0);
        assert_eq!(map_pitch_color(PitchClass::R, i32::MIN), Rgb::BLACK);
        assert_eq!(map_pitch_color(PitchClass::R, i32::MAX), Rgb::WHITE);
    }

    #[test]
    fn channels_stay_in_unit_range() {
        for pitch in PitchClass::ALL {
            for octave in -1..=9 {
                let c = map_pitch_color(pitch, octave);
                for channel in [c.r, c.g, c.b] {
                    assert!((0.0..=1.0).contains(&channel));
                }
            }
        }
    }

    #[test]
    fn unknown_letter_fails() {
        assert_eq!(
            map_color('z', 4),
            Err(TrainerError::UnknownNoteLetter("z".to_string()))
        );
        assert_eq!(map_color('r', 4), Ok(map_pitch_color(PitchClass::R, 4)));
    }

    #[test]
    fn note_id_color_matches_letter_lookup() {
        let id = NoteId::new(PitchClass::K, 6);
        assert_eq!(Ok(color_for(&id)), map_color('k', 6));
    }

    #[test]
    fn hsl_round_trip_for_primaries() {
        let blue = Rgb::new(0.0, 0.0, 1.0).to_hsl();
        assert!(close(blue.hue, 2.0 / 3.0));
        assert!(close(blue.saturation, 1.0));
        assert!(close(blue.lightness, 0.5));

        let grey = Rgb::new(0.3, 0.3, 0.3).to_hsl();
        assert_eq!(grey.saturation, 0.0);
        assert_eq!(grey.to_rgb(), Rgb::new(0.3, 0.3, 0.3));
    }
}
