use ufmt::{uDisplay, uWrite, Formatter};
use ufmt_macros::uDebug;

/// Underlying type representing the number of millidegrees.
type MilliDegreesRepr = i32;

/// Millidegrees in one full revolution.
pub const MILLIDEGREES_PER_REVOLUTION: MilliDegreesRepr = 360_000;

/// Angle in millidegrees.
#[derive(Debug, uDebug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone)]
pub struct MilliDegrees(MilliDegreesRepr);
impl MilliDegrees {
    /// Creates a new `MilliDegrees`.
    pub fn new(value: MilliDegreesRepr) -> Self {
        Self(value)
    }

    /// Returns the value as an `i32`.
    pub fn get_value(&self) -> MilliDegreesRepr {
        self.0
    }

    /// Normalize a `MilliDegrees` value to the range `[0, 359999]`.
    ///
    /// This corresponds to the range 0 degrees (inclusive) to 360 degrees
    /// (exclusive). Negative angles wrap around, so -90 degrees becomes 270
    /// degrees.
    pub fn normalize(&self) -> MilliDegrees {
        MilliDegrees::new(self.0.rem_euclid(MILLIDEGREES_PER_REVOLUTION))
    }
}

impl uDisplay for MilliDegrees {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        udisplay_millis(self.get_value(), f)
    }
}

/// Writes a value in thousandths as a signed decimal with three places.
///
/// eg. `-1500` is written as `-1.500`.
fn udisplay_millis<W>(
    value: i32,
    f: &mut Formatter<'_, W>,
) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    // Sign character.
    if value >= 0 {
        f.write_char('+')?;
    } else {
        f.write_char('-')?;
    }

    let v = value.unsigned_abs();
    let int_part = v / 1000;
    let frc_part = v % 1000;

    int_part.fmt(f)?;
    f.write_char('.')?;

    if frc_part < 10 {
        f.write_str("00")?;
    } else if frc_part < 100 {
        f.write_char('0')?;
    }
    frc_part.fmt(f)
}
