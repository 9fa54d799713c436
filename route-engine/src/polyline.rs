//! Flexible polyline codec (HERE format, version 1).
//!
//! Layout: a header of two unsigned varints (format version, then
//! `third_precision << 7 | third_dim << 4 | precision`), followed by one
//! signed varint per component per point. Components are deltas of
//! `round(value * 10^precision)` against the previous point.
//!
//! Varints use a URL-safe 64-char alphabet; each character carries 5 data
//! bits plus a continuation flag (`0x20`).

use serde::Serialize;

use crate::errors::PolylineError;

pub const FORMAT_VERSION: u64 = 1;
pub const MAX_PRECISION: u32 = 15;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const DATA_MASK: u64 = 0x1F;
const CONTINUATION: u64 = 0x20;

/// Meaning of the optional third component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThirdDimension {
    Absent,
    Level,
    Altitude,
    Elevation,
    Custom1,
    Custom2,
}

impl ThirdDimension {
    fn from_bits(bits: u8) -> Result<Self, PolylineError> {
        match bits {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Level),
            2 => Ok(Self::Altitude),
            3 => Ok(Self::Elevation),
            6 => Ok(Self::Custom1),
            7 => Ok(Self::Custom2),
            other => Err(PolylineError::ReservedThirdDimension(other)),
        }
    }

    fn bits(self) -> u64 {
        match self {
            Self::Absent => 0,
            Self::Level => 1,
            Self::Altitude => 2,
            Self::Elevation => 3,
            Self::Custom1 => 6,
            Self::Custom2 => 7,
        }
    }

    pub fn is_present(self) -> bool {
        self != Self::Absent
    }
}

/// One decoded point. `third` is set iff the path carries a third dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third: Option<f64>,
}

impl PathPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            third: None,
        }
    }

    pub fn with_third(lat: f64, lng: f64, third: f64) -> Self {
        Self {
            lat,
            lng,
            third: Some(third),
        }
    }
}

/// Decoded path, indexed by point number.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPath {
    precision: u32,
    third_dimension: ThirdDimension,
    third_precision: u32,
    points: Vec<PathPoint>,
}

impl DecodedPath {
    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn third_dimension(&self) -> ThirdDimension {
        self.third_dimension
    }

    pub fn third_precision(&self) -> u32 {
        self.third_precision
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&PathPoint> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat `[lat, lng, third, lat, lng, third, ...]` view; point `i` sits at
    /// `[3i..3i+3]`. A missing third component is written as `0.0`.
    pub fn to_flat_triples(&self) -> Vec<f64> {
        self.points
            .iter()
            .flat_map(|p| [p.lat, p.lng, p.third.unwrap_or(0.0)])
            .collect()
    }
}

/* --- decode ---------------------------------------------------------------- */

/// Decodes a flexible polyline.
pub fn decode(encoded: &str) -> Result<DecodedPath, PolylineError> {
    if encoded.is_empty() {
        return Err(PolylineError::Empty);
    }
    let mut reader = VarintReader::new(encoded);

    let version = reader.next_unsigned()?.ok_or(PolylineError::Truncated)?;
    if version != FORMAT_VERSION {
        return Err(PolylineError::UnsupportedVersion(version));
    }
    let content = reader.next_unsigned()?.ok_or(PolylineError::Truncated)?;
    let precision = (content & 0x0F) as u32;
    let third_dimension = ThirdDimension::from_bits(((content >> 4) & 0x07) as u8)?;
    let third_precision = ((content >> 7) & 0x0F) as u32;

    let scale = 10f64.powi(precision as i32);
    let third_scale = 10f64.powi(third_precision as i32);
    let with_third = third_dimension.is_present();

    let mut points = Vec::new();
    let (mut lat, mut lng, mut third) = (0i64, 0i64, 0i64);

    while let Some(d_lat) = reader.next_signed()? {
        let d_lng = reader.next_signed()?.ok_or(PolylineError::Truncated)?;
        lat = lat.checked_add(d_lat).ok_or(PolylineError::Overflow)?;
        lng = lng.checked_add(d_lng).ok_or(PolylineError::Overflow)?;

        let z = if with_third {
            let d_z = reader.next_signed()?.ok_or(PolylineError::Truncated)?;
            third = third.checked_add(d_z).ok_or(PolylineError::Overflow)?;
            Some(third as f64 / third_scale)
        } else {
            None
        };

        points.push(PathPoint {
            lat: lat as f64 / scale,
            lng: lng as f64 / scale,
            third: z,
        });
    }

    Ok(DecodedPath {
        precision,
        third_dimension,
        third_precision,
        points,
    })
}

struct VarintReader<'a> {
    chars: std::iter::Enumerate<std::str::Chars<'a>>,
}

impl<'a> VarintReader<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            chars: s.chars().enumerate(),
        }
    }

    /// Next unsigned varint; `Ok(None)` at a clean end of input.
    fn next_unsigned(&mut self) -> Result<Option<u64>, PolylineError> {
        let mut result = 0u64;
        let mut shift = 0u32;
        let mut started = false;

        for (position, ch) in self.chars.by_ref() {
            started = true;
            let value = decode_char(ch).ok_or(PolylineError::InvalidCharacter { ch, position })?;
            if shift >= 64 || (shift > 59 && (value & DATA_MASK) >> (64 - shift) != 0) {
                return Err(PolylineError::Overflow);
            }
            result |= (value & DATA_MASK) << shift;
            if value & CONTINUATION == 0 {
                return Ok(Some(result));
            }
            shift += 5;
        }

        if started {
            Err(PolylineError::Truncated)
        } else {
            Ok(None)
        }
    }

    fn next_signed(&mut self) -> Result<Option<i64>, PolylineError> {
        Ok(self.next_unsigned()?.map(unzigzag))
    }
}

fn decode_char(ch: char) -> Option<u64> {
    let b = u8::try_from(ch).ok()?;
    ALPHABET.iter().position(|&a| a == b).map(|i| i as u64)
}

fn unzigzag(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}

/* --- encode ---------------------------------------------------------------- */

/// Encodes points at the given precisions. Inverse of [`decode`] for values
/// representable at that precision.
pub fn encode(
    points: &[PathPoint],
    precision: u32,
    third_dimension: ThirdDimension,
    third_precision: u32,
) -> Result<String, PolylineError> {
    for p in [precision, third_precision] {
        if p > MAX_PRECISION {
            return Err(PolylineError::PrecisionOutOfRange(p));
        }
    }

    let mut out = String::new();
    encode_unsigned(FORMAT_VERSION, &mut out);
    let content =
        (u64::from(third_precision) << 7) | (third_dimension.bits() << 4) | u64::from(precision);
    encode_unsigned(content, &mut out);

    let scale = 10f64.powi(precision as i32);
    let third_scale = 10f64.powi(third_precision as i32);
    let (mut last_lat, mut last_lng, mut last_z) = (0i64, 0i64, 0i64);

    for p in points {
        let lat = (p.lat * scale).round() as i64;
        let lng = (p.lng * scale).round() as i64;
        encode_signed(lat - last_lat, &mut out);
        encode_signed(lng - last_lng, &mut out);
        last_lat = lat;
        last_lng = lng;

        if third_dimension.is_present() {
            let z = (p.third.unwrap_or(0.0) * third_scale).round() as i64;
            encode_signed(z - last_z, &mut out);
            last_z = z;
        }
    }
    Ok(out)
}

fn encode_unsigned(mut value: u64, out: &mut String) {
    while value > DATA_MASK {
        out.push(ALPHABET[((value & DATA_MASK) | CONTINUATION) as usize] as char);
        value >>= 5;
    }
    out.push(ALPHABET[value as usize] as char);
}

fn encode_signed(value: i64, out: &mut String) {
    encode_unsigned(((value << 1) ^ (value >> 63)) as u64, out);
}
