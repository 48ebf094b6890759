use std::fmt;

/// Value used for any field the analyzer did not report.
pub const UNKNOWN: &str = "Unknown";

/// The thirteen fields every [`MetadataRecord`] carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Artist,
    Album,
    Codec,
    FileSize,
    Date,
    BitDepth,
    BitRate,
    SamplingRate,
    Duration,
    Url,
    TrackPosition,
    TrackTotal,
}

impl Field {
    pub const COUNT: usize = 13;

    pub const ALL: [Field; Field::COUNT] = [
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::Codec,
        Field::FileSize,
        Field::Date,
        Field::BitDepth,
        Field::BitRate,
        Field::SamplingRate,
        Field::Duration,
        Field::Url,
        Field::TrackPosition,
        Field::TrackTotal,
    ];

    /// Display name, also used as the printed label.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Artist => "Artist",
            Field::Album => "Album",
            Field::Codec => "Codec",
            Field::FileSize => "File size",
            Field::Date => "Date",
            Field::BitDepth => "Bit depth",
            Field::BitRate => "Bit rate",
            Field::SamplingRate => "Sampling rate",
            Field::Duration => "Duration",
            Field::Url => "URL",
            Field::TrackPosition => "Track position",
            Field::TrackTotal => "Track total",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata for one track. Every field is always populated; fields are
/// never changed once the record is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataRecord {
    values: [String; Field::COUNT],
}

impl MetadataRecord {
    /// Build a record, asking `value_for` for each field in [`Field::ALL`] order.
    pub fn from_fn(mut value_for: impl FnMut(Field) -> String) -> Self {
        Self {
            values: std::array::from_fn(|i| value_for(Field::ALL[i])),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn is_known(&self, field: Field) -> bool {
        self.get(field) != UNKNOWN
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}

impl Default for MetadataRecord {
    fn default() -> Self {
        Self::from_fn(|_| UNKNOWN.to_string())
    }
}
