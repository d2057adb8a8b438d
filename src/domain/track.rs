use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// Identifier of a track within one catalog snapshot.
///
/// Assigned from the directory enumeration order, starting at 0.
/// Only meaningful against the catalog that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub usize);

impl Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid track id {0:?}")]
pub struct InvalidTrackId(pub String);

impl FromStr for TrackId {
    type Err = InvalidTrackId;

    /// Accepts plain decimal digits only, so `+1` never aliases track 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidTrackId(s.to_string()));
        }
        s.parse()
            .map(TrackId)
            .map_err(|_| InvalidTrackId(s.to_string()))
    }
}

/// Represent a playable file in the tracks directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: TrackId,
    /// On-disk name, extension included. Also used as the playlist title.
    pub filename: String,
}
