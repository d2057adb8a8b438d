use crate::{
    domain::track::{Track, TrackId},
    storage::{error::CatalogError, source::CatalogSource},
};

/// One snapshot of the tracks directory.
///
/// Identifiers are positions in the enumeration, so `tracks[i].id == TrackId(i)`.
/// The snapshot never changes once built; pick up added or removed files by
/// building a new one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn build(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        Ok(Self::from_names(source.list()?))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tracks = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Track {
                id: TrackId(index),
                filename: name.into(),
            })
            .collect();
        Self { tracks }
    }

    pub fn entries(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn resolve(&self, id: TrackId) -> Option<&str> {
        self.tracks.get(id.0).map(|track| track.filename.as_str())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::storage::source::DirectorySource;

    #[test]
    fn identifiers_follow_enumeration_order() {
        let catalog = Catalog::from_names(["b.mp3", "a.mp3", "c.ogg"]);

        let ids: Vec<_> = catalog.entries().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TrackId(0), TrackId(1), TrackId(2)]);

        assert_eq!(catalog.resolve(TrackId(0)), Some("b.mp3"));
        assert_eq!(catalog.resolve(TrackId(2)), Some("c.ogg"));
        assert_eq!(catalog.resolve(TrackId(3)), None);
    }

    #[test]
    fn every_entry_resolves_to_its_own_filename() {
        let catalog = Catalog::from_names(["x.mp3", "y.mp3", "z.mp3", "w.flac"]);

        for track in catalog.entries() {
            assert_eq!(catalog.resolve(track.id), Some(track.filename.as_str()));
        }
    }

    #[test]
    fn build_from_directory() -> anyhow::Result<()> {
        let tmp = TempDir::new()?;
        std::fs::write(tmp.path().join("song.mp3"), b"x")?;

        let catalog = Catalog::build(&DirectorySource::new(tmp.path()))?;

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resolve(TrackId(0)), Some("song.mp3"));
        Ok(())
    }

    #[test]
    fn build_propagates_source_errors() {
        let tmp = TempDir::new().unwrap();
        let result = Catalog::build(&DirectorySource::new(tmp.path().join("missing")));
        assert!(result.is_err());
    }
}
