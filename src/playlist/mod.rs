//! Playlist documents pointing back at the track endpoint

use std::str::FromStr;

use rand::seq::SliceRandom;
use thiserror::Error;

use crate::{
    domain::{token::TokenAuthority, track::Track},
    public_endpoint::RequestContext,
    storage::catalog::Catalog,
};

mod asx;
mod pls;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlaylistFormat {
    Pls,
    Asx,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown playlist format {0:?}")]
pub struct UnknownFormat(pub String);

impl PlaylistFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            PlaylistFormat::Pls => "audio/x-scpls",
            PlaylistFormat::Asx => "video/x-ms-asf",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            PlaylistFormat::Pls => "pls",
            PlaylistFormat::Asx => "asx",
        }
    }
}

impl FromStr for PlaylistFormat {
    type Err = UnknownFormat;

    /// Parses the extension part of `music.<ext>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pls" => Ok(PlaylistFormat::Pls),
            "asx" => Ok(PlaylistFormat::Asx),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub shuffle: bool,
}

/// One line item in a playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry<'a> {
    pub title: &'a str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPlaylist {
    pub content_type: &'static str,
    pub body: String,
}

/// Renders the whole catalog as a playlist in `format`.
///
/// The token is issued once per call and shared by every entry.
pub fn render(
    format: PlaylistFormat,
    catalog: &Catalog,
    ctx: &RequestContext,
    authority: &TokenAuthority,
    options: RenderOptions,
) -> RenderedPlaylist {
    let token = authority.issue();

    let entries: Vec<PlaylistEntry> = ordered_tracks(catalog, options)
        .into_iter()
        .map(|track| PlaylistEntry {
            title: &track.filename,
            url: ctx.track_url(track.id, &token),
        })
        .collect();

    let body = match format {
        PlaylistFormat::Pls => pls::write(&entries),
        PlaylistFormat::Asx => asx::write(&entries),
    };

    RenderedPlaylist {
        content_type: format.content_type(),
        body,
    }
}

fn ordered_tracks(catalog: &Catalog, options: RenderOptions) -> Vec<&Track> {
    let mut tracks: Vec<&Track> = catalog.entries().iter().collect();
    if options.shuffle {
        tracks.shuffle(&mut rand::rng());
    }
    tracks
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::Scheme;

    fn ctx() -> RequestContext {
        RequestContext {
            scheme: Scheme::Http,
            hostname: "host".to_string(),
            port: None,
            base_path: "/api".to_string(),
        }
    }

    #[test]
    fn format_metadata() {
        assert_eq!(PlaylistFormat::Pls.content_type(), "audio/x-scpls");
        assert_eq!(PlaylistFormat::Asx.content_type(), "video/x-ms-asf");
        assert_eq!("pls".parse(), Ok(PlaylistFormat::Pls));
        assert_eq!("asx".parse(), Ok(PlaylistFormat::Asx));
        assert_eq!(
            "m3u".parse::<PlaylistFormat>(),
            Err(UnknownFormat("m3u".to_string()))
        );
    }

    #[test]
    fn pls_round_trip_example() {
        let catalog = Catalog::from_names(["song.mp3"]);
        let authority = TokenAuthority::new("T");

        let rendered = render(
            PlaylistFormat::Pls,
            &catalog,
            &ctx(),
            &authority,
            RenderOptions::default(),
        );

        assert_eq!(rendered.content_type, "audio/x-scpls");
        assert_eq!(
            rendered.body,
            "[playlist]\nFile1=http://host/api/tracks/0?token=T\nTitle1=song.mp3\nNumberOfEntries=1\nVersion=2"
        );
    }

    #[test]
    fn unshuffled_order_is_enumeration_order() {
        let catalog = Catalog::from_names(["c.mp3", "a.mp3", "b.mp3"]);

        let titles: Vec<_> = ordered_tracks(&catalog, RenderOptions { shuffle: false })
            .iter()
            .map(|t| t.filename.as_str())
            .collect();

        assert_eq!(titles, vec!["c.mp3", "a.mp3", "b.mp3"]);
    }

    #[test]
    fn shuffle_is_a_permutation_and_eventually_reorders() {
        let names = ["1.mp3", "2.mp3", "3.mp3", "4.mp3", "5.mp3", "6.mp3"];
        let catalog = Catalog::from_names(names);
        let expected: HashSet<&str> = names.into_iter().collect();

        let mut saw_reordering = false;
        for _ in 0..50 {
            let order: Vec<_> = ordered_tracks(&catalog, RenderOptions { shuffle: true })
                .iter()
                .map(|t| t.filename.as_str())
                .collect();

            assert_eq!(order.len(), names.len());
            assert_eq!(order.iter().copied().collect::<HashSet<_>>(), expected);
            if order != names {
                saw_reordering = true;
            }
        }
        assert!(saw_reordering, "50 shuffles all matched enumeration order");
    }

    #[test]
    fn shuffled_entries_keep_their_own_urls() {
        let catalog = Catalog::from_names(["a.mp3", "b.mp3", "c.mp3"]);
        let authority = TokenAuthority::new("T");

        let rendered = render(
            PlaylistFormat::Pls,
            &catalog,
            &ctx(),
            &authority,
            RenderOptions { shuffle: true },
        );

        let lines: Vec<&str> = rendered.body.lines().collect();
        for i in 1..=3 {
            let file = lines
                .iter()
                .find_map(|l| l.strip_prefix(&format!("File{i}=")))
                .unwrap();
            let title = lines
                .iter()
                .find_map(|l| l.strip_prefix(&format!("Title{i}=")))
                .unwrap();
            let id = catalog
                .entries()
                .iter()
                .find(|t| t.filename == title)
                .unwrap()
                .id;
            assert_eq!(file, format!("http://host/api/tracks/{id}?token=T"));
        }
    }
}
