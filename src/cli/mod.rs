use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::config::{Config, Scheme};
use crate::domain::token::TokenAuthority;
use crate::http::{server::HttpServer, tls::TlsMaterial};
use crate::playlist::{self, PlaylistFormat, RenderOptions};
use crate::public_endpoint::RequestContext;
use crate::storage::{catalog::Catalog, source::DirectorySource};

#[derive(Parser)]
#[command(name = "tokenbox")]
#[command(version = "0.1")]
#[command(about = "Serve a music directory and its playlists behind a shared token")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP (and optionally HTTPS) server
    Serve,
    /// List tracks with their identifiers
    List,
    /// Print a playlist to stdout, as the server would render it
    Playlist {
        #[arg(short, long, value_enum, default_value_t = PlaylistFormat::Pls)]
        format: PlaylistFormat,
        /// Hostname to put in track URLs
        #[arg(long, default_value = "localhost")]
        host: String,
        /// Build https:// URLs
        #[arg(long)]
        https: bool,
        /// Port to put in track URLs, overriding the config
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        shuffle: bool,
    },
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Commands::Serve => serve(cfg),

        Commands::List => {
            let catalog = build_catalog(&cfg.tracks_directory)?;
            for track in catalog.entries() {
                println!("{:>5}  {}", track.id, track.filename);
            }
            Ok(())
        }

        Commands::Playlist {
            format,
            host,
            https,
            port,
            shuffle,
        } => {
            let catalog = build_catalog(&cfg.tracks_directory)?;
            let scheme = if https { Scheme::Https } else { Scheme::Http };
            let ctx = RequestContext {
                scheme,
                hostname: host,
                port: port.or(cfg.port_in_url(scheme)),
                base_path: cfg.app_base_path.clone(),
            };
            let authority = TokenAuthority::new(cfg.token.clone());

            let rendered = playlist::render(
                format,
                &catalog,
                &ctx,
                &authority,
                RenderOptions { shuffle },
            );
            println!("{}", rendered.body);
            Ok(())
        }
    }
}

/// Config is already loaded; read TLS material, build the catalog, then listen.
/// Any stage failing aborts startup.
fn serve(cfg: Config) -> anyhow::Result<()> {
    let tls = TlsMaterial::load(&cfg.tls)?;
    let catalog = build_catalog(&cfg.tracks_directory)?;
    info!(
        "Catalog of {} tracks built from {}",
        catalog.len(),
        cfg.tracks_directory.display()
    );
    if catalog.is_empty() {
        warn!("No tracks found, playlists will be empty");
    }

    HttpServer::new(cfg, catalog).run(tls)
}

fn build_catalog(tracks_directory: &Path) -> anyhow::Result<Catalog> {
    Catalog::build(&DirectorySource::new(tracks_directory))
        .context("Unable to get the list of tracks")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_playlist_subcommand() {
        let cli = Cli::try_parse_from([
            "tokenbox", "-c", "/etc/tokenbox.toml", "playlist", "--format", "asx", "--host",
            "music.lan", "--shuffle",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("/etc/tokenbox.toml"));
        match cli.command {
            Commands::Playlist {
                format,
                host,
                https,
                port,
                shuffle,
            } => {
                assert_eq!(format, PlaylistFormat::Asx);
                assert_eq!(host, "music.lan");
                assert!(!https);
                assert_eq!(port, None);
                assert!(shuffle);
            }
            _ => panic!("expected playlist subcommand"),
        }
    }

    #[test]
    fn build_catalog_reports_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = build_catalog(&tmp.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("Unable to get the list of tracks"));
    }
}
