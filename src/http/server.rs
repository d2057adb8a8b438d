use anyhow::anyhow;
use log::{debug, error, info, warn};
use rouille::{Request, Response};
use std::{path::Path, sync::Arc};

use crate::{
    config::Config,
    domain::token::TokenAuthority,
    http::{
        auth::{self, AuthRejection},
        context::request_context,
        error::ApiError,
        tls::TlsMaterial,
    },
    playlist::{self, PlaylistFormat, RenderOptions},
    storage::{catalog::Catalog, resolver::TrackResolver},
};

const PLAYLIST_STEM: &str = "music.";

pub struct HttpServer {
    pub config: Config,
    authority: TokenAuthority,
    catalog: Arc<Catalog>,
    resolver: TrackResolver,
}

impl HttpServer {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            authority: TokenAuthority::new(config.token.clone()),
            resolver: TrackResolver::new(&config.tracks_directory, Arc::clone(&catalog)),
            catalog,
            config,
        }
    }

    /// Binds the HTTP listener (and the HTTPS one when `tls` is given) and serves forever.
    pub fn run(self, tls: Option<TlsMaterial>) -> anyhow::Result<()> {
        let server = Arc::new(self);

        let _https = match tls {
            Some(material) => Some(Self::start_https(Arc::clone(&server), material)?),
            None => None,
        };

        let addr = format!("{}:{}", server.config.http.bind_addr, server.config.http.port);
        let handler = Arc::clone(&server);
        let http = rouille::Server::new(&addr, move |request| handler.handle_request(request))
            .map_err(|e| anyhow!("Unable to listen on {addr}: {e}"))?;

        info!("HTTP server listening on http://{}", http.server_addr());
        http.run();
        Ok(())
    }

    #[cfg(feature = "tls")]
    fn start_https(
        server: Arc<HttpServer>,
        material: TlsMaterial,
    ) -> anyhow::Result<(std::thread::JoinHandle<()>, std::sync::mpsc::Sender<()>)> {
        let addr = server.config.tls.addr();
        let handler = Arc::clone(&server);
        let https = rouille::Server::new_ssl(
            &addr,
            move |request| handler.handle_request(request),
            material.certificate,
            material.key,
        )
        .map_err(|e| anyhow!("Unable to listen on {addr}: {e}"))?;

        info!("HTTPS server listening on https://{}", https.server_addr());
        Ok(https.stoppable())
    }

    #[cfg(not(feature = "tls"))]
    fn start_https(server: Arc<HttpServer>, material: TlsMaterial) -> anyhow::Result<()> {
        Err(anyhow!(
            "Unable to listen on https://{} with a {} byte certificate and {} byte key: built without the `tls` feature",
            server.config.tls.addr(),
            material.certificate.len(),
            material.key.len()
        ))
    }

    fn handle_request(&self, request: &Request) -> Response {
        Self::log_request(request);

        let response = self.dispatch(request).unwrap_or_else(ApiError::into_response);

        info!("Response: {} {}", request.method(), response.status_code);
        response
    }

    fn log_request(request: &Request) {
        // url() excludes the query string, so the token never reaches the log
        info!("{} {}", request.method(), request.url());
    }

    fn dispatch(&self, request: &Request) -> Result<Response, ApiError> {
        auth::authenticate(request, &self.authority).inspect_err(|rejection| {
            Self::log_rejection(request, *rejection);
        })?;

        let base = self.config.app_base_path.as_str();
        let stripped;
        let routed = if base.is_empty() {
            request
        } else {
            match request.remove_prefix(base) {
                Some(inner) => {
                    stripped = inner;
                    &stripped
                }
                None => return Ok(Response::empty_404()),
            }
        };

        rouille::router!(routed,
            (GET) (/playlists/{name: String}) => {
                self.handle_playlist(request, &name)
            },
            (GET) (/tracks/{id: String}) => {
                self.handle_get_track(&id)
            },
            _ => Ok(Response::empty_404())
        )
    }

    fn log_rejection(request: &Request, rejection: AuthRejection) {
        warn!(
            "Rejected {} {} from {}: {}",
            request.method(),
            request.url(),
            request.remote_addr(),
            rejection
        );
    }

    fn handle_playlist(&self, request: &Request, name: &str) -> Result<Response, ApiError> {
        let format = match name
            .strip_prefix(PLAYLIST_STEM)
            .and_then(|ext| ext.parse::<PlaylistFormat>().ok())
        {
            Some(format) => format,
            None => return Ok(Response::empty_404()),
        };

        let options = RenderOptions {
            shuffle: request.get_param("shuffle").as_deref() == Some("true"),
        };
        let ctx = request_context(request, &self.config);

        let rendered = playlist::render(format, &self.catalog, &ctx, &self.authority, options);
        debug!(
            "PLAYLIST {} -> {} entries, shuffle: {}",
            format.extension(),
            self.catalog.len(),
            options.shuffle
        );

        Ok(Response::from_data(rendered.content_type, rendered.body))
    }

    fn handle_get_track(&self, id: &str) -> Result<Response, ApiError> {
        let path = self.resolver.resolve(id)?;
        let mime = Self::mime_for_track(&path);

        let file = std::fs::File::open(&path).map_err(|e| {
            error!("Unable to open track {}: {e}", path.to_string_lossy());
            ApiError::Internal
        })?;
        debug!(
            "TRACK {} -> 200 OK, path: {}, MIME type: {}",
            id,
            path.to_string_lossy(),
            mime
        );

        Ok(Response::from_file(mime, file))
    }

    fn mime_for_track(path: &Path) -> String {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy())
            .map(|s| s.to_lowercase());
        let default = || {
            mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string()
        };
        ext.and_then(|ext| Self::mime_from_ext(ext.as_str()))
            .unwrap_or_else(default)
    }

    /// Map file extension (without dot) to the MIME type players expect.
    /// Returns None if the extension is not recognized.
    pub fn mime_from_ext(ext: &str) -> Option<String> {
        match ext {
            "m4a" => Some("audio/x-m4a".to_string()), // Safari iOS compatible
            "aac" => Some("audio/aac".to_string()),
            "mp3" => Some("audio/mpeg".to_string()),
            "wav" => Some("audio/wav".to_string()),
            "ogg" => Some("audio/ogg".to_string()),
            "flac" => Some("audio/flac".to_string()),
            _ => None,
        }
    }
}
