use anyhow::{Context, bail};

use crate::config::TlsConfig;

/// PEM certificate and private key, read once at startup.
pub struct TlsMaterial {
    pub certificate: Vec<u8>,
    pub key: Vec<u8>,
}

impl TlsMaterial {
    /// Returns `None` when TLS is disabled in config.
    pub fn load(config: &TlsConfig) -> anyhow::Result<Option<TlsMaterial>> {
        if !config.enabled {
            return Ok(None);
        }
        if !cfg!(feature = "tls") {
            bail!(
                "tls is enabled for https://{} but this binary was built without the `tls` feature",
                config.addr()
            );
        }

        let (Some(cert_path), Some(key_path)) = (&config.certificate, &config.key) else {
            bail!("tls is enabled but certificate or key path is missing");
        };

        let certificate = std::fs::read(cert_path)
            .with_context(|| format!("Unable to read TLS certificate {}", cert_path.display()))?;
        let key = std::fs::read(key_path)
            .with_context(|| format!("Unable to read TLS key {}", key_path.display()))?;

        Ok(Some(TlsMaterial { certificate, key }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_tls_loads_nothing() -> anyhow::Result<()> {
        assert!(TlsMaterial::load(&TlsConfig::default())?.is_none());
        Ok(())
    }

    #[cfg(not(feature = "tls"))]
    #[test]
    fn enabled_tls_without_feature_fails() {
        let config = TlsConfig {
            enabled: true,
            certificate: Some("cert.pem".into()),
            key: Some("key.pem".into()),
            port: 9443,
            ..TlsConfig::default()
        };

        let err = TlsMaterial::load(&config).err().unwrap();
        let message = err.to_string();
        assert!(message.contains("`tls` feature"), "{message}");
        assert!(message.contains("0.0.0.0:9443"), "{message}");
    }

    #[cfg(feature = "tls")]
    #[test]
    fn enabled_tls_with_missing_files_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let config = TlsConfig {
            enabled: true,
            certificate: Some(tmp.path().join("cert.pem")),
            key: Some(tmp.path().join("key.pem")),
            ..TlsConfig::default()
        };

        assert!(TlsMaterial::load(&config).is_err());
    }

    #[cfg(feature = "tls")]
    #[test]
    fn enabled_tls_reads_both_files() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let cert = tmp.path().join("cert.pem");
        let key = tmp.path().join("key.pem");
        std::fs::write(&cert, b"CERT")?;
        std::fs::write(&key, b"KEY")?;

        let config = TlsConfig {
            enabled: true,
            certificate: Some(cert),
            key: Some(key),
            ..TlsConfig::default()
        };

        let material = TlsMaterial::load(&config)?.unwrap();
        assert_eq!(material.certificate, b"CERT");
        assert_eq!(material.key, b"KEY");
        Ok(())
    }
}
