//! Derivation of handshake-ready parameters from a [`TlsSettings`] profile.
//!
//! Loading is lazy and uncached: every call re-reads the certificate and key
//! files, so a failure is never masked by a previously successful load and
//! rotated credentials are picked up on the next upgrade. Calls block on file
//! I/O and are safe to issue concurrently; there is no shared mutable state.

use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use tokio_rustls::rustls::{
    CipherSuite, ProtocolVersion,
    crypto::aws_lc_rs::sign::any_supported_type,
    pki_types::{CertificateDer, PrivateKeyDer},
    sign::CertifiedKey,
};

use crate::{
    config::tls::TlsSettings,
    error::{TlsError, TlsResult},
};

/// The bundle a TLS handshake consumes directly: one credential plus the
/// profile's version and cipher lists, passed through unchanged.
#[derive(Debug, Clone)]
pub struct NegotiationParams {
    /// Certificate chain and signing key, held as a single unit.
    pub credential: Arc<CertifiedKey>,

    /// Acceptable protocol versions, exactly as configured.
    pub versions: Vec<ProtocolVersion>,

    /// Acceptable cipher suites, exactly as configured.
    pub ciphers: Vec<CipherSuite>,
}

fn load_certificates(path: &Path) -> TlsResult<Vec<CertificateDer<'static>>> {
    let path_str = path.display().to_string();

    let file = File::open(path).map_err(|source| TlsError::CertificateLoad {
        path: path_str.clone(),
        source,
    })?;

    let chain = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::CertificateLoad {
            path: path_str.clone(),
            source,
        })?;

    if chain.is_empty() {
        return Err(TlsError::EmptyCertificate { path: path_str });
    }

    Ok(chain)
}

fn load_key(path: &Path) -> TlsResult<PrivateKeyDer<'static>> {
    let path_str = path.display().to_string();
    let mut reader = BufReader::new(File::open(path).map_err(|e| TlsError::KeyLoad {
        path: path_str.clone(),
        reason: e.to_string(),
    })?);

    match rustls_pemfile::read_one(&mut reader).map_err(|e| TlsError::KeyLoad {
        path: path_str.clone(),
        reason: e.to_string(),
    })? {
        Some(rustls_pemfile::Item::Pkcs1Key(key)) => Ok(PrivateKeyDer::Pkcs1(key)),
        Some(rustls_pemfile::Item::Pkcs8Key(key)) => Ok(PrivateKeyDer::Pkcs8(key)),
        Some(rustls_pemfile::Item::Sec1Key(key)) => Ok(PrivateKeyDer::Sec1(key)),
        _ => Err(TlsError::KeyLoad {
            path: path_str,
            reason: "unable to determine key file format (expected PKCS1, PKCS8, or SEC1)"
                .to_string(),
        }),
    }
}

impl TlsSettings {
    /// Load the credential pair from disk and bundle it with this profile's
    /// version and cipher lists.
    ///
    /// Reads both PEM files on every call. The certificate is loaded first, so
    /// a missing certificate surfaces regardless of the key file's state.
    ///
    /// # Errors
    ///
    /// [`TlsError`] if either file is missing or unreadable, the certificate
    /// file holds no certificates, or the key is not a supported signing key.
    pub fn negotiation_params(&self) -> TlsResult<NegotiationParams> {
        let chain = load_certificates(&self.certificate)?;
        let key = load_key(&self.key)?;

        let signing_key = any_supported_type(&key).map_err(|e| TlsError::KeyRejected {
            reason: e.to_string(),
        })?;

        Ok(NegotiationParams {
            credential: Arc::new(CertifiedKey::new(chain, signing_key)),
            versions: self.versions.clone(),
            ciphers: self.ciphers.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tokio_rustls::rustls::ProtocolVersion;

    use super::*;
    use crate::config::tls::TlsMode;

    /// Writes a freshly generated self-signed certificate and key under `dir`.
    fn write_test_credential(dir: &Path) -> (PathBuf, PathBuf) {
        let generated = rcgen::generate_simple_self_signed(vec!["localhost".to_string()])
            .expect("certificate generation should succeed");

        let cert_path = dir.join("cert.pem");
        let key_path = dir.join("key.pem");
        std::fs::write(&cert_path, generated.cert.pem()).unwrap();
        std::fs::write(&key_path, generated.key_pair.serialize_pem()).unwrap();

        (cert_path, key_path)
    }

    #[test]
    fn valid_pair_yields_one_credential_and_identity_lists() {
        let dir = tempfile::tempdir().unwrap();
        let (cert_path, key_path) = write_test_credential(dir.path());

        let mut profile = TlsSettings::from_paths(&cert_path, &key_path);
        profile.mode = TlsMode::Opportunistic;
        profile.versions = vec![ProtocolVersion::TLSv1_3, ProtocolVersion::TLSv1_2];

        let params = profile.negotiation_params().unwrap();

        assert_eq!(params.credential.cert.len(), 1);
        assert_eq!(params.versions, profile.versions);
        assert_eq!(params.ciphers, profile.ciphers);
    }

    #[test]
    fn missing_certificate_fails_even_with_valid_key() {
        let dir = tempfile::tempdir().unwrap();
        let (_, key_path) = write_test_credential(dir.path());

        let profile = TlsSettings::from_paths(dir.path().join("absent.pem"), key_path);

        assert!(matches!(
            profile.negotiation_params(),
            Err(TlsError::CertificateLoad { .. })
        ));
    }

    #[test]
    fn certificate_file_without_certificates_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (_, key_path) = write_test_credential(dir.path());

        let empty = dir.path().join("empty.pem");
        std::fs::write(&empty, "").unwrap();

        let profile = TlsSettings::from_paths(empty, key_path);

        assert!(matches!(
            profile.negotiation_params(),
            Err(TlsError::EmptyCertificate { .. })
        ));
    }

    #[test]
    fn garbage_key_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (cert_path, _) = write_test_credential(dir.path());

        let garbage = dir.path().join("garbage.pem");
        std::fs::write(&garbage, "not a key").unwrap();

        let profile = TlsSettings::from_paths(cert_path, garbage);

        assert!(matches!(
            profile.negotiation_params(),
            Err(TlsError::KeyLoad { .. })
        ));
    }

    #[test]
    fn derivation_rereads_disk_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let (cert_path, key_path) = write_test_credential(dir.path());

        let profile = TlsSettings::from_paths(&cert_path, &key_path);
        profile.negotiation_params().unwrap();

        // A success is never cached: removing the certificate makes the next
        // derivation fail.
        std::fs::remove_file(&cert_path).unwrap();
        assert!(matches!(
            profile.negotiation_params(),
            Err(TlsError::CertificateLoad { .. })
        ));
    }
}
