//! Public-API integration tests: a consuming server process building a
//! configuration, wiring hooks, and deriving handshake parameters.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use smtpd_core::{
    Decision, Port, SessionError, SessionHooks, Settings, TlsMode, TlsSettings,
};

#[test]
fn default_configuration_is_plaintext_and_permissive() {
    let settings = Settings::default();

    assert_eq!(settings.port, Port::Number(3001));
    assert_eq!(settings.timeout_secs, 1800);
    assert_eq!(settings.max_message_size, 32_000);
    assert!(settings.hostname.is_none());
    assert!(!settings.tls_optional());
    assert!(!settings.tls_required());
}

#[tokio::test]
async fn default_hooks_accept_every_envelope_step() {
    let settings = Settings::default();

    assert!(settings.hooks.on_hello(b"client.example.net").await.is_accepted());
    assert!(settings.hooks.on_mail_from("a@example.net").await.is_accepted());
    assert!(settings.hooks.on_rcpt_to("b@example.net").await.is_accepted());
}

#[tokio::test]
async fn custom_hooks_ride_along_with_the_configuration() {
    #[derive(Default)]
    struct Counting {
        opened: AtomicUsize,
        faults: AtomicUsize,
    }

    #[async_trait]
    impl SessionHooks for Counting {
        async fn on_open(&self) {
            self.opened.fetch_add(1, Ordering::SeqCst);
        }

        async fn on_mail_from(&self, sender: &str) -> Decision {
            if sender.is_empty() {
                Decision::reject("550 null sender refused")
            } else {
                Decision::Accept
            }
        }

        fn on_exception(&self, _fault: &SessionError) {
            self.faults.fetch_add(1, Ordering::SeqCst);
        }
    }

    let hooks = Arc::new(Counting::default());
    let settings = Settings::builder()
        .with_hostname("mx.example.org")
        .with_hooks(hooks.clone())
        .build();

    // The engine drives the configuration's hook object per connection.
    settings.hooks.on_open().await;
    settings.hooks.on_open().await;
    assert!(settings.hooks.on_mail_from("a@example.net").await.is_accepted());
    assert_eq!(
        settings.hooks.on_mail_from("").await,
        Decision::reject("550 null sender refused")
    );
    settings.hooks.on_exception(&SessionError::Shutdown);

    assert_eq!(hooks.opened.load(Ordering::SeqCst), 2);
    assert_eq!(hooks.faults.load(Ordering::SeqCst), 1);
}

#[test]
fn configuration_file_drives_tls_policy() {
    let settings: Settings = toml::from_str(
        r#"
        port = 465
        hostname = "mx.example.org"

        [tls]
        certificate = "/etc/smtpd/cert.pem"
        key = "/etc/smtpd/key.pem"
        "#,
    )
    .unwrap();

    // Mode defaults to required when a profile is present.
    assert!(settings.tls_required());
    assert!(!settings.tls_optional());
    assert_eq!(settings.port, Port::Number(465));
}

#[test]
fn derivation_works_from_a_configuration_built_at_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let generated = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();

    let cert_path = dir.path().join("cert.pem");
    let key_path = dir.path().join("key.pem");
    std::fs::write(&cert_path, generated.cert.pem()).unwrap();
    std::fs::write(&key_path, generated.key_pair.serialize_pem()).unwrap();

    let mut profile = TlsSettings::from_paths(cert_path, key_path);
    profile.mode = TlsMode::Opportunistic;

    let settings = Settings::builder().with_tls(profile).build();
    assert!(settings.tls_optional());

    let profile = settings.tls.as_ref().unwrap();
    let params = profile.negotiation_params().unwrap();

    assert_eq!(params.credential.cert.len(), 1);
    assert_eq!(params.versions, profile.versions);
    assert_eq!(params.ciphers, profile.ciphers);
}

#[test]
fn settings_serialize_without_the_hook_object() {
    let settings = Settings::builder()
        .with_port(2525_u16)
        .with_tls(TlsSettings::from_paths("cert.pem", "key.pem"))
        .build();

    let rendered = toml::to_string(&settings).unwrap();
    assert!(rendered.contains("port = 2525"));
    assert!(rendered.contains("certificate = \"cert.pem\""));
    assert!(!rendered.contains("hooks"));

    let reparsed: Settings = toml::from_str(&rendered).unwrap();
    assert_eq!(reparsed.port, settings.port);
    assert_eq!(reparsed.tls, settings.tls);
}
