//! String forms for the rustls identifiers embedded in [`super::tls::TlsSettings`].
//!
//! rustls keeps protocol versions and cipher suites as wire identifiers with
//! no serde support, so configuration files spell them as strings and these
//! helpers translate in both directions.

/// `Vec<rustls::ProtocolVersion>` as a list of `"TLSv1.x"` strings (hex wire
/// identifiers such as `"0x0303"` are accepted on input).
pub mod protocol_version {
    use serde::ser::SerializeSeq;
    use tokio_rustls::rustls::ProtocolVersion;

    pub(crate) fn from_str(s: &str) -> Result<ProtocolVersion, String> {
        match s {
            "TLSv1.0" | "0x0301" => Ok(ProtocolVersion::TLSv1_0),
            "TLSv1.1" | "0x0302" => Ok(ProtocolVersion::TLSv1_1),
            "TLSv1.2" | "0x0303" => Ok(ProtocolVersion::TLSv1_2),
            "TLSv1.3" | "0x0304" => Ok(ProtocolVersion::TLSv1_3),
            _ => Err(format!("not a valid protocol version: '{s}'")),
        }
    }

    pub(crate) fn as_str(version: ProtocolVersion) -> Result<&'static str, String> {
        match version {
            ProtocolVersion::TLSv1_0 => Ok("TLSv1.0"),
            ProtocolVersion::TLSv1_1 => Ok("TLSv1.1"),
            ProtocolVersion::TLSv1_2 => Ok("TLSv1.2"),
            ProtocolVersion::TLSv1_3 => Ok("TLSv1.3"),
            other => Err(format!("protocol version has no string form: {other:?}")),
        }
    }

    pub fn serialize<S>(this: &[ProtocolVersion], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(this.len()))?;
        for version in this {
            seq.serialize_element(as_str(*version).map_err(serde::ser::Error::custom)?)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<ProtocolVersion>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Vec<String> as serde::Deserialize>::deserialize(deserializer)?
            .iter()
            .map(|s| from_str(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

/// `Vec<rustls::CipherSuite>` as a list of suite names, resolved against the
/// provider catalog so the accepted spellings track the linked rustls build.
pub mod cipher_suite {
    use serde::ser::SerializeSeq;
    use tokio_rustls::rustls::{CipherSuite, crypto::aws_lc_rs::ALL_CIPHER_SUITES};

    pub(crate) fn from_str(s: &str) -> Result<CipherSuite, String> {
        ALL_CIPHER_SUITES
            .iter()
            .map(|supported| supported.suite())
            .find(|suite| format!("{suite:?}") == s)
            .ok_or_else(|| format!("not a supported cipher suite: '{s}'"))
    }

    pub fn serialize<S>(this: &[CipherSuite], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(this.len()))?;
        for suite in this {
            seq.serialize_element(&format!("{suite:?}"))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<CipherSuite>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Vec<String> as serde::Deserialize>::deserialize(deserializer)?
            .iter()
            .map(|s| from_str(s).map_err(serde::de::Error::custom))
            .collect()
    }
}
