//! Compression codec discovery and negotiation.
//!
//! Which codecs exist is a property of the build: the `zstd` and `lz4` cargo
//! features compile the respective codecs in. At construction the registry
//! probes that set once, picks a single active codec for new writes in a
//! fixed priority order (zstd, then lz4, then none), and never changes its
//! mind afterwards. The accepted set for reads is everything compiled in
//! plus `none`, regardless of which codec is active.

use std::fmt;

use crate::error::{StoreError, StoreResult};

/// Compression level handed to zstd, matching its common default.
#[cfg(feature = "zstd")]
const ZSTD_LEVEL: i32 = 3;

/// The closed set of compression tags a record may name.
///
/// Every variant exists in every build; whether a variant's codec is
/// usable is a separate question answered by [`CodecRegistry::accepts`].
/// That split keeps "tag outside the enumeration" and "tag known but codec
/// missing" distinguishable errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    Zstd,
    Lz4,
}

impl Compression {
    /// The tag as written on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Zstd => "zstd",
            Self::Lz4 => "lz4",
        }
    }

    /// Parse a wire tag; `None` for anything outside the enumeration.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "zstd" => Some(Self::Zstd),
            "lz4" => Some(Self::Lz4),
            _ => None,
        }
    }

    /// Returns `true` if this build carries the codec.
    fn compiled_in(self) -> bool {
        match self {
            Self::None => true,
            Self::Zstd => cfg!(feature = "zstd"),
            Self::Lz4 => cfg!(feature = "lz4"),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write preference, strongest codec first. `none` is the implicit floor.
const PRIORITY: &[Compression] = &[Compression::Zstd, Compression::Lz4];

/// Immutable record of which codecs this process may use.
///
/// Construct once and pass to the store; there is no global instance. The
/// outcome of negotiation is deterministic for a given build, which is what
/// makes round-trip tests reproducible.
#[derive(Clone, Debug)]
pub struct CodecRegistry {
    active: Compression,
    accepted: Vec<Compression>,
}

impl CodecRegistry {
    /// Probe the build for codecs and pick the active one by priority.
    pub fn detect() -> Self {
        let accepted = Self::compiled_set();
        let active = PRIORITY
            .iter()
            .copied()
            .find(|c| c.compiled_in())
            .unwrap_or(Compression::None);
        tracing::debug!(active = %active, "compression codec selected");
        Self { active, accepted }
    }

    /// A registry writing with a specific codec; the accepted set stays the
    /// full compiled set. Fails if the codec is not compiled in.
    pub fn forced(active: Compression) -> StoreResult<Self> {
        if !active.compiled_in() {
            return Err(StoreError::UnsupportedCodec(active));
        }
        Ok(Self {
            active,
            accepted: Self::compiled_set(),
        })
    }

    /// A registry that pretends only `accepted` (plus `none`) exist, for
    /// tests simulating builds that lack a codec.
    pub fn restricted(accepted: &[Compression]) -> Self {
        let accepted: Vec<Compression> = Self::compiled_set()
            .into_iter()
            .filter(|c| *c == Compression::None || accepted.contains(c))
            .collect();
        let active = PRIORITY
            .iter()
            .copied()
            .find(|c| accepted.contains(c))
            .unwrap_or(Compression::None);
        Self { active, accepted }
    }

    fn compiled_set() -> Vec<Compression> {
        let mut set = vec![Compression::None];
        set.extend(PRIORITY.iter().copied().filter(|c| c.compiled_in()));
        set
    }

    /// The codec used for new writes. Stable for the registry's lifetime.
    pub fn active(&self) -> Compression {
        self.active
    }

    /// Returns `true` if records with this tag can be read back.
    ///
    /// Always true for `none`; true for a codec independent of whether it is
    /// the active one.
    pub fn accepts(&self, tag: Compression) -> bool {
        self.accepted.contains(&tag)
    }

    /// Every tag this registry accepts.
    pub fn accepted(&self) -> &[Compression] {
        &self.accepted
    }

    /// Compress `data` with the named codec. `none` is the identity.
    pub fn compress(&self, tag: Compression, data: &[u8]) -> StoreResult<Vec<u8>> {
        if !self.accepts(tag) {
            return Err(StoreError::UnsupportedCodec(tag));
        }
        match tag {
            Compression::None => Ok(data.to_vec()),
            #[cfg(feature = "zstd")]
            Compression::Zstd => Ok(zstd::encode_all(data, ZSTD_LEVEL)?),
            #[cfg(feature = "lz4")]
            Compression::Lz4 => Ok(lz4_flex::compress_prepend_size(data)),
            // Reachable only in builds missing a codec feature.
            #[allow(unreachable_patterns)]
            other => Err(StoreError::UnsupportedCodec(other)),
        }
    }

    /// Decompress `data` written under the named codec.
    pub fn decompress(&self, tag: Compression, data: &[u8]) -> StoreResult<Vec<u8>> {
        if !self.accepts(tag) {
            return Err(StoreError::UnsupportedCodec(tag));
        }
        match tag {
            Compression::None => Ok(data.to_vec()),
            #[cfg(feature = "zstd")]
            Compression::Zstd => {
                zstd::decode_all(data).map_err(|e| StoreError::Decompression(e.to_string()))
            }
            #[cfg(feature = "lz4")]
            Compression::Lz4 => lz4_flex::decompress_size_prepended(data)
                .map_err(|e| StoreError::Decompression(e.to_string())),
            // Reachable only in builds missing a codec feature.
            #[allow(unreachable_patterns)]
            other => Err(StoreError::UnsupportedCodec(other)),
        }
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_is_deterministic() {
        let a = CodecRegistry::detect();
        let b = CodecRegistry::detect();
        assert_eq!(a.active(), b.active());
        assert_eq!(a.accepted(), b.accepted());
    }

    #[test]
    fn none_is_always_accepted_and_identity() {
        let registry = CodecRegistry::restricted(&[]);
        assert_eq!(registry.active(), Compression::None);
        assert!(registry.accepts(Compression::None));
        let data = b"identity".to_vec();
        assert_eq!(registry.compress(Compression::None, &data).unwrap(), data);
        assert_eq!(registry.decompress(Compression::None, &data).unwrap(), data);
    }

    #[test]
    fn every_accepted_codec_round_trips() {
        let registry = CodecRegistry::detect();
        let data: Vec<u8> = (0..2048u32).flat_map(|i| (i % 251).to_be_bytes()).collect();
        for tag in registry.accepted().to_vec() {
            let compressed = registry.compress(tag, &data).unwrap();
            assert_eq!(registry.decompress(tag, &compressed).unwrap(), data);
        }
    }

    #[cfg(feature = "zstd")]
    #[test]
    fn zstd_wins_priority_when_compiled_in() {
        assert_eq!(CodecRegistry::detect().active(), Compression::Zstd);
    }

    #[cfg(feature = "lz4")]
    #[test]
    fn restricted_registry_rejects_excluded_codec() {
        let registry = CodecRegistry::restricted(&[Compression::Lz4]);
        assert_eq!(registry.active(), Compression::Lz4);
        assert!(!registry.accepts(Compression::Zstd));
        let err = registry.decompress(Compression::Zstd, b"whatever").unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedCodec(Compression::Zstd)));
    }

    #[test]
    fn accepted_is_superset_of_active() {
        let registry = CodecRegistry::detect();
        assert!(registry.accepts(registry.active()));
    }

    #[cfg(feature = "zstd")]
    #[test]
    fn corrupt_compressed_payload_fails_cleanly() {
        let registry = CodecRegistry::detect();
        let err = registry
            .decompress(Compression::Zstd, b"not zstd data")
            .unwrap_err();
        assert!(matches!(err, StoreError::Decompression(_)));
    }

    #[test]
    fn tags_round_trip_through_text() {
        for tag in [Compression::None, Compression::Zstd, Compression::Lz4] {
            assert_eq!(Compression::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(Compression::parse("xz"), None);
        assert_eq!(Compression::parse(""), None);
    }
}
