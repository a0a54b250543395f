use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// A fixed-size hash, written as lowercase hex in snapshots.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<const N: usize>(pub [u8; N]);

impl<const N: usize> Id<N> {
    pub fn as_string(&self) -> String {
        hex::encode(self.0)
    }
}

impl<const N: usize> std::fmt::Debug for Id<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x?}", byte)?;
        }
        Ok(())
    }
}

impl<const N: usize> std::fmt::Display for Id<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl<const N: usize> FromStr for Id<N> {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; N];
        if s.len() != N * 2 {
            anyhow::bail!("expected a hex string of length {}", N * 2)
        };
        hex::decode_to_slice(s, &mut out)?;
        Ok(Id(out))
    }
}

impl<const N: usize> Serialize for Id<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Id<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor<const N: usize>;

        impl<const N: usize> serde::de::Visitor<'_> for IdVisitor<N> {
            type Value = Id<N>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "a hex string of length {}", N * 2)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v.len() != N * 2 {
                    return Err(E::invalid_length(v.len(), &self));
                }
                let mut out = [0u8; N];
                match hex::decode_to_slice(v, &mut out) {
                    Ok(_) => Ok(Id(out)),
                    Err(e) => Err(E::custom(e)),
                }
            }
        }

        deserializer.deserialize_str(IdVisitor::<N>)
    }
}

/// A 20-byte torrent info hash.
pub type Id20 = Id<20>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const HASH: &str = "a621779b5e3d486e127c3efbca9b6f8d135f52e5";

    #[test]
    fn test_id20_from_str() {
        let id = Id20::from_str(HASH).unwrap();
        assert_eq!(id.as_string(), HASH);
        assert_eq!(format!("{id}"), HASH);
    }

    #[test]
    fn test_id20_from_str_wrong_length() {
        assert!(Id20::from_str("a621").is_err());
    }

    #[test]
    fn test_id20_json() {
        let id: Id20 = serde_json::from_str(&format!("\"{HASH}\"")).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{HASH}\""));
        assert!(serde_json::from_str::<Id20>("\"zz\"").is_err());
    }
}
