use serde::de;
use serde::{Deserialize, Serialize};

use crate::int31::{INT31_MAX, Int31};

impl Serialize for Int31 {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u32(self.inner())
    }
}

impl<'de> Deserialize<'de> for Int31 {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let v = u32::deserialize(d)?;
        Int31::new(v).ok_or_else(|| {
            de::Error::invalid_value(
                de::Unexpected::Unsigned(v as u64),
                &format!("an integer at most {INT31_MAX}").as_str(),
            )
        })
    }
}
