// Copyright 2021 the numeric-rs authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Serde support: strings for human-readable formats, the binary encoding
//! otherwise.

use crate::buf::Buf;
use crate::numeric::Numeric;
use serde::{de, ser};
use std::convert::TryFrom;
use std::fmt;

impl<const N: usize, const D: u32> ser::Serialize for Numeric<N, D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            let mut buf = Buf::new();
            self.encode(&mut buf).map_err(ser::Error::custom)?;
            serializer.serialize_bytes(buf.as_slice())
        }
    }
}

struct NumericVisitor<const N: usize, const D: u32>;

impl<'de, const N: usize, const D: u32> de::Visitor<'de> for NumericVisitor<N, D> {
    type Value = Numeric<N, D>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a numeric value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(de::Error::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Numeric::decode(v).map_err(de::Error::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Numeric::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Numeric::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Numeric::try_from(v).map_err(de::Error::custom)
    }
}

impl<'de, const N: usize, const D: u32> de::Deserialize<'de> for Numeric<N, D> {
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: de::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(NumericVisitor)
        } else {
            deserializer.deserialize_bytes(NumericVisitor)
        }
    }
}
