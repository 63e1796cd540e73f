use crate::red_black_tree::{RedBlackMap, RedBlackMultiSet, RedBlackSet};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;

impl<T, U> Serialize for RedBlackMap<T, U>
where
    T: Serialize,
    U: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RedBlackMapVisitor<T, U> {
    marker: PhantomData<(T, U)>,
}

impl<'de, T, U> Visitor<'de> for RedBlackMapVisitor<T, U>
where
    T: Deserialize<'de> + Ord,
    U: Deserialize<'de>,
{
    type Value = RedBlackMap<T, U>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // the first occurrence of a repeated key wins
        let mut map = RedBlackMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value).map_err(de::Error::custom)?;
        }
        Ok(map)
    }
}

impl<'de, T, U> Deserialize<'de> for RedBlackMap<T, U>
where
    T: Deserialize<'de> + Ord,
    U: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RedBlackMapVisitor {
            marker: PhantomData,
        })
    }
}

macro_rules! impl_seq_serde {
    ($collection:ident, $visitor:ident, $expecting:expr) => {
        impl<T> Serialize for $collection<T>
        where
            T: Serialize,
        {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut seq = serializer.serialize_seq(Some(self.len()))?;
                for key in self {
                    seq.serialize_element(key)?;
                }
                seq.end()
            }
        }

        struct $visitor<T> {
            marker: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for $visitor<T>
        where
            T: Deserialize<'de> + Ord,
        {
            type Value = $collection<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str($expecting)
            }

            fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut collection = $collection::new();
                while let Some(key) = access.next_element()? {
                    collection.insert(key).map_err(de::Error::custom)?;
                }
                Ok(collection)
            }
        }

        impl<'de, T> Deserialize<'de> for $collection<T>
        where
            T: Deserialize<'de> + Ord,
        {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_seq($visitor {
                    marker: PhantomData,
                })
            }
        }
    };
}

impl_seq_serde!(RedBlackSet, RedBlackSetVisitor, "a sequence of unique keys");
impl_seq_serde!(RedBlackMultiSet, RedBlackMultiSetVisitor, "a sequence of keys");
