use crate::{ReadonlySet, SymmetricMultiMap};
use core::{
    fmt,
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};
use serde::{
    de::{SeqAccess, Visitor},
    ser::{SerializeSeq, Serializer},
    Deserializer, {Deserialize, Serialize},
};

pub(crate) struct SymmetricMultiMapVisitor<T, S> {
    marker: PhantomData<fn() -> SymmetricMultiMap<T, S>>,
}

impl<T, S> SymmetricMultiMapVisitor<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    fn new() -> Self {
        SymmetricMultiMapVisitor {
            marker: PhantomData,
        }
    }
}

impl<'de, T, S> Visitor<'de> for SymmetricMultiMapVisitor<T, S>
where
    T: Deserialize<'de> + Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    type Value = SymmetricMultiMap<T, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of associated pairs")
    }

    fn visit_seq<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: SeqAccess<'de>,
    {
        // Each pair introduces at most two elements
        let capacity = access.size_hint().unwrap_or(0).saturating_mul(2);
        let mut map: SymmetricMultiMap<T, S> =
            SymmetricMultiMap::with_capacity_and_hasher(capacity, Default::default());

        while let Some((key, value)) = access.next_element::<(T, T)>()? {
            map.insert(key, value);
        }

        Ok(map)
    }
}

impl<'de, T, S> Deserialize<'de> for SymmetricMultiMap<T, S>
where
    T: Deserialize<'de> + Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SymmetricMultiMapVisitor::<T, S>::new())
    }
}

impl<T, H> Serialize for SymmetricMultiMap<T, H>
where
    T: Serialize + Eq + Hash,
    H: BuildHasher,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;

        for pair in self.pairs() {
            seq.serialize_element(&pair)?;
        }

        seq.end()
    }
}

impl<T, H> Serialize for ReadonlySet<'_, T, H>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;

        for value in self.iter() {
            seq.serialize_element(value)?;
        }

        seq.end()
    }
}
