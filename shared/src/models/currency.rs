//! Currency Model

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Currencies handled by the register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Currency {
    #[default]
    Usd,
    Usdt,
    Peso,
    /// Pesos received by bank transfer, counted apart from cash pesos
    PesoTransferencia,
    Real,
    Guarani,
}

impl Currency {
    /// Every currency, in display order
    pub const ALL: [Currency; 6] = [
        Currency::Usd,
        Currency::Usdt,
        Currency::Peso,
        Currency::PesoTransferencia,
        Currency::Real,
        Currency::Guarani,
    ];

    /// Wire code (`USD`, `PESO_TRANSFERENCIA`, ...)
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Usdt => "USDT",
            Currency::Peso => "PESO",
            Currency::PesoTransferencia => "PESO_TRANSFERENCIA",
            Currency::Real => "REAL",
            Currency::Guarani => "GUARANI",
        }
    }

    const fn slot(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error for an unrecognised currency code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}

/// A total map from [`Currency`] to `T`.
///
/// There is always exactly one slot per currency. On the wire it is a JSON
/// object with all six currency keys; partial objects are accepted and the
/// missing keys take `T::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyMap<T>([T; 6]);

impl<T> CurrencyMap<T> {
    /// Build a map by evaluating `f` once per currency
    pub fn from_fn(mut f: impl FnMut(Currency) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Currency::ALL[i])))
    }

    /// Iterate `(currency, value)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Currency, &T)> {
        Currency::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Default> Default for CurrencyMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Currency> for CurrencyMap<T> {
    type Output = T;

    fn index(&self, currency: Currency) -> &T {
        &self.0[currency.slot()]
    }
}

impl<T> IndexMut<Currency> for CurrencyMap<T> {
    fn index_mut(&mut self, currency: Currency) -> &mut T {
        &mut self.0[currency.slot()]
    }
}

impl<T: Serialize> Serialize for CurrencyMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Currency::ALL.len()))?;
        for (currency, value) in self.iter() {
            map.serialize_entry(&currency, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for CurrencyMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut partial: HashMap<Currency, T> = HashMap::deserialize(deserializer)?;
        Ok(Self::from_fn(|c| partial.remove(&c).unwrap_or_default()))
    }
}
