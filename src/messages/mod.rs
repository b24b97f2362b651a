pub(crate) mod health;
pub(crate) mod pets;
pub(crate) mod users;

use serde::{Deserialize, Deserializer};

/// Wraps any present value, including `null`, in `Some` so that an explicit
/// `null` can be told apart from an absent field when paired with
/// `#[serde(default)]`.
pub(crate) fn explicit<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Mirrors the `VARCHAR(max)` limit of the backing column.
pub(crate) fn check_length(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{field}: no máximo {max} caracteres"));
    }

    Ok(())
}
