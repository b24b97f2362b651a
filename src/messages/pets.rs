use base64::prelude::{Engine, BASE64_STANDARD};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::{AsChangeset, Insertable};
use serde::{Deserialize, Serialize};

use super::{check_length, explicit};
use crate::database::CarouselRow;

/// `NUMERIC(10, 2)` leaves eight digits before the decimal point.
const MAX_WEIGHT: i64 = 100_000_000;

#[derive(Clone, Debug, PartialEq, Deserialize, Insertable)]
#[diesel(table_name = crate::schema::pets)]
pub(crate) struct PetPayload {
    pub(crate) nome: String,
    #[serde(default, rename = "dataNasc")]
    pub(crate) data_nasc: Option<NaiveDate>,
    pub(crate) tipo: String,
    #[serde(default)]
    pub(crate) cor: Option<String>,
    #[serde(default)]
    pub(crate) peso: Option<BigDecimal>,
    #[serde(default)]
    pub(crate) raca: Option<String>,
    #[serde(default)]
    pub(crate) sexo: Option<String>,
    pub(crate) id_usuario: i32,
}

impl PetPayload {
    pub(crate) fn validate(&self) -> Result<(), String> {
        check_length("nome", &self.nome, 45)?;
        check_length("tipo", &self.tipo, 45)?;
        validate_optional(
            self.cor.as_deref(),
            self.raca.as_deref(),
            self.sexo.as_deref(),
            self.peso.as_ref(),
        )
    }
}

/// Partial update of a pet. Absent fields are skipped by the changeset; an
/// explicit `null` clears a nullable column.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, AsChangeset)]
#[diesel(table_name = crate::schema::pets)]
pub(crate) struct PetUpdate {
    pub(crate) nome: Option<String>,
    #[serde(default, rename = "dataNasc", deserialize_with = "explicit")]
    pub(crate) data_nasc: Option<Option<NaiveDate>>,
    pub(crate) tipo: Option<String>,
    #[serde(default, deserialize_with = "explicit")]
    pub(crate) cor: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub(crate) peso: Option<Option<BigDecimal>>,
    #[serde(default, deserialize_with = "explicit")]
    pub(crate) raca: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit")]
    pub(crate) sexo: Option<Option<String>>,
    pub(crate) id_usuario: Option<i32>,
}

impl PetUpdate {
    /// Diesel refuses to build an `UPDATE` without assignments.
    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if let Some(nome) = &self.nome {
            check_length("nome", nome, 45)?;
        }
        if let Some(tipo) = &self.tipo {
            check_length("tipo", tipo, 45)?;
        }
        validate_optional(
            self.cor.as_ref().and_then(|cor| cor.as_deref()),
            self.raca.as_ref().and_then(|raca| raca.as_deref()),
            self.sexo.as_ref().and_then(|sexo| sexo.as_deref()),
            self.peso.as_ref().and_then(Option::as_ref),
        )
    }
}

fn validate_optional(
    cor: Option<&str>,
    raca: Option<&str>,
    sexo: Option<&str>,
    peso: Option<&BigDecimal>,
) -> Result<(), String> {
    if let Some(cor) = cor {
        check_length("cor", cor, 45)?;
    }
    if let Some(raca) = raca {
        check_length("raca", raca, 45)?;
    }
    if let Some(sexo) = sexo {
        check_length("sexo", sexo, 10)?;
    }
    if let Some(peso) = peso {
        if peso.abs() >= BigDecimal::from(MAX_WEIGHT) {
            return Err(format!("peso: deve ser menor que {MAX_WEIGHT}"));
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default)]
    pub(crate) skip: u32,
    #[serde(default = "PageQuery::default_limit")]
    pub(crate) limit: u32,
}

impl PageQuery {
    const fn default_limit() -> u32 {
        100
    }
}

/// Flattened pet view with its photo inlined as base64.
#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct CarouselEntry {
    pub(crate) id: i32,
    pub(crate) nome: String,
    pub(crate) raca: Option<String>,
    pub(crate) tipo: String,
    pub(crate) sexo: Option<String>,
    pub(crate) peso: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub(crate) data_nascimento: Option<String>,
    pub(crate) cor: Option<String>,
    pub(crate) imagem: Option<String>,
    pub(crate) tipo_arquivo: Option<String>,
}

impl From<CarouselRow> for CarouselEntry {
    fn from(row: CarouselRow) -> Self {
        let pet = row.pet;

        Self {
            id: pet.id_pet,
            nome: pet.nome,
            raca: pet.raca,
            tipo: pet.tipo,
            sexo: pet.sexo,
            peso: pet.peso.map(|peso| peso.to_string()),
            data_nascimento: pet.data_nasc.map(|date| date.format("%Y-%m-%d").to_string()),
            cor: pet.cor,
            imagem: row
                .foto
                .filter(|bytes| !bytes.is_empty())
                .map(|bytes| BASE64_STANDARD.encode(bytes)),
            tipo_arquivo: row.tipo_arquivo,
        }
    }
}
