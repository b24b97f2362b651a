use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::{Insertable, Queryable, Selectable};
use serde::Serialize;

use crate::schema::{diarios, pets};

/// Field order follows the `pets` table so the row can be loaded from
/// `pets::all_columns` in joins.
#[derive(Clone, Debug, PartialEq, Serialize, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct Pet {
    pub(crate) id_pet: i32,
    pub(crate) nome: String,
    #[serde(rename = "dataNasc")]
    pub(crate) data_nasc: Option<NaiveDate>,
    pub(crate) tipo: String,
    pub(crate) cor: Option<String>,
    pub(crate) peso: Option<BigDecimal>,
    pub(crate) raca: Option<String>,
    pub(crate) sexo: Option<String>,
    pub(crate) id_foto: Option<i32>,
    pub(crate) id_usuario: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Insertable)]
#[diesel(table_name = diarios)]
pub(crate) struct DiaryInsert {
    pub(crate) id_pet: i32,
    pub(crate) conteudo: String,
}

impl DiaryInsert {
    pub(crate) fn empty(id_pet: i32) -> Self {
        Self {
            id_pet,
            conteudo: String::new(),
        }
    }
}

/// A pet joined with its photo, if it has one.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CarouselRow {
    pub(crate) pet: Pet,
    pub(crate) foto: Option<Vec<u8>>,
    pub(crate) tipo_arquivo: Option<String>,
}
