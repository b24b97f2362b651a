use chrono::NaiveDateTime;
use diesel::{Queryable, Selectable};
use serde::Serialize;

use crate::schema::saude_pet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Queryable, Selectable)]
#[diesel(table_name = saude_pet)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HealthRecord {
    pub(crate) id: i32,
    pub(crate) id_pet: i32,
    pub(crate) vacinas: String,
    pub(crate) medicamentos: String,
    pub(crate) doencas: String,
    pub(crate) ultima_atualizacao: Option<NaiveDateTime>,
}
