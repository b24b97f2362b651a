use diesel::{Insertable, Queryable, Selectable};
use serde::Serialize;

use crate::schema::fotos;

#[derive(Clone, Debug, PartialEq, Eq, Insertable)]
#[diesel(table_name = fotos)]
pub(crate) struct PhotoInsert {
    pub(crate) foto: Vec<u8>,
    pub(crate) tipo_arquivo: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Queryable, Selectable)]
#[diesel(table_name = fotos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PhotoSummary {
    pub(crate) id_foto: i32,
    pub(crate) tipo_arquivo: String,
}
