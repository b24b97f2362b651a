use diesel::AsChangeset;
use serde::Deserialize;

/// Fields left out of the request body keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, AsChangeset)]
#[diesel(table_name = crate::schema::saude_pet)]
pub(crate) struct HealthUpdate {
    pub(crate) vacinas: Option<String>,
    pub(crate) medicamentos: Option<String>,
    pub(crate) doencas: Option<String>,
}
