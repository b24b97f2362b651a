use diesel::{Insertable, Queryable, Selectable};

use crate::schema::usuarios;

#[derive(Clone, Debug, PartialEq, Eq, Insertable)]
#[diesel(table_name = usuarios)]
pub(crate) struct UserInsert {
    pub(crate) email: String,
    pub(crate) nome: String,
    /// Argon2 PHC string, never the raw password.
    pub(crate) senha: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = usuarios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct User {
    pub(crate) id_usuario: i32,
    pub(crate) email: String,
    pub(crate) nome: String,
    pub(crate) senha: String,
}
