//! Repository implementation for passengers.

use diesel::prelude::*;

use crate::domain::pasajero::{NewPasajero, Pasajero};
use crate::domain::types::{PasajeroId, Rut, Status};
use crate::models::pasajero::{NewPasajero as DbNewPasajero, Pasajero as DbPasajero};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, PasajeroReader, PasajeroWriter};

impl PasajeroReader for DieselRepository {
    fn get_pasajero_by_id(&self, id: PasajeroId) -> RepositoryResult<Option<Pasajero>> {
        use crate::schema::pasajeros;

        let mut conn = self.conn()?;
        let db_pasajero = pasajeros::table
            .find(id.get())
            .first::<DbPasajero>(&mut conn)
            .optional()?;

        db_pasajero
            .map(|pasajero| Pasajero::try_from(pasajero).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_pasajero_by_rut(&self, rut: &Rut) -> RepositoryResult<Option<Pasajero>> {
        use crate::schema::pasajeros;

        let mut conn = self.conn()?;
        let db_pasajero = pasajeros::table
            .filter(pasajeros::rut.eq(rut.as_str()))
            .first::<DbPasajero>(&mut conn)
            .optional()?;

        db_pasajero
            .map(|pasajero| Pasajero::try_from(pasajero).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_pasajeros(&self) -> RepositoryResult<Vec<Pasajero>> {
        use crate::schema::pasajeros;

        let mut conn = self.conn()?;
        pasajeros::table
            .order(pasajeros::id.asc())
            .load::<DbPasajero>(&mut conn)?
            .into_iter()
            .map(|pasajero| Pasajero::try_from(pasajero).map_err(RepositoryError::from))
            .collect()
    }
}

impl PasajeroWriter for DieselRepository {
    fn create_pasajero(&self, new_pasajero: &NewPasajero) -> RepositoryResult<Pasajero> {
        use crate::schema::pasajeros;

        let mut conn = self.conn()?;
        let db_new_pasajero: DbNewPasajero = new_pasajero.into();

        let db_pasajero = diesel::insert_into(pasajeros::table)
            .values(&db_new_pasajero)
            .get_result::<DbPasajero>(&mut conn)?;

        Ok(Pasajero::try_from(db_pasajero)?)
    }

    fn set_pasajero_status(&self, id: PasajeroId, status: Status) -> RepositoryResult<Pasajero> {
        use crate::schema::pasajeros;

        let mut conn = self.conn()?;
        let db_pasajero = diesel::update(pasajeros::table.find(id.get()))
            .set(pasajeros::status.eq(status.as_str()))
            .get_result::<DbPasajero>(&mut conn)?;

        Ok(Pasajero::try_from(db_pasajero)?)
    }
}
