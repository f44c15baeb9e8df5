//! Repository implementation for granted discounts.

use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::descuento::{Descuento, NewDescuento};
use crate::domain::pasajero::Pasajero;
use crate::domain::types::{DescuentoId, DiscountStatus};
use crate::models::descuento::{Descuento as DbDescuento, NewDescuento as DbNewDescuento};
use crate::models::pasajero::Pasajero as DbPasajero;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DescuentoReader, DescuentoWriter, DieselRepository};

impl DescuentoReader for DieselRepository {
    fn get_descuento_by_id(&self, id: DescuentoId) -> RepositoryResult<Option<Descuento>> {
        use crate::schema::descuentos;

        let mut conn = self.conn()?;
        let db_descuento = descuentos::table
            .find(id.get())
            .first::<DbDescuento>(&mut conn)
            .optional()?;

        db_descuento
            .map(|descuento| Descuento::try_from(descuento).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_descuentos_with_pasajero(&self) -> RepositoryResult<Vec<(Descuento, Pasajero)>> {
        use crate::schema::{descuentos, pasajeros};

        let mut conn = self.conn()?;
        let db_descuentos = descuentos::table
            .order(descuentos::id.asc())
            .load::<DbDescuento>(&mut conn)?;

        let pasajero_ids = db_descuentos
            .iter()
            .map(|descuento| descuento.pasajero_id)
            .collect::<Vec<i32>>();

        let pasajeros = pasajeros::table
            .filter(pasajeros::id.eq_any(pasajero_ids))
            .load::<DbPasajero>(&mut conn)?
            .into_iter()
            .map(|pasajero| Ok((pasajero.id, Pasajero::try_from(pasajero)?)))
            .collect::<RepositoryResult<HashMap<i32, Pasajero>>>()?;

        db_descuentos
            .into_iter()
            .map(|descuento| {
                let pasajero = pasajeros
                    .get(&descuento.pasajero_id)
                    .cloned()
                    .ok_or(RepositoryError::NotFound)?;
                Ok((Descuento::try_from(descuento)?, pasajero))
            })
            .collect()
    }
}

impl DescuentoWriter for DieselRepository {
    fn create_descuento(&self, new_descuento: &NewDescuento) -> RepositoryResult<Descuento> {
        use crate::schema::descuentos;

        let mut conn = self.conn()?;
        let db_new_descuento: DbNewDescuento = new_descuento.into();

        let db_descuento = diesel::insert_into(descuentos::table)
            .values(&db_new_descuento)
            .get_result::<DbDescuento>(&mut conn)?;

        Ok(Descuento::try_from(db_descuento)?)
    }

    fn set_descuento_status(
        &self,
        id: DescuentoId,
        status: DiscountStatus,
    ) -> RepositoryResult<Descuento> {
        use crate::schema::descuentos;

        let mut conn = self.conn()?;
        let db_descuento = diesel::update(descuentos::table.find(id.get()))
            .set(descuentos::status.eq(status.as_str()))
            .get_result::<DbDescuento>(&mut conn)?;

        Ok(Descuento::try_from(db_descuento)?)
    }
}
