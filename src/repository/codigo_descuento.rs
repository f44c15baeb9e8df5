//! Repository implementation for discount codes.

use diesel::prelude::*;

use crate::domain::codigo_descuento::{CodigoDescuento, NewCodigoDescuento};
use crate::domain::types::{CodigoDescuentoId, ConvenioId, DiscountCode, Status};
use crate::models::codigo_descuento::{
    CodigoDescuento as DbCodigoDescuento, NewCodigoDescuento as DbNewCodigoDescuento,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CodigoDescuentoReader, CodigoDescuentoWriter, DieselRepository};

impl CodigoDescuentoReader for DieselRepository {
    fn get_codigo_by_id(&self, id: CodigoDescuentoId) -> RepositoryResult<Option<CodigoDescuento>> {
        use crate::schema::codigos_descuento;

        let mut conn = self.conn()?;
        let db_codigo = codigos_descuento::table
            .find(id.get())
            .first::<DbCodigoDescuento>(&mut conn)
            .optional()?;

        db_codigo
            .map(|codigo| CodigoDescuento::try_from(codigo).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_codigo_by_code(&self, code: &DiscountCode) -> RepositoryResult<Option<CodigoDescuento>> {
        use crate::schema::codigos_descuento;

        let mut conn = self.conn()?;
        let db_codigo = codigos_descuento::table
            .filter(codigos_descuento::codigo.eq(code.as_str()))
            .first::<DbCodigoDescuento>(&mut conn)
            .optional()?;

        db_codigo
            .map(|codigo| CodigoDescuento::try_from(codigo).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_codigos_by_convenio(
        &self,
        convenio_id: ConvenioId,
    ) -> RepositoryResult<Vec<CodigoDescuento>> {
        use crate::schema::codigos_descuento;

        let mut conn = self.conn()?;
        codigos_descuento::table
            .filter(codigos_descuento::convenio_id.eq(convenio_id.get()))
            .order(codigos_descuento::fecha_inicio.desc())
            .then_order_by(codigos_descuento::id.desc())
            .load::<DbCodigoDescuento>(&mut conn)?
            .into_iter()
            .map(|codigo| CodigoDescuento::try_from(codigo).map_err(RepositoryError::from))
            .collect()
    }
}

impl CodigoDescuentoWriter for DieselRepository {
    fn create_codigo(&self, new_codigo: &NewCodigoDescuento) -> RepositoryResult<CodigoDescuento> {
        use crate::schema::codigos_descuento;

        let mut conn = self.conn()?;
        let db_new_codigo: DbNewCodigoDescuento = new_codigo.into();

        let db_codigo = diesel::insert_into(codigos_descuento::table)
            .values(&db_new_codigo)
            .get_result::<DbCodigoDescuento>(&mut conn)?;

        Ok(CodigoDescuento::try_from(db_codigo)?)
    }

    fn set_codigo_status(
        &self,
        id: CodigoDescuentoId,
        status: Status,
    ) -> RepositoryResult<CodigoDescuento> {
        use crate::schema::codigos_descuento;

        let mut conn = self.conn()?;
        let db_codigo = diesel::update(codigos_descuento::table.find(id.get()))
            .set(codigos_descuento::status.eq(status.as_str()))
            .get_result::<DbCodigoDescuento>(&mut conn)?;

        Ok(CodigoDescuento::try_from(db_codigo)?)
    }
}
