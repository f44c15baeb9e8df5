//! Repository implementation for company agreements.

use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::convenio::{Convenio, NewConvenio};
use crate::domain::empresa::Empresa;
use crate::domain::types::{ConvenioId, Status};
use crate::models::convenio::{Convenio as DbConvenio, NewConvenio as DbNewConvenio};
use crate::models::empresa::Empresa as DbEmpresa;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ConvenioReader, ConvenioWriter, DieselRepository};

impl ConvenioReader for DieselRepository {
    fn get_convenio_by_id(&self, id: ConvenioId) -> RepositoryResult<Option<Convenio>> {
        use crate::schema::convenios;

        let mut conn = self.conn()?;
        let db_convenio = convenios::table
            .find(id.get())
            .first::<DbConvenio>(&mut conn)
            .optional()?;

        db_convenio
            .map(|convenio| Convenio::try_from(convenio).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_convenios_with_empresa(&self) -> RepositoryResult<Vec<(Convenio, Empresa)>> {
        use crate::schema::{convenios, empresas};

        let mut conn = self.conn()?;
        let db_convenios = convenios::table
            .order(convenios::id.asc())
            .load::<DbConvenio>(&mut conn)?;

        let empresa_ids = db_convenios
            .iter()
            .map(|convenio| convenio.empresa_id)
            .collect::<Vec<i32>>();

        let empresas = empresas::table
            .filter(empresas::id.eq_any(empresa_ids))
            .load::<DbEmpresa>(&mut conn)?
            .into_iter()
            .map(|empresa| Ok((empresa.id, Empresa::try_from(empresa)?)))
            .collect::<RepositoryResult<HashMap<i32, Empresa>>>()?;

        db_convenios
            .into_iter()
            .map(|convenio| {
                let empresa = empresas
                    .get(&convenio.empresa_id)
                    .cloned()
                    .ok_or(RepositoryError::NotFound)?;
                Ok((Convenio::try_from(convenio)?, empresa))
            })
            .collect()
    }
}

impl ConvenioWriter for DieselRepository {
    fn create_convenio(&self, new_convenio: &NewConvenio) -> RepositoryResult<Convenio> {
        use crate::schema::convenios;

        let mut conn = self.conn()?;
        let db_new_convenio: DbNewConvenio = new_convenio.into();

        let db_convenio = diesel::insert_into(convenios::table)
            .values(&db_new_convenio)
            .get_result::<DbConvenio>(&mut conn)?;

        Ok(Convenio::try_from(db_convenio)?)
    }

    fn set_convenio_status(&self, id: ConvenioId, status: Status) -> RepositoryResult<Convenio> {
        use crate::schema::convenios;

        let mut conn = self.conn()?;
        let db_convenio = diesel::update(convenios::table.find(id.get()))
            .set((
                convenios::status.eq(status.as_str()),
                convenios::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbConvenio>(&mut conn)?;

        Ok(Convenio::try_from(db_convenio)?)
    }
}
