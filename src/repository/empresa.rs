//! Repository implementation for companies.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::empresa::{Empresa, NewEmpresa, UpdateEmpresa};
use crate::domain::types::{EmpresaId, Rut, Status};
use crate::models::empresa::{
    Empresa as DbEmpresa, NewEmpresa as DbNewEmpresa, UpdateEmpresa as DbUpdateEmpresa,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, EmpresaReader, EmpresaWriter};

impl EmpresaReader for DieselRepository {
    fn get_empresa_by_id(&self, id: EmpresaId) -> RepositoryResult<Option<Empresa>> {
        use crate::schema::empresas;

        let mut conn = self.conn()?;
        let db_empresa = empresas::table
            .find(id.get())
            .first::<DbEmpresa>(&mut conn)
            .optional()?;

        db_empresa
            .map(|empresa| Empresa::try_from(empresa).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_empresa_by_rut(&self, rut: &Rut) -> RepositoryResult<Option<Empresa>> {
        use crate::schema::empresas;

        let mut conn = self.conn()?;
        let db_empresa = empresas::table
            .filter(empresas::rut.eq(rut.as_str()))
            .first::<DbEmpresa>(&mut conn)
            .optional()?;

        db_empresa
            .map(|empresa| Empresa::try_from(empresa).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_empresas(&self) -> RepositoryResult<Vec<Empresa>> {
        use crate::schema::empresas;

        let mut conn = self.conn()?;
        empresas::table
            .order(empresas::id.asc())
            .load::<DbEmpresa>(&mut conn)?
            .into_iter()
            .map(|empresa| Empresa::try_from(empresa).map_err(RepositoryError::from))
            .collect()
    }
}

impl EmpresaWriter for DieselRepository {
    fn create_empresa(&self, new_empresa: &NewEmpresa) -> RepositoryResult<Empresa> {
        use crate::schema::empresas;

        let mut conn = self.conn()?;
        let db_new_empresa: DbNewEmpresa = new_empresa.into();

        let db_empresa = diesel::insert_into(empresas::table)
            .values(&db_new_empresa)
            .get_result::<DbEmpresa>(&mut conn)?;

        Ok(Empresa::try_from(db_empresa)?)
    }

    fn update_empresa(&self, id: EmpresaId, updates: &UpdateEmpresa) -> RepositoryResult<Empresa> {
        use crate::schema::empresas;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateEmpresa::new(updates, Utc::now().naive_utc());

        let db_empresa = diesel::update(empresas::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbEmpresa>(&mut conn)?;

        Ok(Empresa::try_from(db_empresa)?)
    }

    fn set_empresa_status(&self, id: EmpresaId, status: Status) -> RepositoryResult<Empresa> {
        use crate::schema::empresas;

        let mut conn = self.conn()?;
        let db_empresa = diesel::update(empresas::table.find(id.get()))
            .set((
                empresas::status.eq(status.as_str()),
                empresas::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbEmpresa>(&mut conn)?;

        Ok(Empresa::try_from(db_empresa)?)
    }
}
