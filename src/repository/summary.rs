use diesel::prelude::*;

use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, EntityCounts, SummaryReader};

fn as_count(value: i64) -> usize {
    usize::try_from(value).unwrap_or_default()
}

impl SummaryReader for DieselRepository {
    fn count_entities(&self) -> RepositoryResult<EntityCounts> {
        use crate::schema::{
            codigos_descuento, convenios, descuentos, empresas, eventos, pasajeros,
        };

        let mut conn = self.conn()?;

        Ok(EntityCounts {
            empresas: as_count(empresas::table.count().get_result(&mut conn)?),
            convenios: as_count(convenios::table.count().get_result(&mut conn)?),
            codigos_descuento: as_count(codigos_descuento::table.count().get_result(&mut conn)?),
            pasajeros: as_count(pasajeros::table.count().get_result(&mut conn)?),
            descuentos: as_count(descuentos::table.count().get_result(&mut conn)?),
            eventos: as_count(eventos::table.count().get_result(&mut conn)?),
        })
    }
}
