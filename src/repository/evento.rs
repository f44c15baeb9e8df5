//! Repository implementation for ticketing events.
//!
//! Unlike the other listings, events are filtered, sorted and paged by the
//! database itself: the table grows with every sale and is never loaded in
//! full.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::convenio::Convenio;
use crate::domain::empresa::Empresa;
use crate::domain::evento::{Evento, NewEvento};
use crate::domain::pasajero::Pasajero;
use crate::domain::types::EventoId;
use crate::list_query::PaginationState;
use crate::models::convenio::Convenio as DbConvenio;
use crate::models::empresa::Empresa as DbEmpresa;
use crate::models::evento::{Evento as DbEvento, NewEvento as DbNewEvento};
use crate::models::pasajero::Pasajero as DbPasajero;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, EventoListQuery, EventoReader, EventoSortField, EventoWithRelations,
    EventoWriter, SortOrder,
};
use crate::schema::eventos;

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Applies every filter of `query` to a fresh boxed select.
fn filtered_eventos(query: &EventoListQuery) -> eventos::BoxedQuery<'static, Sqlite> {
    let mut items = eventos::table.into_boxed();

    if let Some(tipo_evento) = query.tipo_evento {
        items = items.filter(eventos::tipo_evento.eq(tipo_evento.as_str()));
    }
    if let Some(empresa_id) = query.empresa_id {
        items = items.filter(eventos::empresa_id.eq(empresa_id.get()));
    }
    if let Some(pasajero_id) = query.pasajero_id {
        items = items.filter(eventos::pasajero_id.eq(pasajero_id.get()));
    }
    if let Some(convenio_id) = query.convenio_id {
        items = items.filter(eventos::convenio_id.eq(convenio_id.get()));
    }
    if let Some(desde) = query.fecha_inicio {
        items = items.filter(eventos::fecha_viaje.ge(start_of_day(desde)));
    }
    // Inclusive upper bound: everything before the next midnight.
    if let Some(next_day) = query.fecha_fin.and_then(|hasta| hasta.succ_opt()) {
        items = items.filter(eventos::fecha_viaje.lt(start_of_day(next_day)));
    }

    items
}

fn sorted(
    items: eventos::BoxedQuery<'static, Sqlite>,
    sort_by: EventoSortField,
    order: SortOrder,
) -> eventos::BoxedQuery<'static, Sqlite> {
    let items = match (sort_by, order) {
        (EventoSortField::FechaViaje, SortOrder::Asc) => items.order(eventos::fecha_viaje.asc()),
        (EventoSortField::FechaViaje, SortOrder::Desc) => items.order(eventos::fecha_viaje.desc()),
        (EventoSortField::MontoPagado, SortOrder::Asc) => items.order(eventos::monto_pagado.asc()),
        (EventoSortField::MontoPagado, SortOrder::Desc) => {
            items.order(eventos::monto_pagado.desc())
        }
        (EventoSortField::CreatedAt, SortOrder::Asc) => items.order(eventos::created_at.asc()),
        (EventoSortField::CreatedAt, SortOrder::Desc) => items.order(eventos::created_at.desc()),
    };

    match order {
        SortOrder::Asc => items.then_order_by(eventos::id.asc()),
        SortOrder::Desc => items.then_order_by(eventos::id.desc()),
    }
}

impl DieselRepository {
    /// Loads the passengers, companies and agreements referenced by `db_eventos`.
    fn attach_relations(
        &self,
        db_eventos: Vec<DbEvento>,
    ) -> RepositoryResult<Vec<EventoWithRelations>> {
        use crate::schema::{convenios, empresas, pasajeros};

        let mut conn = self.conn()?;

        let pasajero_ids: Vec<i32> = db_eventos.iter().map(|e| e.pasajero_id).collect();
        let empresa_ids: Vec<i32> = db_eventos.iter().map(|e| e.empresa_id).collect();
        let convenio_ids: Vec<i32> = db_eventos.iter().filter_map(|e| e.convenio_id).collect();

        let pasajeros = pasajeros::table
            .filter(pasajeros::id.eq_any(pasajero_ids))
            .load::<DbPasajero>(&mut conn)?
            .into_iter()
            .map(|pasajero| Ok((pasajero.id, Pasajero::try_from(pasajero)?)))
            .collect::<RepositoryResult<HashMap<i32, Pasajero>>>()?;

        let empresas = empresas::table
            .filter(empresas::id.eq_any(empresa_ids))
            .load::<DbEmpresa>(&mut conn)?
            .into_iter()
            .map(|empresa| Ok((empresa.id, Empresa::try_from(empresa)?)))
            .collect::<RepositoryResult<HashMap<i32, Empresa>>>()?;

        let convenios = convenios::table
            .filter(convenios::id.eq_any(convenio_ids))
            .load::<DbConvenio>(&mut conn)?
            .into_iter()
            .map(|convenio| Ok((convenio.id, Convenio::try_from(convenio)?)))
            .collect::<RepositoryResult<HashMap<i32, Convenio>>>()?;

        db_eventos
            .into_iter()
            .map(|db_evento| {
                let pasajero = pasajeros
                    .get(&db_evento.pasajero_id)
                    .cloned()
                    .ok_or(RepositoryError::NotFound)?;
                let empresa = empresas
                    .get(&db_evento.empresa_id)
                    .cloned()
                    .ok_or(RepositoryError::NotFound)?;
                let convenio = db_evento
                    .convenio_id
                    .and_then(|id| convenios.get(&id).cloned());

                Ok(EventoWithRelations {
                    evento: Evento::try_from(db_evento)?,
                    pasajero,
                    empresa,
                    convenio,
                })
            })
            .collect()
    }
}

impl EventoReader for DieselRepository {
    fn get_evento_by_id(&self, id: EventoId) -> RepositoryResult<Option<EventoWithRelations>> {
        let db_evento = {
            let mut conn = self.conn()?;
            eventos::table
                .find(id.get())
                .first::<DbEvento>(&mut conn)
                .optional()?
        };

        match db_evento {
            Some(db_evento) => Ok(self.attach_relations(vec![db_evento])?.into_iter().next()),
            None => Ok(None),
        }
    }

    fn list_eventos(
        &self,
        query: &EventoListQuery,
    ) -> RepositoryResult<(usize, Vec<EventoWithRelations>)> {
        let (total, rows) = {
            let mut conn = self.conn()?;

            let total = filtered_eventos(query)
                .count()
                .get_result::<i64>(&mut conn)?;
            let total = usize::try_from(total).unwrap_or_default();

            if total == 0 {
                return Ok((0, Vec::new()));
            }
            // Out-of-range pages are clamped rather than returned empty.
            let pagination = PaginationState::new(query.page, query.limit, total);

            let rows = sorted(filtered_eventos(query), query.sort_by, query.order)
                .limit(pagination.limit as i64)
                .offset(pagination.offset() as i64)
                .load::<DbEvento>(&mut conn)?;

            (total, rows)
        };

        Ok((total, self.attach_relations(rows)?))
    }
}

impl EventoWriter for DieselRepository {
    fn create_evento(&self, new_evento: &NewEvento) -> RepositoryResult<Evento> {
        let mut conn = self.conn()?;
        let db_new_evento: DbNewEvento = new_evento.into();

        let db_evento = diesel::insert_into(eventos::table)
            .values(&db_new_evento)
            .get_result::<DbEvento>(&mut conn)?;

        Ok(Evento::try_from(db_evento)?)
    }
}
