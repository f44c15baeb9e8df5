use chrono::NaiveDate;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::codigo_descuento::{CodigoDescuento, NewCodigoDescuento};
use crate::domain::convenio::{Convenio, NewConvenio};
use crate::domain::descuento::{Descuento, NewDescuento};
use crate::domain::empresa::{Empresa, NewEmpresa, UpdateEmpresa};
use crate::domain::evento::{EventType, Evento, NewEvento};
use crate::domain::pasajero::{NewPasajero, Pasajero};
use crate::domain::types::{
    CodigoDescuentoId, ConvenioId, DescuentoId, DiscountCode, DiscountStatus, EmpresaId, EventoId,
    PasajeroId, Rut, Status,
};
use crate::repository::errors::RepositoryResult;

pub mod codigo_descuento;
pub mod convenio;
pub mod descuento;
pub mod empresa;
pub mod errors;
pub mod evento;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod pasajero;
pub mod summary;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventoSortField {
    #[default]
    FechaViaje,
    MontoPagado,
    CreatedAt,
}

impl EventoSortField {
    /// Parses the `sort_by` query value; unknown fields fall back to the default.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("monto_pagado") => EventoSortField::MontoPagado,
            Some("created_at") => EventoSortField::CreatedAt,
            _ => EventoSortField::FechaViaje,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EventoSortField::FechaViaje => "fecha_viaje",
            EventoSortField::MontoPagado => "monto_pagado",
            EventoSortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|order| order.trim().to_ascii_uppercase()).as_deref() {
            Some("ASC") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Server-side filters, ordering and paging for the events listing.
#[derive(Debug, Clone, PartialEq)]
pub struct EventoListQuery {
    pub tipo_evento: Option<EventType>,
    pub empresa_id: Option<EmpresaId>,
    pub pasajero_id: Option<PasajeroId>,
    pub convenio_id: Option<ConvenioId>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub sort_by: EventoSortField,
    pub order: SortOrder,
    pub page: usize,
    pub limit: usize,
}

impl EventoListQuery {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            tipo_evento: None,
            empresa_id: None,
            pasajero_id: None,
            convenio_id: None,
            fecha_inicio: None,
            fecha_fin: None,
            sort_by: EventoSortField::default(),
            order: SortOrder::default(),
            page,
            limit,
        }
    }

    pub fn tipo_evento(mut self, tipo_evento: EventType) -> Self {
        self.tipo_evento = Some(tipo_evento);
        self
    }

    pub fn empresa(mut self, empresa_id: EmpresaId) -> Self {
        self.empresa_id = Some(empresa_id);
        self
    }

    pub fn pasajero(mut self, pasajero_id: PasajeroId) -> Self {
        self.pasajero_id = Some(pasajero_id);
        self
    }

    pub fn convenio(mut self, convenio_id: ConvenioId) -> Self {
        self.convenio_id = Some(convenio_id);
        self
    }

    /// Restricts travel dates to `[desde, hasta]`, both ends inclusive.
    pub fn between(mut self, desde: Option<NaiveDate>, hasta: Option<NaiveDate>) -> Self {
        self.fecha_inicio = desde;
        self.fecha_fin = hasta;
        self
    }

    pub fn sort(mut self, sort_by: EventoSortField, order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.order = order;
        self
    }
}

/// An event together with the records it references.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EventoWithRelations {
    pub evento: Evento,
    pub pasajero: Pasajero,
    pub empresa: Empresa,
    pub convenio: Option<Convenio>,
}

/// Row counts shown on the dashboard home page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct EntityCounts {
    pub empresas: usize,
    pub convenios: usize,
    pub codigos_descuento: usize,
    pub pasajeros: usize,
    pub descuentos: usize,
    pub eventos: usize,
}

pub trait EmpresaReader {
    fn get_empresa_by_id(&self, id: EmpresaId) -> RepositoryResult<Option<Empresa>>;
    fn get_empresa_by_rut(&self, rut: &Rut) -> RepositoryResult<Option<Empresa>>;
    fn list_empresas(&self) -> RepositoryResult<Vec<Empresa>>;
}

pub trait EmpresaWriter {
    fn create_empresa(&self, new_empresa: &NewEmpresa) -> RepositoryResult<Empresa>;
    fn update_empresa(&self, id: EmpresaId, updates: &UpdateEmpresa) -> RepositoryResult<Empresa>;
    fn set_empresa_status(&self, id: EmpresaId, status: Status) -> RepositoryResult<Empresa>;
}

pub trait ConvenioReader {
    fn get_convenio_by_id(&self, id: ConvenioId) -> RepositoryResult<Option<Convenio>>;
    /// Every agreement paired with the company that signed it.
    fn list_convenios_with_empresa(&self) -> RepositoryResult<Vec<(Convenio, Empresa)>>;
}

pub trait ConvenioWriter {
    fn create_convenio(&self, new_convenio: &NewConvenio) -> RepositoryResult<Convenio>;
    fn set_convenio_status(&self, id: ConvenioId, status: Status) -> RepositoryResult<Convenio>;
}

pub trait CodigoDescuentoReader {
    fn get_codigo_by_id(&self, id: CodigoDescuentoId) -> RepositoryResult<Option<CodigoDescuento>>;
    fn get_codigo_by_code(&self, code: &DiscountCode) -> RepositoryResult<Option<CodigoDescuento>>;
    fn list_codigos_by_convenio(
        &self,
        convenio_id: ConvenioId,
    ) -> RepositoryResult<Vec<CodigoDescuento>>;
}

pub trait CodigoDescuentoWriter {
    fn create_codigo(&self, new_codigo: &NewCodigoDescuento) -> RepositoryResult<CodigoDescuento>;
    fn set_codigo_status(
        &self,
        id: CodigoDescuentoId,
        status: Status,
    ) -> RepositoryResult<CodigoDescuento>;
}

pub trait PasajeroReader {
    fn get_pasajero_by_id(&self, id: PasajeroId) -> RepositoryResult<Option<Pasajero>>;
    fn get_pasajero_by_rut(&self, rut: &Rut) -> RepositoryResult<Option<Pasajero>>;
    fn list_pasajeros(&self) -> RepositoryResult<Vec<Pasajero>>;
}

pub trait PasajeroWriter {
    fn create_pasajero(&self, new_pasajero: &NewPasajero) -> RepositoryResult<Pasajero>;
    fn set_pasajero_status(&self, id: PasajeroId, status: Status) -> RepositoryResult<Pasajero>;
}

pub trait DescuentoReader {
    fn get_descuento_by_id(&self, id: DescuentoId) -> RepositoryResult<Option<Descuento>>;
    /// Every discount paired with the passenger it was granted to.
    fn list_descuentos_with_pasajero(&self) -> RepositoryResult<Vec<(Descuento, Pasajero)>>;
}

pub trait DescuentoWriter {
    fn create_descuento(&self, new_descuento: &NewDescuento) -> RepositoryResult<Descuento>;
    fn set_descuento_status(
        &self,
        id: DescuentoId,
        status: DiscountStatus,
    ) -> RepositoryResult<Descuento>;
}

pub trait EventoReader {
    fn get_evento_by_id(&self, id: EventoId) -> RepositoryResult<Option<EventoWithRelations>>;
    /// Returns the number of matching events and the requested page of them.
    fn list_eventos(
        &self,
        query: &EventoListQuery,
    ) -> RepositoryResult<(usize, Vec<EventoWithRelations>)>;
}

pub trait EventoWriter {
    fn create_evento(&self, new_evento: &NewEvento) -> RepositoryResult<Evento>;
}

pub trait SummaryReader {
    fn count_entities(&self) -> RepositoryResult<EntityCounts>;
}
