//! Services behind the ticketing events page.
//!
//! Events are paged by the repository; this module only turns the raw filter
//! bar values into an [`EventoListQuery`].

use chrono::NaiveDate;

use crate::domain::evento::EventType;
use crate::domain::types::{ConvenioId, EmpresaId, EventoId, PasajeroId, TypeConstraintError};
use crate::dto::eventos::{EventosPageData, EventosQuery};
use crate::forms::{DATE_FORMAT, non_blank};
use crate::list_query::PaginationState;
use crate::pagination::{Page, clamp_limit};
use crate::repository::{
    EmpresaReader, EventoListQuery, EventoReader, EventoSortField, EventoWithRelations, SortOrder,
};
use crate::services::{ServiceError, ServiceResult};

fn parse_id<T>(value: &Option<String>, build: fn(i32) -> Result<T, TypeConstraintError>) -> Option<T> {
    let raw = non_blank(value)?;
    match raw.parse::<i32>().ok().map(build) {
        Some(Ok(id)) => Some(id),
        _ => {
            log::debug!("Ignoring invalid id filter {raw:?}");
            None
        }
    }
}

fn parse_date(value: &Option<String>) -> Option<NaiveDate> {
    let raw = non_blank(value)?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .inspect_err(|_| log::debug!("Ignoring invalid date filter {raw:?}"))
        .ok()
}

/// Converts the filter bar into a repository query.
///
/// Unparseable filters are dropped instead of failing the whole page.
pub fn build_query(params: &EventosQuery, default_limit: usize) -> EventoListQuery {
    let page = params.page.and_then(|page| usize::try_from(page).ok()).unwrap_or(1);
    let limit = clamp_limit(params.limit, default_limit);

    let mut query = EventoListQuery::new(page.max(1), limit)
        .between(parse_date(&params.fecha_inicio), parse_date(&params.fecha_fin))
        .sort(
            EventoSortField::parse(params.sort_by.as_deref()),
            SortOrder::parse(params.order.as_deref()),
        );

    if let Some(tipo) = non_blank(&params.tipo_evento).and_then(|raw| raw.parse::<EventType>().ok())
    {
        query = query.tipo_evento(tipo);
    }
    if let Some(id) = parse_id(&params.empresa_id, EmpresaId::new) {
        query = query.empresa(id);
    }
    if let Some(id) = parse_id(&params.pasajero_id, PasajeroId::new) {
        query = query.pasajero(id);
    }
    if let Some(id) = parse_id(&params.convenio_id, ConvenioId::new) {
        query = query.convenio(id);
    }

    query
}

/// One page of events matching the filter bar.
pub fn page_eventos<R>(
    repo: &R,
    params: &EventosQuery,
    default_limit: usize,
) -> ServiceResult<Page<EventoWithRelations>>
where
    R: EventoReader + ?Sized,
{
    let query = build_query(params, default_limit);
    let (total, eventos) = repo.list_eventos(&query)?;

    Ok(Page::new(
        eventos,
        PaginationState::new(query.page, query.limit, total),
    ))
}

pub fn list_eventos<R>(
    repo: &R,
    params: EventosQuery,
    default_limit: usize,
) -> ServiceResult<EventosPageData>
where
    R: EventoReader + EmpresaReader + ?Sized,
{
    let eventos = page_eventos(repo, &params, default_limit)?;
    let empresas = repo.list_empresas()?;

    Ok(EventosPageData {
        eventos,
        filters: params,
        empresas,
    })
}

pub fn get_evento<R>(repo: &R, id: i32) -> ServiceResult<EventoWithRelations>
where
    R: EventoReader + ?Sized,
{
    repo.get_evento_by_id(EventoId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_ignored() {
        let params = EventosQuery {
            tipo_evento: Some("".into()),
            empresa_id: Some(" ".into()),
            fecha_inicio: Some("".into()),
            ..EventosQuery::default()
        };
        let query = build_query(&params, 10);
        assert_eq!(query, EventoListQuery::new(1, 10));
    }

    #[test]
    fn filters_are_parsed() {
        let params = EventosQuery {
            tipo_evento: Some("devolucion".into()),
            empresa_id: Some("4".into()),
            convenio_id: Some("abc".into()),
            fecha_inicio: Some("2025-02-01".into()),
            fecha_fin: Some("2025-02-28".into()),
            sort_by: Some("monto_pagado".into()),
            order: Some("asc".into()),
            page: Some(3),
            limit: Some(25),
            ..EventosQuery::default()
        };
        let query = build_query(&params, 10);

        assert_eq!(query.tipo_evento, Some(EventType::Devolucion));
        assert_eq!(query.empresa_id.map(EmpresaId::get), Some(4));
        assert_eq!(query.convenio_id, None);
        assert_eq!(query.fecha_inicio, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(query.fecha_fin, NaiveDate::from_ymd_opt(2025, 2, 28));
        assert_eq!(query.sort_by, EventoSortField::MontoPagado);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!((query.page, query.limit), (3, 25));
    }

    #[test]
    fn non_positive_pages_start_at_one() {
        let params = EventosQuery {
            page: Some(-4),
            ..EventosQuery::default()
        };
        assert_eq!(build_query(&params, 10).page, 1);
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::fixtures;

    fn with_relations(id: i32) -> EventoWithRelations {
        EventoWithRelations {
            evento: fixtures::evento(id, 1, 1),
            pasajero: fixtures::pasajero(1, "Ana", "Rojas"),
            empresa: fixtures::empresa(1, "Clínica Norte"),
            convenio: None,
        }
    }

    #[test]
    fn page_metadata_comes_from_repository_total() {
        let mut repo = MockRepository::new();
        repo.expect_list_eventos()
            .withf(|query| query.page == 2 && query.limit == 10)
            .returning(|_| Ok((25, (11..=20).map(with_relations).collect())));

        let params = EventosQuery {
            page: Some(2),
            ..EventosQuery::default()
        };
        let page = page_eventos(&repo, &params, 10).unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.pagination.total, 25);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_prev_page);
        assert!(page.pagination.has_next_page);
    }

    #[test]
    fn missing_event_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_evento_by_id().returning(|_| Ok(None));
        assert!(matches!(get_evento(&repo, 5), Err(ServiceError::NotFound)));
    }
}
