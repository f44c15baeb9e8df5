//! Services behind the discounts page.

use crate::domain::descuento::Descuento;
use crate::domain::types::{DescuentoId, DiscountStatus};
use crate::dto::ListQuery;
use crate::dto::descuentos::{DescuentoDetails, DescuentoRow, DescuentosPageData};
use crate::repository::{ConvenioReader, DescuentoReader, DescuentoWriter, PasajeroReader};
use crate::services::{ServiceError, ServiceResult};

fn rows<R>(repo: &R) -> ServiceResult<Vec<DescuentoRow>>
where
    R: DescuentoReader + ?Sized,
{
    Ok(repo
        .list_descuentos_with_pasajero()?
        .into_iter()
        .map(|(descuento, pasajero)| DescuentoRow::new(descuento, &pasajero))
        .collect())
}

/// One page of discounts, searchable by the passenger's names or RUT.
pub fn list_descuentos<R>(
    repo: &R,
    query: &ListQuery,
    default_limit: usize,
) -> ServiceResult<DescuentosPageData>
where
    R: DescuentoReader + ?Sized,
{
    Ok(DescuentosPageData {
        search: query.search_term(),
        descuentos: query.apply(rows(repo)?, default_limit).into_page(),
    })
}

pub fn filtered_descuentos<R>(repo: &R, search: Option<&str>) -> ServiceResult<Vec<DescuentoRow>>
where
    R: DescuentoReader + ?Sized,
{
    let state = ListQuery::new(search, None).apply(rows(repo)?, 1);
    Ok(state.filtered().cloned().collect())
}

/// Loads the discount with its passenger and agreement for the details modal.
pub fn get_descuento<R>(repo: &R, id: i32) -> ServiceResult<DescuentoDetails>
where
    R: DescuentoReader + PasajeroReader + ConvenioReader + ?Sized,
{
    let descuento = repo
        .get_descuento_by_id(DescuentoId::new(id)?)?
        .ok_or(ServiceError::NotFound)?;
    let pasajero = repo
        .get_pasajero_by_id(descuento.pasajero_id)?
        .ok_or(ServiceError::NotFound)?;
    let convenio = repo.get_convenio_by_id(descuento.convenio_id)?;

    Ok(DescuentoDetails {
        descuento,
        pasajero,
        convenio,
    })
}

/// Activates or deactivates a discount. Expired discounts stay expired.
pub fn toggle_descuento_status<R>(repo: &R, id: i32) -> ServiceResult<Descuento>
where
    R: DescuentoReader + DescuentoWriter + ?Sized,
{
    let id = DescuentoId::new(id)?;
    let descuento = repo.get_descuento_by_id(id)?.ok_or(ServiceError::NotFound)?;

    if descuento.status == DiscountStatus::Vencido {
        return Err(ServiceError::Conflict(
            "Un descuento vencido no puede reactivarse".to_string(),
        ));
    }

    Ok(repo.set_descuento_status(id, descuento.status.toggled())?)
}
