//! Services behind the passengers page.

use std::collections::HashMap;

use crate::domain::pasajero::{NewPasajero, Pasajero};
use crate::domain::types::{ConvenioId, EmpresaId, PasajeroId};
use crate::dto::ListQuery;
use crate::dto::pasajeros::{PasajeroRow, PasajerosPageData};
use crate::forms::FieldErrors;
use crate::forms::pasajero::AddPasajeroForm;
use crate::repository::{ConvenioReader, EmpresaReader, PasajeroReader, PasajeroWriter};
use crate::services::{ServiceError, ServiceResult, conflict_on_duplicate};

const DUPLICATE_RUT: &str = "Ya existe un pasajero con ese RUT";

/// Resolves the company and agreement names shown next to each passenger.
fn rows<R>(repo: &R) -> ServiceResult<Vec<PasajeroRow>>
where
    R: PasajeroReader + EmpresaReader + ConvenioReader + ?Sized,
{
    let empresas: HashMap<EmpresaId, String> = repo
        .list_empresas()?
        .into_iter()
        .map(|empresa| (empresa.id, empresa.nombre.into_inner()))
        .collect();
    let convenios: HashMap<ConvenioId, String> = repo
        .list_convenios_with_empresa()?
        .into_iter()
        .map(|(convenio, _)| (convenio.id, convenio.nombre.into_inner()))
        .collect();

    Ok(repo
        .list_pasajeros()?
        .into_iter()
        .map(|pasajero| PasajeroRow {
            rut_formatted: pasajero.rut.formatted(),
            empresa_nombre: pasajero.empresa_id.and_then(|id| empresas.get(&id).cloned()),
            convenio_nombre: pasajero
                .convenio_id
                .and_then(|id| convenios.get(&id).cloned()),
            pasajero,
        })
        .collect())
}

/// One page of passengers, searchable by e-mail, names or RUT.
pub fn list_pasajeros<R>(
    repo: &R,
    query: &ListQuery,
    default_limit: usize,
) -> ServiceResult<PasajerosPageData>
where
    R: PasajeroReader + EmpresaReader + ConvenioReader + ?Sized,
{
    let pasajeros = query.apply(rows(repo)?, default_limit).into_page();
    let empresas = repo
        .list_empresas()?
        .into_iter()
        .filter(|empresa| empresa.status.is_active())
        .collect();

    Ok(PasajerosPageData {
        pasajeros,
        search: query.search_term(),
        empresas,
    })
}

pub fn filtered_pasajeros<R>(repo: &R, search: Option<&str>) -> ServiceResult<Vec<PasajeroRow>>
where
    R: PasajeroReader + EmpresaReader + ConvenioReader + ?Sized,
{
    let state = ListQuery::new(search, None).apply(rows(repo)?, 1);
    Ok(state.filtered().cloned().collect())
}

/// Validates the registration modal and stores the passenger.
pub fn create_pasajero<R>(repo: &R, form: AddPasajeroForm) -> ServiceResult<Pasajero>
where
    R: PasajeroReader + PasajeroWriter + EmpresaReader + ?Sized,
{
    let new_pasajero = NewPasajero::try_from(form)?;

    if let Some(empresa_id) = new_pasajero.empresa_id {
        if repo.get_empresa_by_id(empresa_id)?.is_none() {
            let mut errors = FieldErrors::new();
            errors.add("empresa_id", "La empresa seleccionada no existe");
            return Err(ServiceError::Validation(errors));
        }
    }

    if repo.get_pasajero_by_rut(&new_pasajero.rut)?.is_some() {
        return Err(ServiceError::Conflict(DUPLICATE_RUT.to_string()));
    }

    let pasajero = repo
        .create_pasajero(&new_pasajero)
        .map_err(conflict_on_duplicate(DUPLICATE_RUT))?;
    log::info!("Registered pasajero {}", pasajero.id);
    Ok(pasajero)
}

pub fn toggle_pasajero_status<R>(repo: &R, id: i32) -> ServiceResult<Pasajero>
where
    R: PasajeroReader + PasajeroWriter + ?Sized,
{
    let id = PasajeroId::new(id)?;
    let pasajero = repo.get_pasajero_by_id(id)?.ok_or(ServiceError::NotFound)?;

    Ok(repo.set_pasajero_status(id, pasajero.status.toggled())?)
}
