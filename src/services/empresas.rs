//! Services behind the companies page.

use crate::domain::empresa::Empresa;
use crate::domain::types::EmpresaId;
use crate::dto::ListQuery;
use crate::dto::empresas::{EmpresaRow, EmpresasPageData};
use crate::forms::empresa::{EmpresaForm, EmpresaPayload};
use crate::repository::{EmpresaReader, EmpresaWriter};
use crate::services::{ServiceError, ServiceResult, conflict_on_duplicate};

const DUPLICATE_RUT: &str = "Ya existe una empresa con ese RUT";

fn rows<R>(repo: &R) -> ServiceResult<Vec<EmpresaRow>>
where
    R: EmpresaReader + ?Sized,
{
    Ok(repo
        .list_empresas()?
        .into_iter()
        .map(EmpresaRow::from)
        .collect())
}

/// Loads one page of companies matching the search box.
pub fn list_empresas<R>(
    repo: &R,
    query: &ListQuery,
    default_limit: usize,
) -> ServiceResult<EmpresasPageData>
where
    R: EmpresaReader + ?Sized,
{
    let state = query.apply(rows(repo)?, default_limit);

    Ok(EmpresasPageData {
        search: query.search_term(),
        empresas: state.into_page(),
    })
}

/// Every company matching `search`, unpaginated, for exports.
pub fn filtered_empresas<R>(repo: &R, search: Option<&str>) -> ServiceResult<Vec<EmpresaRow>>
where
    R: EmpresaReader + ?Sized,
{
    let query = ListQuery::new(search, None);
    let state = query.apply(rows(repo)?, 1);
    Ok(state.filtered().cloned().collect())
}

pub fn get_empresa<R>(repo: &R, id: i32) -> ServiceResult<EmpresaRow>
where
    R: EmpresaReader + ?Sized,
{
    let empresa = repo
        .get_empresa_by_id(EmpresaId::new(id)?)?
        .ok_or(ServiceError::NotFound)?;
    Ok(EmpresaRow::from(empresa))
}

/// Validates the creation modal and stores the company.
pub fn create_empresa<R>(repo: &R, form: EmpresaForm) -> ServiceResult<Empresa>
where
    R: EmpresaReader + EmpresaWriter + ?Sized,
{
    let payload = EmpresaPayload::try_from(form)?;

    if repo.get_empresa_by_rut(&payload.rut)?.is_some() {
        return Err(ServiceError::Conflict(DUPLICATE_RUT.to_string()));
    }

    let empresa = repo
        .create_empresa(&payload.into_new())
        .map_err(conflict_on_duplicate(DUPLICATE_RUT))?;

    log::info!("Created empresa {} ({})", empresa.id, empresa.rut);
    Ok(empresa)
}

/// Applies the edit modal to an existing company.
pub fn update_empresa<R>(repo: &R, id: i32, form: EmpresaForm) -> ServiceResult<Empresa>
where
    R: EmpresaReader + EmpresaWriter + ?Sized,
{
    let id = EmpresaId::new(id)?;
    let payload = EmpresaPayload::try_from(form)?;

    if repo.get_empresa_by_id(id)?.is_none() {
        return Err(ServiceError::NotFound);
    }
    if repo
        .get_empresa_by_rut(&payload.rut)?
        .is_some_and(|other| other.id != id)
    {
        return Err(ServiceError::Conflict(DUPLICATE_RUT.to_string()));
    }

    Ok(repo
        .update_empresa(id, &payload.into_update())
        .map_err(conflict_on_duplicate(DUPLICATE_RUT))?)
}

/// Flips a company between active and inactive.
pub fn toggle_empresa_status<R>(repo: &R, id: i32) -> ServiceResult<Empresa>
where
    R: EmpresaReader + EmpresaWriter + ?Sized,
{
    let id = EmpresaId::new(id)?;
    let empresa = repo.get_empresa_by_id(id)?.ok_or(ServiceError::NotFound)?;

    Ok(repo.set_empresa_status(id, empresa.status.toggled())?)
}
