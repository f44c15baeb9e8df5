//! Services behind the agreements page and its discount-code panel.

use chrono::NaiveDate;

use crate::domain::codigo_descuento::{CodigoDescuento, NewCodigoDescuento};
use crate::domain::convenio::{ConsultationType, Convenio};
use crate::domain::types::{CodigoDescuentoId, ConvenioId};
use crate::dto::ListQuery;
use crate::dto::convenios::{
    CodigoRow, ConvenioRow, ConveniosPageData, ConveniosQuery, SelectedConvenio,
};
use crate::forms::FieldErrors;
use crate::forms::codigo_descuento::AddCodigoDescuentoForm;
use crate::forms::convenio::{AddConvenioForm, AddConvenioPayload};
use crate::pagination::Page;
use crate::repository::{
    CodigoDescuentoReader, CodigoDescuentoWriter, ConvenioReader, ConvenioWriter, EmpresaReader,
};
use crate::services::{ServiceError, ServiceResult, conflict_on_duplicate};

const DUPLICATE_CODE: &str = "Ya existe un código de descuento con ese valor";

fn field_error(field: &str, message: &str) -> ServiceError {
    let mut errors = FieldErrors::new();
    errors.add(field, message);
    ServiceError::Validation(errors)
}

fn convenio_rows<R>(repo: &R) -> ServiceResult<Vec<ConvenioRow>>
where
    R: ConvenioReader + ?Sized,
{
    Ok(repo
        .list_convenios_with_empresa()?
        .into_iter()
        .map(|(convenio, empresa)| ConvenioRow::new(convenio, &empresa))
        .collect())
}

/// One page of agreements, searchable by agreement or company name.
pub fn page_convenios<R>(
    repo: &R,
    query: &ListQuery,
    default_limit: usize,
) -> ServiceResult<Page<ConvenioRow>>
where
    R: ConvenioReader + ?Sized,
{
    Ok(query.apply(convenio_rows(repo)?, default_limit).into_page())
}

/// One page of the codes issued under `convenio_id`.
pub fn page_codigos<R>(
    repo: &R,
    convenio_id: i32,
    query: &ListQuery,
    default_limit: usize,
    today: NaiveDate,
) -> ServiceResult<Page<CodigoRow>>
where
    R: ConvenioReader + CodigoDescuentoReader + ?Sized,
{
    let convenio_id = ConvenioId::new(convenio_id)?;
    if repo.get_convenio_by_id(convenio_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let codigos = repo
        .list_codigos_by_convenio(convenio_id)?
        .into_iter()
        .map(|codigo| CodigoRow::new(codigo, today))
        .collect();

    Ok(query.apply(codigos, default_limit).into_page())
}

/// Loads the agreements table and, when one is selected, its codes panel.
pub fn list_convenios<R>(
    repo: &R,
    query: &ConveniosQuery,
    default_limit: usize,
    today: NaiveDate,
) -> ServiceResult<ConveniosPageData>
where
    R: EmpresaReader + ConvenioReader + CodigoDescuentoReader + ?Sized,
{
    let rows = convenio_rows(repo)?;

    let selected_row = query.convenio_id.and_then(|id| {
        let row = rows.iter().find(|row| row.convenio.id.get() == id).cloned();
        if row.is_none() {
            log::warn!("Selected convenio {id} does not exist");
        }
        row
    });

    let selected = match selected_row {
        Some(convenio) => {
            let codigos_query = query.codigos();
            let codigos = page_codigos(
                repo,
                convenio.convenio.id.get(),
                &codigos_query,
                default_limit,
                today,
            )?;
            Some(SelectedConvenio {
                convenio,
                codigos,
                codigo_search: codigos_query.search_term(),
            })
        }
        None => None,
    };

    let convenios_query = query.convenios();
    let empresas = repo
        .list_empresas()?
        .into_iter()
        .filter(|empresa| empresa.status.is_active())
        .collect();

    Ok(ConveniosPageData {
        search: convenios_query.search_term(),
        convenios: convenios_query.apply(rows, default_limit).into_page(),
        empresas,
        selected,
    })
}

/// Validates the creation modal and stores the agreement.
pub fn create_convenio<R>(repo: &R, form: AddConvenioForm) -> ServiceResult<Convenio>
where
    R: EmpresaReader + ConvenioWriter + ?Sized,
{
    let payload = AddConvenioPayload::try_from(form)?;

    if repo.get_empresa_by_id(payload.empresa_id)?.is_none() {
        return Err(field_error("empresa_id", "La empresa seleccionada no existe"));
    }

    let convenio = repo.create_convenio(&payload.into_domain())?;
    log::info!("Created convenio {} for empresa {}", convenio.id, convenio.empresa_id);
    Ok(convenio)
}

pub fn toggle_convenio_status<R>(repo: &R, id: i32) -> ServiceResult<Convenio>
where
    R: ConvenioReader + ConvenioWriter + ?Sized,
{
    let id = ConvenioId::new(id)?;
    let convenio = repo.get_convenio_by_id(id)?.ok_or(ServiceError::NotFound)?;

    Ok(repo.set_convenio_status(id, convenio.status.toggled())?)
}

/// Issues a new discount code.
///
/// The agreement must exist, be active and work with discount codes, and the
/// code itself must not be in use anywhere else.
pub fn create_codigo<R>(repo: &R, form: AddCodigoDescuentoForm) -> ServiceResult<CodigoDescuento>
where
    R: ConvenioReader + CodigoDescuentoReader + CodigoDescuentoWriter + ?Sized,
{
    let new_codigo = NewCodigoDescuento::try_from(form)?;

    let convenio = repo
        .get_convenio_by_id(new_codigo.convenio_id)?
        .ok_or_else(|| field_error("convenio_id", "El convenio seleccionado no existe"))?;
    if !convenio.status.is_active() {
        return Err(field_error("convenio_id", "El convenio está inactivo"));
    }
    if convenio.tipo_consulta != ConsultationType::CodigoDescuento {
        return Err(field_error(
            "convenio_id",
            "El convenio no admite códigos de descuento",
        ));
    }

    if repo.get_codigo_by_code(&new_codigo.codigo)?.is_some() {
        return Err(ServiceError::Conflict(DUPLICATE_CODE.to_string()));
    }

    let codigo = repo
        .create_codigo(&new_codigo)
        .map_err(conflict_on_duplicate(DUPLICATE_CODE))?;
    log::info!("Issued code {} under convenio {}", codigo.codigo, codigo.convenio_id);
    Ok(codigo)
}

pub fn toggle_codigo_status<R>(repo: &R, id: i32) -> ServiceResult<CodigoDescuento>
where
    R: CodigoDescuentoReader + CodigoDescuentoWriter + ?Sized,
{
    let id = CodigoDescuentoId::new(id)?;
    let codigo = repo.get_codigo_by_id(id)?.ok_or(ServiceError::NotFound)?;

    Ok(repo.set_codigo_status(id, codigo.status.toggled())?)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::Status;
    use crate::repository::mock::MockRepository;
    use crate::services::fixtures;

    fn today() -> NaiveDate {
        fixtures::date(2025, 6, 1)
    }

    fn codigo_form(convenio_id: i32) -> AddCodigoDescuentoForm {
        AddCodigoDescuentoForm {
            convenio_id,
            codigo: "invierno25".into(),
            fecha_inicio: "2025-06-01".into(),
            fecha_termino: "2025-08-31".into(),
            max_usos: None,
        }
    }

    fn repo_with_convenios() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_list_convenios_with_empresa().returning(|| {
            Ok(vec![
                (
                    fixtures::convenio(1, 1, "Convenio Salud"),
                    fixtures::empresa(1, "Clínica Norte"),
                ),
                (
                    fixtures::convenio(2, 2, "Convenio Minero"),
                    fixtures::empresa(2, "Minera Sur"),
                ),
            ])
        });
        repo.expect_list_empresas().returning(|| {
            let mut inactive = fixtures::empresa(2, "Minera Sur");
            inactive.status = Status::Inactivo;
            Ok(vec![fixtures::empresa(1, "Clínica Norte"), inactive])
        });
        repo
    }

    #[test]
    fn search_matches_company_name() {
        let repo = repo_with_convenios();
        let query = ConveniosQuery {
            search: Some("minera".into()),
            ..ConveniosQuery::default()
        };

        let data = list_convenios(&repo, &query, 10, today()).unwrap();
        assert_eq!(data.convenios.pagination.total, 1);
        assert_eq!(data.convenios.items[0].convenio.nombre.as_str(), "Convenio Minero");
        assert_eq!(data.empresas.len(), 1);
        assert!(data.selected.is_none());
    }

    #[test]
    fn selected_convenio_loads_its_codes() {
        let mut repo = repo_with_convenios();
        repo.expect_get_convenio_by_id()
            .returning(|_| Ok(Some(fixtures::convenio(1, 1, "Convenio Salud"))));
        repo.expect_list_codigos_by_convenio()
            .withf(|id| id.get() == 1)
            .returning(|_| {
                Ok(vec![
                    fixtures::codigo(1, 1, "SALUD10", 95),
                    fixtures::codigo(2, 1, "SALUD20", 10),
                ])
            });
        let query = ConveniosQuery {
            convenio_id: Some(1),
            codigo_search: Some("salud2".into()),
            ..ConveniosQuery::default()
        };

        let data = list_convenios(&repo, &query, 10, today()).unwrap();
        let selected = data.selected.unwrap();
        assert_eq!(selected.codigos.pagination.total, 1);
        assert_eq!(selected.codigos.items[0].codigo.codigo.as_str(), "SALUD20");
        assert_eq!(selected.codigos.items[0].usage_class, "bg-success");
        assert!(selected.codigos.items[0].vigente);
        assert_eq!(selected.codigo_search, "salud2");
    }

    #[test]
    fn codes_require_an_active_code_agreement() {
        let mut repo = MockRepository::new();
        repo.expect_get_convenio_by_id().returning(|_| {
            let mut convenio = fixtures::convenio(5, 1, "Convenio Lista");
            convenio.tipo_consulta = ConsultationType::Other("LISTA_BLANCA".into());
            Ok(Some(convenio))
        });
        repo.expect_create_codigo().times(0);

        match create_codigo(&repo, codigo_form(5)) {
            Err(ServiceError::Validation(fields)) => assert!(fields.contains("convenio_id")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn inactive_agreement_rejects_codes() {
        let mut repo = MockRepository::new();
        repo.expect_get_convenio_by_id().returning(|_| {
            let mut convenio = fixtures::convenio(5, 1, "Convenio Pausado");
            convenio.status = Status::Inactivo;
            Ok(Some(convenio))
        });
        repo.expect_create_codigo().times(0);

        assert!(matches!(
            create_codigo(&repo, codigo_form(5)),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn duplicate_code_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_convenio_by_id()
            .returning(|_| Ok(Some(fixtures::convenio(5, 1, "Convenio"))));
        repo.expect_get_codigo_by_code()
            .returning(|_| Ok(Some(fixtures::codigo(1, 3, "INVIERNO25", 0))));
        repo.expect_create_codigo().times(0);

        assert!(matches!(
            create_codigo(&repo, codigo_form(5)),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn valid_code_is_stored_uppercased() {
        let mut repo = MockRepository::new();
        repo.expect_get_convenio_by_id()
            .returning(|_| Ok(Some(fixtures::convenio(5, 1, "Convenio"))));
        repo.expect_get_codigo_by_code().returning(|_| Ok(None));
        repo.expect_create_codigo()
            .withf(|new| new.codigo.as_str() == "INVIERNO25" && new.max_usos.get() == 100)
            .returning(|_| Ok(fixtures::codigo(7, 5, "INVIERNO25", 0)));

        let codigo = create_codigo(&repo, codigo_form(5)).unwrap();
        assert_eq!(codigo.id.get(), 7);
    }

    #[test]
    fn convenio_needs_existing_company() {
        let mut repo = MockRepository::new();
        repo.expect_get_empresa_by_id().returning(|_| Ok(None));
        repo.expect_create_convenio().times(0);

        let form = AddConvenioForm {
            empresa_id: 8,
            nombre: "Convenio".into(),
            tipo_consulta: None,
            tope_monto_ventas: None,
        };
        match create_convenio(&repo, form) {
            Err(ServiceError::Validation(fields)) => assert!(fields.contains("empresa_id")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn codes_page_for_unknown_agreement_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_convenio_by_id().returning(|_| Ok(None));
        repo.expect_list_codigos_by_convenio().times(0);

        assert!(matches!(
            page_codigos(&repo, 3, &ListQuery::default(), 10, today()),
            Err(ServiceError::NotFound)
        ));
    }
}
