use chrono::{NaiveDate, NaiveDateTime};
use convenios_dashboard::domain::codigo_descuento::NewCodigoDescuento;
use convenios_dashboard::domain::convenio::{ConsultationType, Convenio, NewConvenio};
use convenios_dashboard::domain::descuento::NewDescuento;
use convenios_dashboard::domain::empresa::{Empresa, NewEmpresa, UpdateEmpresa};
use convenios_dashboard::domain::evento::{EventType, NewEvento};
use convenios_dashboard::domain::pasajero::{NewPasajero, Pasajero, PassengerType};
use convenios_dashboard::domain::types::{
    CityName, ConvenioNombre, DiscountCode, DiscountStatus, EmpresaNombre, MaxUses, Percentage,
    PersonName, Rut, Status,
};
use convenios_dashboard::repository::errors::RepositoryError;
use convenios_dashboard::repository::{
    CodigoDescuentoReader, CodigoDescuentoWriter, ConvenioReader, ConvenioWriter,
    DescuentoReader, DescuentoWriter, DieselRepository, EmpresaReader, EmpresaWriter,
    EventoListQuery, EventoReader, EventoSortField, EventoWriter, PasajeroReader, PasajeroWriter,
    SortOrder, SummaryReader,
};

mod common;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
}

fn empresa(repo: &DieselRepository, nombre: &str, rut_body: u32) -> Empresa {
    repo.create_empresa(&NewEmpresa::new(
        EmpresaNombre::new(nombre).unwrap(),
        Rut::from_body(rut_body).unwrap(),
    ))
    .unwrap()
}

fn convenio(repo: &DieselRepository, empresa: &Empresa, nombre: &str) -> Convenio {
    repo.create_convenio(&NewConvenio::new(
        empresa.id,
        ConvenioNombre::new(nombre).unwrap(),
        ConsultationType::CodigoDescuento,
        Some(1_000_000),
    ))
    .unwrap()
}

fn pasajero(repo: &DieselRepository, rut_body: u32, nombres: &str, empresa: &Empresa) -> Pasajero {
    repo.create_pasajero(&NewPasajero {
        rut: Rut::from_body(rut_body).unwrap(),
        nombres: PersonName::new(nombres).unwrap(),
        apellidos: PersonName::new("Tapia").unwrap(),
        correo: None,
        telefono: None,
        fecha_nacimiento: Some(date(1990, 5, 4)),
        tipo_pasajero: PassengerType::Adulto,
        empresa_id: Some(empresa.id),
        convenio_id: None,
        status: Status::Activo,
    })
    .unwrap()
}

fn evento(
    repo: &DieselRepository,
    pasajero: &Pasajero,
    convenio: Option<&Convenio>,
    tipo: EventType,
    fecha_viaje: NaiveDateTime,
    monto_pagado: i64,
) {
    repo.create_evento(&NewEvento {
        tipo_evento: tipo,
        ciudad_origen: CityName::new("Santiago").unwrap(),
        ciudad_destino: CityName::new("Temuco").unwrap(),
        fecha_viaje,
        tarifa_base: monto_pagado,
        monto_pagado,
        porcentaje_descuento_aplicado: Percentage::new(0).unwrap(),
        pasajero_id: pasajero.id,
        empresa_id: pasajero.empresa_id.unwrap(),
        convenio_id: convenio.map(|c| c.id),
    })
    .unwrap();
}

#[test]
fn test_empresa_repository_crud() {
    let test_db = common::TestDb::new("test_empresa_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let acme = empresa(&repo, "Acme", 76_000_001);
    let globex = empresa(&repo, "Globex", 76_000_002);

    assert_eq!(repo.list_empresas().unwrap().len(), 2);
    assert_eq!(
        repo.get_empresa_by_rut(&globex.rut).unwrap().map(|e| e.id),
        Some(globex.id)
    );

    let updated = repo
        .update_empresa(
            acme.id,
            &UpdateEmpresa {
                nombre: EmpresaNombre::new("Acme Chile").unwrap(),
                rut: acme.rut.clone(),
            },
        )
        .unwrap();
    assert_eq!(updated.nombre.as_str(), "Acme Chile");

    let disabled = repo.set_empresa_status(acme.id, Status::Inactivo).unwrap();
    assert_eq!(disabled.status, Status::Inactivo);

    let duplicate = repo.create_empresa(&NewEmpresa::new(
        EmpresaNombre::new("Acme copia").unwrap(),
        acme.rut.clone(),
    ));
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));
}

#[test]
fn test_convenio_and_codigo_repository() {
    let test_db = common::TestDb::new("test_convenio_and_codigo_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    let acme = empresa(&repo, "Acme", 76_000_001);
    let convenio = convenio(&repo, &acme, "Convenio Acme");

    let joined = repo.list_convenios_with_empresa().unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].0.id, convenio.id);
    assert_eq!(joined[0].1.nombre.as_str(), "Acme");

    let code = DiscountCode::new("ACME_2025").unwrap();
    let created = repo
        .create_codigo(&NewCodigoDescuento::new(
            convenio.id,
            code.clone(),
            date(2025, 1, 1),
            date(2025, 12, 31),
            MaxUses::default(),
        ))
        .unwrap();
    assert_eq!(created.usos_realizados, 0);
    assert_eq!(created.max_usos.get(), 100);

    assert_eq!(
        repo.get_codigo_by_code(&code).unwrap().map(|c| c.id),
        Some(created.id)
    );
    assert_eq!(repo.list_codigos_by_convenio(convenio.id).unwrap().len(), 1);

    let toggled = repo.set_codigo_status(created.id, Status::Inactivo).unwrap();
    assert_eq!(toggled.status, Status::Inactivo);

    let again = repo.create_codigo(&NewCodigoDescuento::new(
        convenio.id,
        code,
        date(2025, 1, 1),
        date(2025, 6, 30),
        MaxUses::default(),
    ));
    assert!(matches!(again, Err(RepositoryError::Duplicate(_))));
}

#[test]
fn test_pasajero_and_descuento_repository() {
    let test_db = common::TestDb::new("test_pasajero_and_descuento_repository.db");
    let repo = DieselRepository::new(test_db.pool());

    let acme = empresa(&repo, "Acme", 76_000_001);
    let convenio = convenio(&repo, &acme, "Convenio Acme");
    let ana = pasajero(&repo, 12_345_678, "Ana", &acme);

    assert_eq!(
        repo.get_pasajero_by_rut(&ana.rut).unwrap().map(|p| p.id),
        Some(ana.id)
    );

    let descuento = repo
        .create_descuento(&NewDescuento {
            pasajero_id: ana.id,
            convenio_id: convenio.id,
            codigo_descuento_id: None,
            tipo_pasajero: PassengerType::Adulto,
            porcentaje: Percentage::new(15).unwrap(),
            fecha_inicio: date(2025, 1, 1),
            fecha_fin: date(2025, 12, 31),
            status: DiscountStatus::Activo,
            evento_id: None,
        })
        .unwrap();

    let listed = repo.list_descuentos_with_pasajero().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].1.nombres.as_str(), "Ana");

    let inactive = repo
        .set_descuento_status(descuento.id, DiscountStatus::Inactivo)
        .unwrap();
    assert_eq!(inactive.status, DiscountStatus::Inactivo);

    let paused = repo.set_pasajero_status(ana.id, Status::Inactivo).unwrap();
    assert_eq!(paused.status, Status::Inactivo);
}

#[test]
fn test_evento_listing_filters_sorts_and_pages() {
    let test_db = common::TestDb::new("test_evento_listing.db");
    let repo = DieselRepository::new(test_db.pool());

    let acme = empresa(&repo, "Acme", 76_000_001);
    let globex = empresa(&repo, "Globex", 76_000_002);
    let convenio = convenio(&repo, &acme, "Convenio Acme");
    let ana = pasajero(&repo, 12_345_678, "Ana", &acme);
    let beto = pasajero(&repo, 11_111_111, "Beto", &globex);

    evento(&repo, &ana, Some(&convenio), EventType::Compra, at(2025, 3, 1, 9), 10_000);
    evento(&repo, &ana, Some(&convenio), EventType::Cambio, at(2025, 3, 10, 23), 20_000);
    evento(&repo, &ana, None, EventType::Compra, at(2025, 3, 11, 0), 30_000);
    evento(&repo, &beto, None, EventType::Devolucion, at(2025, 4, 2, 12), 5_000);

    let (total, rows) = repo.list_eventos(&EventoListQuery::new(1, 10)).unwrap();
    assert_eq!(total, 4);
    // Newest trip first by default.
    assert_eq!(rows[0].pasajero.id, beto.id);
    assert_eq!(rows[0].empresa.nombre.as_str(), "Globex");

    let (total, rows) = repo
        .list_eventos(&EventoListQuery::new(1, 10).empresa(acme.id).tipo_evento(EventType::Compra))
        .unwrap();
    assert_eq!(total, 2);
    assert!(rows.iter().all(|row| row.evento.tipo_evento == EventType::Compra));

    let (total, rows) = repo
        .list_eventos(
            &EventoListQuery::new(1, 10).between(Some(date(2025, 3, 1)), Some(date(2025, 3, 10))),
        )
        .unwrap();
    assert_eq!(total, 2, "both ends of the date range are inclusive");
    assert!(rows.iter().all(|row| row.convenio.is_some()));

    let (total, rows) = repo
        .list_eventos(
            &EventoListQuery::new(2, 3).sort(EventoSortField::MontoPagado, SortOrder::Asc),
        )
        .unwrap();
    assert_eq!(total, 4);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].evento.monto_pagado, 30_000);

    let (total, rows) = repo
        .list_eventos(&EventoListQuery::new(1, 10).pasajero(beto.id).convenio(convenio.id))
        .unwrap();
    assert_eq!(total, 0);
    assert!(rows.is_empty());
}

#[test]
fn test_summary_counts_every_table() {
    let test_db = common::TestDb::new("test_summary_counts_every_table.db");
    let repo = DieselRepository::new(test_db.pool());

    let acme = empresa(&repo, "Acme", 76_000_001);
    let convenio = convenio(&repo, &acme, "Convenio Acme");
    let ana = pasajero(&repo, 12_345_678, "Ana", &acme);
    evento(&repo, &ana, Some(&convenio), EventType::Compra, at(2025, 3, 1, 9), 10_000);

    let counts = repo.count_entities().unwrap();
    assert_eq!(counts.empresas, 1);
    assert_eq!(counts.convenios, 1);
    assert_eq!(counts.codigos_descuento, 0);
    assert_eq!(counts.pasajeros, 1);
    assert_eq!(counts.descuentos, 0);
    assert_eq!(counts.eventos, 1);

    assert!(
        repo.get_evento_by_id(convenios_dashboard::domain::types::EventoId::new(1).unwrap())
            .unwrap()
            .is_some()
    );
}
