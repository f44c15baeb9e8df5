//! Loads a small deterministic demo data set into an already migrated database.

use std::env;

use chrono::{Duration, NaiveDate};
use config::Config;
use dotenvy::dotenv;

use convenios_dashboard::db::establish_connection_pool;
use convenios_dashboard::domain::codigo_descuento::NewCodigoDescuento;
use convenios_dashboard::domain::convenio::{ConsultationType, NewConvenio};
use convenios_dashboard::domain::descuento::NewDescuento;
use convenios_dashboard::domain::empresa::NewEmpresa;
use convenios_dashboard::domain::evento::{EventType, NewEvento};
use convenios_dashboard::domain::pasajero::{NewPasajero, PassengerType};
use convenios_dashboard::domain::types::{
    CityName, ConvenioNombre, DiscountCode, DiscountStatus, Email, EmpresaNombre, MaxUses,
    Percentage, PersonName, PhoneNumber, Rut, Status,
};
use convenios_dashboard::models::config::ServerConfig;
use convenios_dashboard::repository::errors::{RepositoryError, RepositoryResult};
use convenios_dashboard::repository::{
    CodigoDescuentoWriter, ConvenioWriter, DescuentoWriter, DieselRepository, EmpresaReader,
    EmpresaWriter, EventoWriter, PasajeroWriter,
};

const EMPRESAS: [(&str, u32); 3] = [
    ("Minera Los Andes", 76_123_456),
    ("Universidad del Pacífico", 70_987_654),
    ("Hospital Regional Sur", 61_555_222),
];

const PASAJEROS: [(&str, &str, PassengerType); 6] = [
    ("María José", "González Rojas", PassengerType::Adulto),
    ("Pedro", "Muñoz Soto", PassengerType::Adulto),
    ("Camila", "Díaz Fuentes", PassengerType::Estudiante),
    ("Jorge", "Pérez Castillo", PassengerType::AdultoMayor),
    ("Valentina", "Silva Morales", PassengerType::Estudiante),
    ("Luis", "Contreras Vera", PassengerType::Adulto),
];

const CITIES: [&str; 4] = ["Santiago", "Valparaíso", "Concepción", "La Serena"];

fn date(y: i32, m: u32, d: u32) -> RepositoryResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| RepositoryError::InvalidData(format!("invalid date {y}-{m}-{d}")))
}

fn seed<R>(repo: &R) -> RepositoryResult<()>
where
    R: EmpresaReader
        + EmpresaWriter
        + ConvenioWriter
        + CodigoDescuentoWriter
        + PasajeroWriter
        + DescuentoWriter
        + EventoWriter,
{
    if !repo.list_empresas()?.is_empty() {
        log::warn!("Database already has empresas; skipping seed");
        return Ok(());
    }

    let start = date(2025, 1, 1)?;
    let end = date(2025, 12, 31)?;

    let mut empresas = Vec::new();
    for (nombre, rut_body) in EMPRESAS {
        let empresa = repo.create_empresa(&NewEmpresa::new(
            EmpresaNombre::new(nombre)?,
            Rut::from_body(rut_body)?,
        ))?;
        log::info!("Seeded empresa {} ({})", empresa.nombre, empresa.rut);
        empresas.push(empresa);
    }

    let mut convenios = Vec::new();
    for (index, empresa) in empresas.iter().enumerate() {
        let convenio = repo.create_convenio(&NewConvenio::new(
            empresa.id,
            ConvenioNombre::new(format!("Convenio {}", empresa.nombre))?,
            ConsultationType::CodigoDescuento,
            Some(5_000_000 * (index as i64 + 1)),
        ))?;
        convenios.push(convenio);
    }
    repo.create_convenio(&NewConvenio::new(
        empresas[0].id,
        ConvenioNombre::new("Convenio por RUT de empresa")?,
        ConsultationType::from("RUT_EMPRESA"),
        None,
    ))?;

    let mut codigos = Vec::new();
    for (index, convenio) in convenios.iter().enumerate() {
        for suffix in ["2025", "VERANO"] {
            let codigo = repo.create_codigo(&NewCodigoDescuento::new(
                convenio.id,
                DiscountCode::new(format!("CONV{}_{suffix}", index + 1))?,
                start,
                end,
                MaxUses::new(50 * (index as i32 + 1))?,
            ))?;
            codigos.push(codigo);
        }
    }

    for (index, (nombres, apellidos, tipo)) in PASAJEROS.into_iter().enumerate() {
        let empresa = &empresas[index % empresas.len()];
        let convenio = &convenios[index % convenios.len()];
        let slug = nombres.split_whitespace().next().unwrap_or(nombres).to_lowercase();

        let pasajero = repo.create_pasajero(&NewPasajero {
            rut: Rut::from_body(15_000_000 + index as u32 * 1_234_567)?,
            nombres: PersonName::new(nombres)?,
            apellidos: PersonName::new(apellidos)?,
            correo: Some(Email::new(format!("{slug}{index}@correo.cl"))?),
            telefono: Some(PhoneNumber::new(format!("+5691234560{index}"))?),
            fecha_nacimiento: date(1960 + index as i32 * 7, 3, 15).ok(),
            tipo_pasajero: tipo,
            empresa_id: Some(empresa.id),
            convenio_id: Some(convenio.id),
            status: Status::Activo,
        })?;

        let status = match index % 3 {
            0 => DiscountStatus::Activo,
            1 => DiscountStatus::Inactivo,
            _ => DiscountStatus::Vencido,
        };
        repo.create_descuento(&NewDescuento {
            pasajero_id: pasajero.id,
            convenio_id: convenio.id,
            codigo_descuento_id: codigos.get(index).map(|codigo| codigo.id),
            tipo_pasajero: tipo,
            porcentaje: Percentage::new(10 + (index as i32 % 3) * 5)?,
            fecha_inicio: start,
            fecha_fin: end,
            status,
            evento_id: None,
        })?;

        for trip in 0..3_i64 {
            let origen = CITIES[(index + trip as usize) % CITIES.len()];
            let destino = CITIES[(index + trip as usize + 1) % CITIES.len()];
            let tarifa_base = 12_000 + trip * 3_500;
            let fecha_viaje = start
                .and_hms_opt(8 + trip as u32 * 4, 30, 0)
                .map(|at| at + Duration::days(index as i64 * 17 + trip * 40))
                .ok_or_else(|| RepositoryError::InvalidData("invalid trip time".into()))?;

            repo.create_evento(&NewEvento {
                tipo_evento: EventType::ALL[trip as usize % EventType::ALL.len()],
                ciudad_origen: CityName::new(origen)?,
                ciudad_destino: CityName::new(destino)?,
                fecha_viaje,
                tarifa_base,
                monto_pagado: tarifa_base * 9 / 10,
                porcentaje_descuento_aplicado: Percentage::new(10)?,
                pasajero_id: pasajero.id,
                empresa_id: empresa.id,
                convenio_id: Some(convenio.id),
            })?;
        }
    }

    log::info!(
        "Seeded {} empresas, {} codes and {} pasajeros",
        empresas.len(),
        codigos.len(),
        PASAJEROS.len()
    );
    Ok(())
}

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let server_config = match Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()
        .and_then(|settings| settings.try_deserialize::<ServerConfig>())
    {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(err) = seed(&DieselRepository::new(pool)) {
        log::error!("Seeding failed: {err}");
        std::process::exit(1);
    }
}
