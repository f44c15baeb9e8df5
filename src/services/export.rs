//! CSV exports of the filtered company, passenger and discount listings.

use serde::Serialize;

use crate::dto::descuentos::DescuentoRow;
use crate::dto::empresas::EmpresaRow;
use crate::dto::pasajeros::PasajeroRow;
use crate::repository::{ConvenioReader, DescuentoReader, EmpresaReader, PasajeroReader};
use crate::services::descuentos::filtered_descuentos;
use crate::services::empresas::filtered_empresas;
use crate::services::pasajeros::filtered_pasajeros;
use crate::services::{ServiceError, ServiceResult};

/// A finished export ready to be sent as an attachment.
#[derive(Debug)]
pub struct CsvExport {
    pub filename: &'static str,
    pub body: Vec<u8>,
}

/// A CSV row type with a fixed header, written even when nothing matches.
trait CsvRecord: Serialize {
    const HEADER: &'static [&'static str];
}

#[derive(Serialize)]
struct EmpresaRecord<'a> {
    id: i32,
    nombre: &'a str,
    rut: &'a str,
    estado: &'a str,
    creado: String,
}

impl CsvRecord for EmpresaRecord<'_> {
    const HEADER: &'static [&'static str] = &["id", "nombre", "rut", "estado", "creado"];
}

impl<'a> From<&'a EmpresaRow> for EmpresaRecord<'a> {
    fn from(row: &'a EmpresaRow) -> Self {
        Self {
            id: row.empresa.id.get(),
            nombre: row.empresa.nombre.as_str(),
            rut: &row.rut_formatted,
            estado: row.empresa.status.as_str(),
            creado: row.empresa.created_at.date().to_string(),
        }
    }
}

#[derive(Serialize)]
struct PasajeroRecord<'a> {
    id: i32,
    rut: &'a str,
    nombres: &'a str,
    apellidos: &'a str,
    correo: &'a str,
    telefono: &'a str,
    tipo_pasajero: &'a str,
    empresa: &'a str,
    convenio: &'a str,
    estado: &'a str,
}

impl CsvRecord for PasajeroRecord<'_> {
    const HEADER: &'static [&'static str] = &[
        "id",
        "rut",
        "nombres",
        "apellidos",
        "correo",
        "telefono",
        "tipo_pasajero",
        "empresa",
        "convenio",
        "estado",
    ];
}

impl<'a> From<&'a PasajeroRow> for PasajeroRecord<'a> {
    fn from(row: &'a PasajeroRow) -> Self {
        let pasajero = &row.pasajero;
        Self {
            id: pasajero.id.get(),
            rut: &row.rut_formatted,
            nombres: pasajero.nombres.as_str(),
            apellidos: pasajero.apellidos.as_str(),
            correo: pasajero.correo.as_ref().map_or("", |c| c.as_str()),
            telefono: pasajero.telefono.as_ref().map_or("", |t| t.as_str()),
            tipo_pasajero: pasajero.tipo_pasajero.label(),
            empresa: row.empresa_nombre.as_deref().unwrap_or_default(),
            convenio: row.convenio_nombre.as_deref().unwrap_or_default(),
            estado: pasajero.status.as_str(),
        }
    }
}

#[derive(Serialize)]
struct DescuentoRecord<'a> {
    id: i32,
    pasajero: String,
    rut: &'a str,
    tipo_pasajero: &'a str,
    porcentaje: i32,
    fecha_inicio: String,
    fecha_fin: String,
    estado: &'a str,
    aplicado: bool,
}

impl CsvRecord for DescuentoRecord<'_> {
    const HEADER: &'static [&'static str] = &[
        "id",
        "pasajero",
        "rut",
        "tipo_pasajero",
        "porcentaje",
        "fecha_inicio",
        "fecha_fin",
        "estado",
        "aplicado",
    ];
}

impl<'a> From<&'a DescuentoRow> for DescuentoRecord<'a> {
    fn from(row: &'a DescuentoRow) -> Self {
        let descuento = &row.descuento;
        Self {
            id: descuento.id.get(),
            pasajero: format!("{} {}", row.pasajero_nombres, row.pasajero_apellidos),
            rut: &row.pasajero_rut_formatted,
            tipo_pasajero: descuento.tipo_pasajero.label(),
            porcentaje: descuento.porcentaje.get(),
            fecha_inicio: descuento.fecha_inicio.to_string(),
            fecha_fin: descuento.fecha_fin.to_string(),
            estado: descuento.status.as_str(),
            aplicado: descuento.is_applied(),
        }
    }
}

/// Writes the header of `T` followed by every record.
fn write_csv<T: CsvRecord>(records: impl IntoIterator<Item = T>) -> ServiceResult<Vec<u8>> {
    let to_internal = |err: csv::Error| {
        log::error!("Failed to write CSV export: {err}");
        ServiceError::Internal(err.to_string())
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(T::HEADER).map_err(to_internal)?;
    for record in records {
        writer.serialize(record).map_err(to_internal)?;
    }
    writer
        .into_inner()
        .map_err(|err| ServiceError::Internal(err.to_string()))
}

pub fn export_empresas<R>(repo: &R, search: Option<&str>) -> ServiceResult<CsvExport>
where
    R: EmpresaReader + ?Sized,
{
    let rows = filtered_empresas(repo, search)?;
    Ok(CsvExport {
        filename: "empresas.csv",
        body: write_csv(rows.iter().map(EmpresaRecord::from))?,
    })
}

pub fn export_pasajeros<R>(repo: &R, search: Option<&str>) -> ServiceResult<CsvExport>
where
    R: PasajeroReader + EmpresaReader + ConvenioReader + ?Sized,
{
    let rows = filtered_pasajeros(repo, search)?;
    Ok(CsvExport {
        filename: "pasajeros.csv",
        body: write_csv(rows.iter().map(PasajeroRecord::from))?,
    })
}

pub fn export_descuentos<R>(repo: &R, search: Option<&str>) -> ServiceResult<CsvExport>
where
    R: DescuentoReader + ?Sized,
{
    let rows = filtered_descuentos(repo, search)?;
    Ok(CsvExport {
        filename: "descuentos.csv",
        body: write_csv(rows.iter().map(DescuentoRecord::from))?,
    })
}
