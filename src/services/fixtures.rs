//! Domain values shared by the service tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::codigo_descuento::CodigoDescuento;
use crate::domain::convenio::{ConsultationType, Convenio};
use crate::domain::descuento::Descuento;
use crate::domain::empresa::Empresa;
use crate::domain::evento::{EventType, Evento};
use crate::domain::pasajero::{PassengerType, Pasajero};
use crate::domain::types::{
    CityName, CodigoDescuentoId, ConvenioId, ConvenioNombre, DescuentoId, DiscountCode,
    DiscountStatus, Email, EmpresaId, EmpresaNombre, EventoId, MaxUses, PasajeroId, Percentage,
    PersonName, Rut, Status,
};

pub fn timestamp() -> NaiveDateTime {
    date(2025, 1, 15).and_hms_opt(9, 30, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn empresa(id: i32, nombre: &str) -> Empresa {
    Empresa {
        id: EmpresaId::new(id).unwrap(),
        nombre: EmpresaNombre::new(nombre).unwrap(),
        rut: Rut::from_body(76_000_000 + id as u32).unwrap(),
        status: Status::Activo,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn convenio(id: i32, empresa_id: i32, nombre: &str) -> Convenio {
    Convenio {
        id: ConvenioId::new(id).unwrap(),
        empresa_id: EmpresaId::new(empresa_id).unwrap(),
        nombre: ConvenioNombre::new(nombre).unwrap(),
        tipo_consulta: ConsultationType::CodigoDescuento,
        tope_monto_ventas: None,
        status: Status::Activo,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn codigo(id: i32, convenio_id: i32, code: &str, usos: i32) -> CodigoDescuento {
    CodigoDescuento {
        id: CodigoDescuentoId::new(id).unwrap(),
        convenio_id: ConvenioId::new(convenio_id).unwrap(),
        codigo: DiscountCode::new(code).unwrap(),
        fecha_inicio: date(2025, 1, 1),
        fecha_termino: date(2025, 12, 31),
        max_usos: MaxUses::new(100).unwrap(),
        usos_realizados: usos,
        status: Status::Activo,
        created_at: timestamp(),
    }
}

pub fn pasajero(id: i32, nombres: &str, apellidos: &str) -> Pasajero {
    Pasajero {
        id: PasajeroId::new(id).unwrap(),
        rut: Rut::from_body(10_000_000 + id as u32).unwrap(),
        nombres: PersonName::new(nombres).unwrap(),
        apellidos: PersonName::new(apellidos).unwrap(),
        correo: Some(Email::new(format!("pasajero{id}@correo.cl")).unwrap()),
        telefono: None,
        fecha_nacimiento: None,
        tipo_pasajero: PassengerType::Adulto,
        empresa_id: None,
        convenio_id: None,
        status: Status::Activo,
        created_at: timestamp(),
    }
}

pub fn descuento(id: i32, pasajero_id: i32, status: DiscountStatus) -> Descuento {
    Descuento {
        id: DescuentoId::new(id).unwrap(),
        pasajero_id: PasajeroId::new(pasajero_id).unwrap(),
        convenio_id: ConvenioId::new(1).unwrap(),
        codigo_descuento_id: None,
        tipo_pasajero: PassengerType::Adulto,
        porcentaje: Percentage::new(15).unwrap(),
        fecha_inicio: date(2025, 1, 1),
        fecha_fin: date(2025, 6, 30),
        status,
        evento_id: None,
        created_at: timestamp(),
    }
}

pub fn evento(id: i32, pasajero_id: i32, empresa_id: i32) -> Evento {
    Evento {
        id: EventoId::new(id).unwrap(),
        tipo_evento: EventType::Compra,
        ciudad_origen: CityName::new("Santiago").unwrap(),
        ciudad_destino: CityName::new("Valparaíso").unwrap(),
        fecha_viaje: timestamp(),
        tarifa_base: 10_000,
        monto_pagado: 8_500,
        porcentaje_descuento_aplicado: Percentage::new(15).unwrap(),
        pasajero_id: PasajeroId::new(pasajero_id).unwrap(),
        empresa_id: EmpresaId::new(empresa_id).unwrap(),
        convenio_id: None,
        created_at: timestamp(),
    }
}
