//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::codigo_descuento::{CodigoDescuento, NewCodigoDescuento};
use crate::domain::convenio::{Convenio, NewConvenio};
use crate::domain::descuento::{Descuento, NewDescuento};
use crate::domain::empresa::{Empresa, NewEmpresa, UpdateEmpresa};
use crate::domain::evento::{Evento, NewEvento};
use crate::domain::pasajero::{NewPasajero, Pasajero};
use crate::domain::types::{
    CodigoDescuentoId, ConvenioId, DescuentoId, DiscountCode, DiscountStatus, EmpresaId, EventoId,
    PasajeroId, Rut, Status,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CodigoDescuentoReader, CodigoDescuentoWriter, ConvenioReader, ConvenioWriter, DescuentoReader,
    DescuentoWriter, EmpresaReader, EmpresaWriter, EntityCounts, EventoListQuery, EventoReader,
    EventoWithRelations, EventoWriter, PasajeroReader, PasajeroWriter, SummaryReader,
};

mock! {
    pub Repository {}

    impl EmpresaReader for Repository {
        fn get_empresa_by_id(&self, id: EmpresaId) -> RepositoryResult<Option<Empresa>>;
        fn get_empresa_by_rut(&self, rut: &Rut) -> RepositoryResult<Option<Empresa>>;
        fn list_empresas(&self) -> RepositoryResult<Vec<Empresa>>;
    }

    impl EmpresaWriter for Repository {
        fn create_empresa(&self, new_empresa: &NewEmpresa) -> RepositoryResult<Empresa>;
        fn update_empresa(&self, id: EmpresaId, updates: &UpdateEmpresa) -> RepositoryResult<Empresa>;
        fn set_empresa_status(&self, id: EmpresaId, status: Status) -> RepositoryResult<Empresa>;
    }

    impl ConvenioReader for Repository {
        fn get_convenio_by_id(&self, id: ConvenioId) -> RepositoryResult<Option<Convenio>>;
        fn list_convenios_with_empresa(&self) -> RepositoryResult<Vec<(Convenio, Empresa)>>;
    }

    impl ConvenioWriter for Repository {
        fn create_convenio(&self, new_convenio: &NewConvenio) -> RepositoryResult<Convenio>;
        fn set_convenio_status(&self, id: ConvenioId, status: Status) -> RepositoryResult<Convenio>;
    }

    impl CodigoDescuentoReader for Repository {
        fn get_codigo_by_id(&self, id: CodigoDescuentoId) -> RepositoryResult<Option<CodigoDescuento>>;
        fn get_codigo_by_code(&self, code: &DiscountCode) -> RepositoryResult<Option<CodigoDescuento>>;
        fn list_codigos_by_convenio(
            &self,
            convenio_id: ConvenioId,
        ) -> RepositoryResult<Vec<CodigoDescuento>>;
    }

    impl CodigoDescuentoWriter for Repository {
        fn create_codigo(&self, new_codigo: &NewCodigoDescuento) -> RepositoryResult<CodigoDescuento>;
        fn set_codigo_status(
            &self,
            id: CodigoDescuentoId,
            status: Status,
        ) -> RepositoryResult<CodigoDescuento>;
    }

    impl PasajeroReader for Repository {
        fn get_pasajero_by_id(&self, id: PasajeroId) -> RepositoryResult<Option<Pasajero>>;
        fn get_pasajero_by_rut(&self, rut: &Rut) -> RepositoryResult<Option<Pasajero>>;
        fn list_pasajeros(&self) -> RepositoryResult<Vec<Pasajero>>;
    }

    impl PasajeroWriter for Repository {
        fn create_pasajero(&self, new_pasajero: &NewPasajero) -> RepositoryResult<Pasajero>;
        fn set_pasajero_status(&self, id: PasajeroId, status: Status) -> RepositoryResult<Pasajero>;
    }

    impl DescuentoReader for Repository {
        fn get_descuento_by_id(&self, id: DescuentoId) -> RepositoryResult<Option<Descuento>>;
        fn list_descuentos_with_pasajero(&self) -> RepositoryResult<Vec<(Descuento, Pasajero)>>;
    }

    impl DescuentoWriter for Repository {
        fn create_descuento(&self, new_descuento: &NewDescuento) -> RepositoryResult<Descuento>;
        fn set_descuento_status(
            &self,
            id: DescuentoId,
            status: DiscountStatus,
        ) -> RepositoryResult<Descuento>;
    }

    impl EventoReader for Repository {
        fn get_evento_by_id(&self, id: EventoId) -> RepositoryResult<Option<EventoWithRelations>>;
        fn list_eventos(
            &self,
            query: &EventoListQuery,
        ) -> RepositoryResult<(usize, Vec<EventoWithRelations>)>;
    }

    impl EventoWriter for Repository {
        fn create_evento(&self, new_evento: &NewEvento) -> RepositoryResult<Evento>;
    }

    impl SummaryReader for Repository {
        fn count_entities(&self) -> RepositoryResult<EntityCounts>;
    }
}
