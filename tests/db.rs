use convenios_dashboard::domain::convenio::{ConsultationType, NewConvenio};
use convenios_dashboard::domain::types::{ConvenioNombre, EmpresaId};
use convenios_dashboard::repository::errors::RepositoryError;
use convenios_dashboard::repository::{ConvenioWriter, DieselRepository};

mod common;

#[test]
fn test_creates_migrated_db() {
    let test_db = common::TestDb::new("test_creates_migrated_db.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let test_db = common::TestDb::new("test_foreign_keys_are_enforced.db");
    let repo = DieselRepository::new(test_db.pool());

    let orphan = NewConvenio::new(
        EmpresaId::new(999).unwrap(),
        ConvenioNombre::new("Sin empresa").unwrap(),
        ConsultationType::CodigoDescuento,
        None,
    );

    assert!(matches!(
        repo.create_convenio(&orphan),
        Err(RepositoryError::ConstraintViolation(_))
    ));
}
