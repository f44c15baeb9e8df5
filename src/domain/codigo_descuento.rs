use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::types::{CodigoDescuentoId, ConvenioId, DiscountCode, MaxUses, Status};

/// Colour band for a code's usage bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Low,
    Medium,
    High,
}

impl UsageLevel {
    /// `<= 60` is low, `<= 85` is medium and anything above is high.
    pub fn from_percentage(percentage: i64) -> Self {
        if percentage <= 60 {
            UsageLevel::Low
        } else if percentage <= 85 {
            UsageLevel::Medium
        } else {
            UsageLevel::High
        }
    }

    /// Bootstrap colour used for the progress bar.
    pub const fn css_class(self) -> &'static str {
        match self {
            UsageLevel::Low => "bg-success",
            UsageLevel::Medium => "bg-warning",
            UsageLevel::High => "bg-danger",
        }
    }
}

/// Promotional code redeemable under a discount-code agreement.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CodigoDescuento {
    pub id: CodigoDescuentoId,
    pub convenio_id: ConvenioId,
    pub codigo: DiscountCode,
    pub fecha_inicio: NaiveDate,
    pub fecha_termino: NaiveDate,
    pub max_usos: MaxUses,
    pub usos_realizados: i32,
    pub status: Status,
    pub created_at: NaiveDateTime,
}

impl CodigoDescuento {
    /// Active and `today` falls inside the validity window (inclusive).
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.status.is_active() && self.fecha_inicio <= today && today <= self.fecha_termino
    }

    /// Share of the allowed redemptions already used, rounded.
    pub fn usage_percentage(&self) -> i64 {
        let used = f64::from(self.usos_realizados.max(0));
        let max = f64::from(self.max_usos.get());
        (used / max * 100.0).round() as i64
    }

    pub fn usage_level(&self) -> UsageLevel {
        UsageLevel::from_percentage(self.usage_percentage())
    }
}

#[derive(Clone, Debug)]
pub struct NewCodigoDescuento {
    pub convenio_id: ConvenioId,
    pub codigo: DiscountCode,
    pub fecha_inicio: NaiveDate,
    pub fecha_termino: NaiveDate,
    pub max_usos: MaxUses,
    pub status: Status,
}

impl NewCodigoDescuento {
    #[must_use]
    pub fn new(
        convenio_id: ConvenioId,
        codigo: DiscountCode,
        fecha_inicio: NaiveDate,
        fecha_termino: NaiveDate,
        max_usos: MaxUses,
    ) -> Self {
        Self {
            convenio_id,
            codigo,
            fecha_inicio,
            fecha_termino,
            max_usos,
            status: Status::Activo,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn codigo(usos: i32, max: i32) -> CodigoDescuento {
        CodigoDescuento {
            id: CodigoDescuentoId::new(1).unwrap(),
            convenio_id: ConvenioId::new(1).unwrap(),
            codigo: DiscountCode::new("VERANO2025").unwrap(),
            fecha_inicio: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            fecha_termino: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            max_usos: MaxUses::new(max).unwrap(),
            usos_realizados: usos,
            status: Status::Activo,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn usage_is_rounded_percentage() {
        assert_eq!(codigo(8, 10).usage_percentage(), 80);
        assert_eq!(codigo(1, 3).usage_percentage(), 33);
        assert_eq!(codigo(0, 100).usage_percentage(), 0);
    }

    #[test]
    fn usage_levels_follow_thresholds() {
        assert_eq!(UsageLevel::from_percentage(60), UsageLevel::Low);
        assert_eq!(UsageLevel::from_percentage(61), UsageLevel::Medium);
        assert_eq!(UsageLevel::from_percentage(85), UsageLevel::Medium);
        assert_eq!(UsageLevel::from_percentage(86), UsageLevel::High);
        assert_eq!(codigo(9, 10).usage_level(), UsageLevel::High);
    }

    #[test]
    fn current_window_is_inclusive() {
        let code = codigo(0, 10);
        assert!(code.is_current(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(code.is_current(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
        assert!(!code.is_current(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));

        let inactive = CodigoDescuento {
            status: Status::Inactivo,
            ..code
        };
        assert!(!inactive.is_current(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
    }
}
