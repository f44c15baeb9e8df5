//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, valid RUT
//! check digits, normalized email and phone numbers) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use phonenumber::{Mode, country, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// RUT was malformed or its check digit did not match.
    #[error("invalid RUT")]
    InvalidRut,
    /// Discount code outside 3-50 characters of `[A-Z0-9_]`.
    #[error("discount code must be 3-50 characters of A-Z, 0-9 or _")]
    InvalidDiscountCode,
    #[error("percentage must be between 0 and 100")]
    PercentageOutOfRange,
    #[error("max uses must be between 1 and 9999999")]
    MaxUsesOutOfRange,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(EmpresaId, "Unique identifier for a company.");
id_newtype!(ConvenioId, "Unique identifier for a company agreement.");
id_newtype!(CodigoDescuentoId, "Unique identifier for a discount code.");
id_newtype!(DescuentoId, "Unique identifier for a granted discount.");
id_newtype!(PasajeroId, "Unique identifier for a passenger.");
id_newtype!(EventoId, "Unique identifier for a ticketing event.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(EmpresaNombre, "Legal or trade name of a company.");
non_empty_string_newtype!(ConvenioNombre, "Display name of an agreement.");
non_empty_string_newtype!(PersonName, "Given names or surnames of a passenger.");
non_empty_string_newtype!(CityName, "Origin or destination city of a trip.");

/// Chilean tax identifier (Rol Único Tributario).
///
/// Stored in the compact canonical form `12345678-5`; the check digit is
/// validated with the mod-11 algorithm and `K` is always upper case.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rut(String);

impl Rut {
    /// Accepts `12.345.678-5`, `12345678-5` or `123456785`.
    pub fn new<S: AsRef<str>>(value: S) -> Result<Self, TypeConstraintError> {
        let compact: String = value
            .as_ref()
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if compact.len() < 2 || !compact.is_ascii() {
            return Err(TypeConstraintError::InvalidRut);
        }

        let (body, check) = compact.split_at(compact.len() - 1);
        if body.len() > 9 || !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeConstraintError::InvalidRut);
        }
        let body: u32 = body.parse().map_err(|_| TypeConstraintError::InvalidRut)?;
        if body == 0 {
            return Err(TypeConstraintError::InvalidRut);
        }

        let expected = Self::check_digit(body);
        if !check.starts_with(expected) {
            return Err(TypeConstraintError::InvalidRut);
        }

        Ok(Self(format!("{body}-{expected}")))
    }

    /// Builds a RUT from its numeric body, computing the check digit.
    pub fn from_body(body: u32) -> Result<Self, TypeConstraintError> {
        if body == 0 {
            return Err(TypeConstraintError::InvalidRut);
        }
        Ok(Self(format!("{body}-{}", Self::check_digit(body))))
    }

    /// Mod-11 check digit for `body`.
    pub fn check_digit(body: u32) -> char {
        let mut remaining = body;
        let mut factor = 2;
        let mut sum = 0;
        while remaining > 0 {
            sum += (remaining % 10) * factor;
            remaining /= 10;
            factor = if factor == 7 { 2 } else { factor + 1 };
        }

        match 11 - (sum % 11) {
            11 => '0',
            10 => 'K',
            digit => char::from_digit(digit, 10).unwrap_or('0'),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Renders the RUT with thousands separators, e.g. `12.345.678-5`.
    pub fn formatted(&self) -> String {
        let (body, check) = self.0.split_once('-').unwrap_or((self.0.as_str(), ""));
        format!("{}-{check}", group_thousands(body))
    }
}

/// Inserts `.` every three digits counting from the right.
pub(crate) fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

impl Display for Rut {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Rut {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Rut {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rut> for String {
    fn from(value: Rut) -> Self {
        value.0
    }
}

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = email.into().trim().to_lowercase();
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(TypeConstraintError::InvalidEmail)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalizes a phone number string to E.164, assuming Chile when no
/// country code is given.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed =
        parse(Some(country::Id::CL), trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Upper-cased promotional code made of `A-Z`, `0-9` and `_`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DiscountCode(String);

impl DiscountCode {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 50;

    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let code = value.into().trim().to_uppercase();
        let valid_chars = code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');

        if valid_chars && (Self::MIN_LEN..=Self::MAX_LEN).contains(&code.len()) {
            Ok(Self(code))
        } else {
            Err(TypeConstraintError::InvalidDiscountCode)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for DiscountCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whole-number discount percentage in `0..=100`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Percentage(i32);

impl Percentage {
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (0..=100).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::PercentageOutOfRange)
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Maximum number of redemptions allowed for a discount code.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MaxUses(i32);

impl MaxUses {
    pub const MAX: i32 = 9_999_999;
    pub const DEFAULT: i32 = 100;

    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::MaxUsesOutOfRange)
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Default for MaxUses {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Activation state shared by companies, agreements, codes and passengers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Activo,
    Inactivo,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Activo => "ACTIVO",
            Status::Inactivo => "INACTIVO",
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Status::Activo)
    }

    /// The state an activate/deactivate action moves to.
    pub const fn toggled(self) -> Self {
        match self {
            Status::Activo => Status::Inactivo,
            Status::Inactivo => Status::Activo,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVO" | "ACTIVE" => Ok(Status::Activo),
            "INACTIVO" | "INACTIVE" => Ok(Status::Inactivo),
            other => Err(TypeConstraintError::InvalidValue(format!("status {other}"))),
        }
    }
}

/// Lifecycle of a granted discount.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountStatus {
    #[default]
    Activo,
    Inactivo,
    Vencido,
}

impl DiscountStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            DiscountStatus::Activo => "ACTIVO",
            DiscountStatus::Inactivo => "INACTIVO",
            DiscountStatus::Vencido => "VENCIDO",
        }
    }

    /// Expired discounts cannot be reactivated, so they stay as they are.
    pub const fn toggled(self) -> Self {
        match self {
            DiscountStatus::Activo => DiscountStatus::Inactivo,
            DiscountStatus::Inactivo => DiscountStatus::Activo,
            DiscountStatus::Vencido => DiscountStatus::Vencido,
        }
    }
}

impl Display for DiscountStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVO" | "ACTIVE" => Ok(DiscountStatus::Activo),
            "INACTIVO" | "INACTIVE" => Ok(DiscountStatus::Inactivo),
            "VENCIDO" => Ok(DiscountStatus::Vencido),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "discount status {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_newtypes_reject_non_positive_values() {
        assert!(EmpresaId::new(1).is_ok());
        assert_eq!(EmpresaId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(EventoId::new(-4), Err(TypeConstraintError::NonPositiveId));
    }

    #[test]
    fn rut_accepts_common_spellings() {
        for input in ["12.345.678-5", "12345678-5", "123456785", " 12345678 - 5 "] {
            let rut = Rut::new(input).expect("valid rut");
            assert_eq!(rut.as_str(), "12345678-5");
            assert_eq!(rut.formatted(), "12.345.678-5");
        }
    }

    #[test]
    fn rut_rejects_wrong_check_digit() {
        assert_eq!(Rut::new("12.345.678-9"), Err(TypeConstraintError::InvalidRut));
        assert_eq!(Rut::new("abc"), Err(TypeConstraintError::InvalidRut));
        assert_eq!(Rut::new("-"), Err(TypeConstraintError::InvalidRut));
    }

    #[test]
    fn rut_handles_k_check_digit() {
        let body = (1_000_000..1_000_100)
            .find(|body| Rut::check_digit(*body) == 'K')
            .expect("some body has K as check digit");
        let lower = format!("{body}k");

        let rut = Rut::new(&lower).expect("lower-case k is accepted");
        assert!(rut.as_str().ends_with("-K"));
        assert_eq!(Rut::from_body(body).expect("valid body"), rut);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1234"), "1.234");
        assert_eq!(group_thousands("123456789"), "123.456.789");
    }

    #[test]
    fn email_is_normalized() {
        let email = Email::new("  Ana@Empresa.CL ").expect("valid email");
        assert_eq!(email.as_str(), "ana@empresa.cl");
        assert_eq!(Email::new("nope"), Err(TypeConstraintError::InvalidEmail));
    }

    #[test]
    fn phone_defaults_to_chile() {
        let phone = PhoneNumber::new("9 8765 4321").expect("valid phone");
        assert_eq!(phone.as_str(), "+56987654321");
        assert_eq!(PhoneNumber::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn discount_code_is_upper_cased_and_validated() {
        assert_eq!(DiscountCode::new("verano_2025").unwrap().as_str(), "VERANO_2025");
        assert!(DiscountCode::new("AB").is_err());
        assert!(DiscountCode::new("CON-GUION").is_err());
        assert!(DiscountCode::new("X".repeat(51)).is_err());
    }

    #[test]
    fn bounded_numbers() {
        assert!(Percentage::new(0).is_ok());
        assert!(Percentage::new(100).is_ok());
        assert!(Percentage::new(101).is_err());
        assert!(MaxUses::new(0).is_err());
        assert!(MaxUses::new(MaxUses::MAX).is_ok());
        assert!(MaxUses::new(MaxUses::MAX + 1).is_err());
    }

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!("activo".parse::<Status>(), Ok(Status::Activo));
        assert_eq!(Status::Activo.toggled(), Status::Inactivo);
        assert_eq!(DiscountStatus::Vencido.toggled(), DiscountStatus::Vencido);
        assert_eq!("VENCIDO".parse::<DiscountStatus>(), Ok(DiscountStatus::Vencido));
        assert!("otro".parse::<Status>().is_err());
    }
}
