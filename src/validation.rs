//! Input checks for the create/login/password forms.

use crate::error::{Error, Result};
use crate::record::{CarUser, CarUserStatus, Employee, EmployeeStatus};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Per-field error messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first error for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Strip spaces, dashes and a `+94` country prefix. Returns the local
/// 10-digit number, or `None` if what remains is not one.
pub fn normalize_phone(phone: &str) -> Option<String> {
    let compact: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let local = match compact.strip_prefix("+94") {
        Some(rest) => format!("0{}", rest),
        None => compact,
    };
    (local.len() == 10 && local.chars().all(|c| c.is_ascii_digit())).then_some(local)
}

/// At least 8 characters with an uppercase letter and a digit.
pub fn is_strong_password(password: &str) -> bool {
    if password.chars().count() < 8 {
        return false;
    }

    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    has_uppercase && has_digit
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", label));
        false
    } else {
        true
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if require(errors, "email", email, "Email") && !is_valid_email(email) {
        errors.add("email", "Enter a valid email address");
    }
}

fn check_phone(errors: &mut FieldErrors, phone: &str) {
    if require(errors, "phone", phone, "Phone") && normalize_phone(phone).is_none() {
        errors.add("phone", "Phone number must have 10 digits");
    }
}

/// Raw `field=value` entries of a console form, keyed by lowercase field name.
pub type FormFields = BTreeMap<String, String>;

/// Parse `name=Kamal Perera | email=kamal@gmail.com` into form fields.
/// Values keep their inner spaces.
pub fn parse_form(raw: &str) -> Result<FormFields> {
    let mut fields = FormFields::new();
    for part in raw.split('|').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                fields.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
            }
            _ => {
                return Err(Error::InvalidInput(format!(
                    "expected field=value, got '{}'",
                    part
                )))
            }
        }
    }
    Ok(fields)
}

fn reject_unknown(fields: &FormFields, known: &[&str]) -> Result<()> {
    match fields.keys().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(Error::InvalidInput(format!(
            "unknown field '{}', expected one of: {}",
            key,
            known.join(", ")
        ))),
        None => Ok(()),
    }
}

fn text(fields: &FormFields, key: &str) -> String {
    fields.get(key).cloned().unwrap_or_default()
}

/// "Add car user" form.
#[derive(Debug, Clone, Default)]
pub struct NewCarUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub vehicles: u32,
}

impl NewCarUser {
    pub const FIELDS: &'static [&'static str] = &["name", "email", "phone", "city", "vehicles"];

    /// Blank or missing `vehicles` means none.
    pub fn from_fields(fields: &FormFields) -> Result<Self> {
        reject_unknown(fields, Self::FIELDS)?;
        let vehicles = match fields.get("vehicles").map(|v| v.trim()) {
            None | Some("") => 0,
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                let mut errors = FieldErrors::new();
                errors.add("vehicles", "Vehicles must be a whole number");
                Error::Validation(errors)
            })?,
        };
        Ok(Self {
            name: text(fields, "name"),
            email: text(fields, "email"),
            phone: text(fields, "phone"),
            city: text(fields, "city"),
            vehicles,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name");
        check_email(&mut errors, &self.email);
        check_phone(&mut errors, &self.phone);
        require(&mut errors, "city", &self.city, "City");
        errors.into_result()
    }

    /// Validated record with the given id, joined on `join_date`.
    pub fn into_record(self, id: u64, join_date: &str) -> Result<CarUser> {
        self.validate()?;
        let phone = normalize_phone(&self.phone).unwrap_or_default();
        Ok(CarUser {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone,
            city: self.city.trim().to_string(),
            vehicles: self.vehicles,
            join_date: join_date.to_string(),
            status: CarUserStatus::Active,
        })
    }
}

/// "Add employee" form.
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
}

impl NewEmployee {
    pub const FIELDS: &'static [&'static str] = &["name", "role", "email", "phone"];

    pub fn from_fields(fields: &FormFields) -> Result<Self> {
        reject_unknown(fields, Self::FIELDS)?;
        Ok(Self {
            name: text(fields, "name"),
            role: text(fields, "role"),
            email: text(fields, "email"),
            phone: text(fields, "phone"),
        })
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name");
        require(&mut errors, "role", &self.role, "Role");
        check_email(&mut errors, &self.email);
        check_phone(&mut errors, &self.phone);
        errors.into_result()
    }

    pub fn into_record(self, id: u64, join_date: &str) -> Result<Employee> {
        self.validate()?;
        let phone = normalize_phone(&self.phone).unwrap_or_default();
        Ok(Employee {
            id,
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone,
            join_date: join_date.to_string(),
            status: EmployeeStatus::Available,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        require(&mut errors, "password", &self.password, "Password");
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "current", &self.current, "Current password");
        if require(&mut errors, "new", &self.new, "New password") {
            if !is_strong_password(&self.new) {
                errors.add(
                    "new",
                    "Password must be at least 8 characters with an uppercase letter and a digit",
                );
            } else if self.new == self.current {
                errors.add("new", "New password must differ from the current one");
            }
        }
        if self.confirm != self.new {
            errors.add("confirm", "Passwords do not match");
        }
        errors.into_result()
    }
}
