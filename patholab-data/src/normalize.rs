//! Heterogeneous record normalization
//!
//! The backend's record shapes have drifted across several schema
//! generations: the same concept may arrive under `resident_name`,
//! `residente_name`, `residenteName`, `nombre` or `name` depending on which
//! deployment produced it. Each canonical field is resolved through an
//! ordered chain of candidate keys (newest naming first, legacy naming last)
//! declared once per resource in [`chains`], so the precedence rules stay in
//! one auditable place.
//!
//! Normalization is total: any JSON value, including one with no recognized
//! fields at all, produces a record with every field populated. Missing data
//! resolves to the documented defaults (`""`, `true` for activity flags, `0`
//! for numbers) instead of failing the record.

use crate::models::{
    AuxiliaryRecord, BillingRecord, EntityRecord, PathologistRecord, ResidentRecord, TestRecord,
};
use serde_json::Value;

/// Candidate source keys per canonical field, newest backend naming first
mod chains {
    /// Activity flag spellings, shared by every resource
    pub const ACTIVE: &[&str] = &["is_active", "isActive", "activo"];
    /// Identifier precedence; the business code is the final fallback
    pub const ID: &[&str] = &["id", "_id"];
    pub const CREATED_AT: &[&str] = &["created_at", "fecha_creacion"];
    pub const UPDATED_AT: &[&str] = &["updated_at", "fecha_actualizacion"];
    pub const OBSERVATIONS: &[&str] = &["observations", "observaciones"];

    pub mod entity {
        pub const NAME: &[&str] = &["name", "entity_name", "nombre"];
        pub const CODE: &[&str] = &["entity_code", "code", "codigo"];
        /// Entities kept their notes under a different key than the staff resources
        pub const OBSERVATIONS: &[&str] = &["notes", "observaciones"];
    }

    pub mod resident {
        pub const NAME: &[&str] = &[
            "resident_name",
            "residente_name",
            "residenteName",
            "nombre",
            "name",
        ];
        pub const CODE: &[&str] = &[
            "resident_code",
            "residente_code",
            "residenteCode",
            "codigo",
            "code",
            "documento",
        ];
        pub const EMAIL: &[&str] = &[
            "resident_email",
            "residente_email",
            "ResidenteEmail",
            "email",
        ];
        pub const INITIALS: &[&str] = &["initials", "iniciales_residente", "InicialesResidente"];
    }

    pub mod pathologist {
        pub const NAME: &[&str] = &[
            "pathologist_name",
            "patologo_name",
            "patologoName",
            "nombre",
            "name",
        ];
        pub const CODE: &[&str] = &[
            "pathologist_code",
            "patologo_code",
            "patologoCode",
            "codigo",
            "code",
        ];
        pub const EMAIL: &[&str] = &[
            "pathologist_email",
            "patologo_email",
            "PatologoEmail",
            "email",
        ];
        pub const INITIALS: &[&str] = &["initials", "iniciales_patologo", "InicialesPatologo"];
        pub const SIGNATURE: &[&str] = &["signature", "firma"];
    }

    /// Medical license spellings, shared by residents and pathologists
    pub const MEDICAL_LICENSE: &[&str] = &["medical_license", "registro_medico", "medicalLicense"];

    pub mod auxiliary {
        pub const NAME: &[&str] = &["auxiliar_name", "auxiliarName", "name", "nombre"];
        pub const CODE: &[&str] = &["auxiliar_code", "auxiliarCode", "code", "codigo"];
        pub const EMAIL: &[&str] = &["auxiliar_email", "AuxiliarEmail", "email"];
    }

    pub mod billing {
        pub const NAME: &[&str] = &[
            "billing_name",
            "facturacion_name",
            "facturacionName",
            "name",
            "nombre",
        ];
        pub const CODE: &[&str] = &[
            "billing_code",
            "facturacion_code",
            "facturacionCode",
            "code",
            "codigo",
        ];
        pub const EMAIL: &[&str] = &[
            "billing_email",
            "facturacion_email",
            "FacturacionEmail",
            "email",
        ];
    }

    pub mod test {
        pub const NAME: &[&str] = &["name", "prueba_name", "pruebasName", "nombre"];
        pub const CODE: &[&str] = &["test_code", "prueba_code", "pruebaCode", "codigo", "code"];
        pub const DESCRIPTION: &[&str] = &[
            "description",
            "prueba_description",
            "pruebasDescription",
            "descripcion",
        ];
        pub const DURATION: &[&str] = &["time", "tiempo"];
    }
}

/// A key is "defined" when it is present and not JSON null
fn defined<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

/// First candidate that holds usable text.
///
/// Empty strings fall through to the next candidate; numbers are accepted and
/// stringified (older deployments stored some codes numerically), with `0`
/// falling through like the empty string. Defaults to `""`.
pub(crate) fn first_string(raw: &Value, keys: &[&str]) -> String {
    for key in keys {
        match defined(raw, key) {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

/// First candidate that is present decides the flag; an explicit `false`
/// wins over any truthy legacy spelling further down the chain.
fn first_bool(raw: &Value, keys: &[&str], default: bool) -> bool {
    for key in keys {
        if let Some(value) = defined(raw, key) {
            return match value {
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64() != Some(0.0),
                Value::String(s) => !matches!(s.trim().to_ascii_lowercase().as_str(), "" | "false" | "0"),
                _ => default,
            };
        }
    }
    default
}

/// First candidate that coerces to a number; candidates that are defined but
/// non-numeric fall through. Defaults to `0`.
fn first_number(raw: &Value, keys: &[&str]) -> f64 {
    for key in keys {
        match defined(raw, key) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_f64() {
                    return v;
                }
            }
            Some(Value::String(s)) => {
                if let Ok(v) = s.trim().parse::<f64>() {
                    return v;
                }
            }
            _ => {}
        }
    }
    0.0
}

/// Identifier precedence: external id, internal alternate id, business code.
/// Guarantees every record is addressable even when the backend omits a
/// canonical id; an empty string only remains when the code is also absent.
fn resolve_id(raw: &Value, code: &str) -> String {
    let id = first_string(raw, chains::ID);
    if id.is_empty() {
        code.to_string()
    } else {
        id
    }
}

/// Normalize a raw entity record
pub fn normalize_entity(raw: &Value) -> EntityRecord {
    let name = first_string(raw, chains::entity::NAME);
    let code = first_string(raw, chains::entity::CODE);

    EntityRecord {
        id: resolve_id(raw, &code),
        observations: first_string(raw, chains::entity::OBSERVATIONS),
        is_active: first_bool(raw, chains::ACTIVE, true),
        created_at: first_string(raw, chains::CREATED_AT),
        updated_at: first_string(raw, chains::UPDATED_AT),
        entity_name: name.clone(),
        entity_code: code.clone(),
        name,
        code,
    }
}

/// Normalize a raw resident record
pub fn normalize_resident(raw: &Value) -> ResidentRecord {
    let name = first_string(raw, chains::resident::NAME);
    let code = first_string(raw, chains::resident::CODE);
    let email = first_string(raw, chains::resident::EMAIL);
    let initials = first_string(raw, chains::resident::INITIALS);

    ResidentRecord {
        id: resolve_id(raw, &code),
        medical_license: first_string(raw, chains::MEDICAL_LICENSE),
        is_active: first_bool(raw, chains::ACTIVE, true),
        documento: code.clone(),
        observations: first_string(raw, chains::OBSERVATIONS),
        created_at: first_string(raw, chains::CREATED_AT),
        updated_at: first_string(raw, chains::UPDATED_AT),
        residente_name: name.clone(),
        residente_code: code.clone(),
        residente_email: email.clone(),
        iniciales_residente: initials.clone(),
        name,
        code,
        email,
        initials,
    }
}

/// Normalize a raw pathologist record
pub fn normalize_pathologist(raw: &Value) -> PathologistRecord {
    let name = first_string(raw, chains::pathologist::NAME);
    let code = first_string(raw, chains::pathologist::CODE);
    let email = first_string(raw, chains::pathologist::EMAIL);
    let initials = first_string(raw, chains::pathologist::INITIALS);

    PathologistRecord {
        id: resolve_id(raw, &code),
        medical_license: first_string(raw, chains::MEDICAL_LICENSE),
        signature: first_string(raw, chains::pathologist::SIGNATURE),
        is_active: first_bool(raw, chains::ACTIVE, true),
        observations: first_string(raw, chains::OBSERVATIONS),
        created_at: first_string(raw, chains::CREATED_AT),
        updated_at: first_string(raw, chains::UPDATED_AT),
        patologo_name: name.clone(),
        patologo_code: code.clone(),
        patologo_email: email.clone(),
        iniciales_patologo: initials.clone(),
        name,
        code,
        email,
        initials,
    }
}

/// Normalize a raw auxiliary staff record
pub fn normalize_auxiliary(raw: &Value) -> AuxiliaryRecord {
    let name = first_string(raw, chains::auxiliary::NAME);
    let code = first_string(raw, chains::auxiliary::CODE);
    let email = first_string(raw, chains::auxiliary::EMAIL);

    AuxiliaryRecord {
        id: resolve_id(raw, &code),
        is_active: first_bool(raw, chains::ACTIVE, true),
        observations: first_string(raw, chains::OBSERVATIONS),
        created_at: first_string(raw, chains::CREATED_AT),
        updated_at: first_string(raw, chains::UPDATED_AT),
        auxiliar_name: name.clone(),
        auxiliar_code: code.clone(),
        auxiliar_email: email.clone(),
        name,
        code,
        email,
    }
}

/// Normalize a raw billing user record
pub fn normalize_billing(raw: &Value) -> BillingRecord {
    let name = first_string(raw, chains::billing::NAME);
    let code = first_string(raw, chains::billing::CODE);
    let email = first_string(raw, chains::billing::EMAIL);

    BillingRecord {
        id: resolve_id(raw, &code),
        is_active: first_bool(raw, chains::ACTIVE, true),
        observations: first_string(raw, chains::OBSERVATIONS),
        created_at: first_string(raw, chains::CREATED_AT),
        updated_at: first_string(raw, chains::UPDATED_AT),
        facturacion_name: name.clone(),
        facturacion_code: code.clone(),
        facturacion_email: email.clone(),
        name,
        code,
        email,
    }
}

/// Normalize a raw diagnostic test record
pub fn normalize_test(raw: &Value) -> TestRecord {
    let name = first_string(raw, chains::test::NAME);
    let code = first_string(raw, chains::test::CODE);
    let description = first_string(raw, chains::test::DESCRIPTION);

    TestRecord {
        id: resolve_id(raw, &code),
        duration: first_number(raw, chains::test::DURATION),
        is_active: first_bool(raw, chains::ACTIVE, true),
        created_at: first_string(raw, chains::CREATED_AT),
        updated_at: first_string(raw, chains::UPDATED_AT),
        pruebas_name: name.clone(),
        prueba_code: code.clone(),
        pruebas_description: description.clone(),
        name,
        code,
        description,
    }
}
