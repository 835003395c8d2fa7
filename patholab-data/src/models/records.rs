//! Canonical directory records
//!
//! One struct per resource type, with the guaranteed field set the
//! normalizer resolves from whichever backend generation supplied the raw
//! data. Every field is always populated: strings default to `""`, the
//! activity flag to `true`, numbers to `0`.
//!
//! Each record also carries its resource-prefixed alias fields (serialized
//! under the historical names, e.g. `residenteName`, `ResidenteEmail`) so
//! consumers still reading the older shape keep working while they migrate.

use serde::Serialize;

/// A client organization (hospital, clinic, insurer)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub id: String,
    pub name: String,
    pub code: String,
    pub observations: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    /// Legacy alias of `name`
    pub entity_name: String,
    /// Legacy alias of `code`
    pub entity_code: String,
}

/// A resident physician
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentRecord {
    pub id: String,
    pub name: String,
    pub code: String,
    pub email: String,
    pub initials: String,
    pub medical_license: String,
    pub is_active: bool,
    /// Identity document; mirrors the resolved business code
    pub documento: String,
    pub observations: String,
    pub created_at: String,
    pub updated_at: String,
    /// Legacy alias of `name`
    pub residente_name: String,
    /// Legacy alias of `code`
    pub residente_code: String,
    /// Legacy alias of `email`
    #[serde(rename = "ResidenteEmail")]
    pub residente_email: String,
    /// Legacy alias of `initials`
    #[serde(rename = "InicialesResidente")]
    pub iniciales_residente: String,
}

/// A pathologist
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathologistRecord {
    pub id: String,
    pub name: String,
    pub code: String,
    pub email: String,
    pub initials: String,
    pub medical_license: String,
    /// Signature image reference, empty when none is registered
    pub signature: String,
    pub is_active: bool,
    pub observations: String,
    pub created_at: String,
    pub updated_at: String,
    /// Legacy alias of `name`
    pub patologo_name: String,
    /// Legacy alias of `code`
    pub patologo_code: String,
    /// Legacy alias of `email`
    #[serde(rename = "PatologoEmail")]
    pub patologo_email: String,
    /// Legacy alias of `initials`
    #[serde(rename = "InicialesPatologo")]
    pub iniciales_patologo: String,
}

/// An auxiliary staff member
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuxiliaryRecord {
    pub id: String,
    pub name: String,
    pub code: String,
    pub email: String,
    pub is_active: bool,
    pub observations: String,
    pub created_at: String,
    pub updated_at: String,
    /// Legacy alias of `name`
    pub auxiliar_name: String,
    /// Legacy alias of `code`
    pub auxiliar_code: String,
    /// Legacy alias of `email`
    #[serde(rename = "AuxiliarEmail")]
    pub auxiliar_email: String,
}

/// A billing user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    pub id: String,
    pub name: String,
    pub code: String,
    pub email: String,
    pub is_active: bool,
    pub observations: String,
    pub created_at: String,
    pub updated_at: String,
    /// Legacy alias of `name`
    pub facturacion_name: String,
    /// Legacy alias of `code`
    pub facturacion_code: String,
    /// Legacy alias of `email`
    #[serde(rename = "FacturacionEmail")]
    pub facturacion_email: String,
}

/// A diagnostic test offered by the laboratory
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: String,
    /// Expected processing time in days
    pub duration: f64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    /// Legacy alias of `name`
    pub pruebas_name: String,
    /// Legacy alias of `code`
    pub prueba_code: String,
    /// Legacy alias of `description`
    pub pruebas_description: String,
}
