use serde::Serialize;

use crate::packaging::PackagingType;

/// The three collected facts, final once every prompt has a definite answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuidanceRequest {
    pub packaging_type: PackagingType,
    pub is_washable: bool,
    pub has_hazardous_residue: bool,
}

/// Validated model reply. Field names on the wire follow the legal vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GuidanceRecord {
    #[serde(rename = "tipo_embalagem")]
    pub packaging_type: String,
    #[serde(rename = "e_lavavel")]
    pub is_washable: bool,
    #[serde(rename = "contem_residuos")]
    pub has_hazardous_residue: bool,
    #[serde(rename = "orientacao")]
    pub guidance: String,
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Sim"
    } else {
        "Não"
    }
}

impl GuidanceRecord {
    /// Terminal rendering shown after a successful request.
    pub fn render(&self) -> String {
        format!(
            "Orientação:\nTipo de embalagem: {}\nÉ lavável: {}\nContém resíduos perigosos: {}\nOrientação: {}",
            self.packaging_type,
            yes_no(self.is_washable),
            yes_no(self.has_hazardous_residue),
            self.guidance
        )
    }
}
