//! Declared shape of the model's reply and validation against it.

use serde_json::{json, Map, Value};

use crate::domain::guidance::GuidanceRecord;
use crate::errors::GuidanceError;
use crate::text::normalize_answer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
}

impl FieldKind {
    fn json_type(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

pub const PACKAGING_TYPE_FIELD: &str = "tipo_embalagem";
pub const WASHABLE_FIELD: &str = "e_lavavel";
pub const HAZARD_FIELD: &str = "contem_residuos";
pub const GUIDANCE_FIELD: &str = "orientacao";

/// Four required fields; every one carries a description for the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseSchema {
    name: &'static str,
    fields: Vec<SchemaField>,
}

impl Default for ResponseSchema {
    fn default() -> Self {
        Self {
            name: "embalagem",
            fields: vec![
                SchemaField {
                    name: PACKAGING_TYPE_FIELD,
                    kind: FieldKind::String,
                    description: "Tipo de embalagem (ex., Plástica, Metálica)",
                },
                SchemaField {
                    name: WASHABLE_FIELD,
                    kind: FieldKind::Boolean,
                    description: "Indica se a embalagem é lavável",
                },
                SchemaField {
                    name: HAZARD_FIELD,
                    kind: FieldKind::Boolean,
                    description: "Indica se a embalagem contém resíduos perigosos",
                },
                SchemaField {
                    name: GUIDANCE_FIELD,
                    kind: FieldKind::String,
                    description: "Orientação para destinação correta",
                },
            ],
        }
    }
}

impl ResponseSchema {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// JSON Schema document sent with the request.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| {
                (
                    field.name.to_string(),
                    json!({ "type": field.kind.json_type(), "description": field.description }),
                )
            })
            .collect();
        let required: Vec<&str> = self.fields.iter().map(|field| field.name).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false
        })
    }

    /// Parse and coerce a raw reply into a [`GuidanceRecord`].
    ///
    /// Accepts a reply wrapped in a Markdown code fence. Booleans sent as
    /// "true"/"false"/"sim"/"não" strings are coerced; extra keys are ignored.
    pub fn validate(&self, raw: &str) -> Result<GuidanceRecord, GuidanceError> {
        let body = strip_code_fence(raw);
        if body.is_empty() {
            return Err(GuidanceError::EmptyReply);
        }

        let value: Value = serde_json::from_str(body)
            .map_err(|error| GuidanceError::MalformedReply(error.to_string()))?;
        let Value::Object(object) = value else {
            return Err(GuidanceError::MalformedReply("esperado um objeto JSON".to_string()));
        };

        Ok(GuidanceRecord {
            packaging_type: string_field(&object, PACKAGING_TYPE_FIELD)?,
            is_washable: bool_field(&object, WASHABLE_FIELD)?,
            has_hazardous_residue: bool_field(&object, HAZARD_FIELD)?,
            guidance: string_field(&object, GUIDANCE_FIELD)?,
        })
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Drop the info string (e.g. `json`) on the opening line. A one-line
    // fence has none; its body starts right after the backticks.
    match rest.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => rest.trim(),
    }
}

fn expect_string<'a>(field: &str, value: &'a Value) -> Result<&'a str, GuidanceError> {
    value.as_str().ok_or_else(|| GuidanceError::schema(field, "esperado texto"))
}

fn coerce_bool(field: &str, value: &Value) -> Result<bool, GuidanceError> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) => match normalize_answer(text).as_str() {
            "true" | "sim" => Ok(true),
            "false" | "nao" => Ok(false),
            _ => Err(GuidanceError::schema(field, format!("valor booleano inválido `{text}`"))),
        },
        _ => Err(GuidanceError::schema(field, "esperado booleano")),
    }
}

fn string_field(object: &Map<String, Value>, field: &str) -> Result<String, GuidanceError> {
    let value =
        object.get(field).ok_or_else(|| GuidanceError::schema(field, "campo obrigatório ausente"))?;
    expect_string(field, value).map(str::to_string)
}

fn bool_field(object: &Map<String, Value>, field: &str) -> Result<bool, GuidanceError> {
    let value =
        object.get(field).ok_or_else(|| GuidanceError::schema(field, "campo obrigatório ausente"))?;
    coerce_bool(field, value)
}

#[cfg(test)]
mod tests {
    use super::{ResponseSchema, GUIDANCE_FIELD, WASHABLE_FIELD};
    use crate::errors::GuidanceError;

    const VALID: &str = r#"{
        "tipo_embalagem": "plastica",
        "e_lavavel": true,
        "contem_residuos": false,
        "orientacao": "Faça a tríplice lavagem e devolva ao posto de recebimento."
    }"#;

    #[test]
    fn json_schema_declares_four_required_fields_with_descriptions() {
        let schema = ResponseSchema::default().to_json_schema();
        let required = schema["required"].as_array().cloned().unwrap_or_default();
        assert_eq!(required.len(), 4);
        assert_eq!(schema["properties"]["e_lavavel"]["type"], "boolean");
        assert_eq!(schema["properties"]["orientacao"]["type"], "string");
        for field in ResponseSchema::default().fields() {
            assert!(
                schema["properties"][field.name]["description"].is_string(),
                "no description for {}",
                field.name
            );
        }
    }

    #[test]
    fn validates_well_formed_reply() {
        let record = ResponseSchema::default().validate(VALID);
        let record = match record {
            Ok(record) => record,
            Err(error) => panic!("valid reply rejected: {error}"),
        };
        assert_eq!(record.packaging_type, "plastica");
        assert!(record.is_washable);
        assert!(!record.has_hazardous_residue);
        assert!(record.guidance.contains("tríplice lavagem"));
    }

    #[test]
    fn accepts_fenced_reply() {
        let fenced = format!("```json\n{VALID}\n```");
        assert!(ResponseSchema::default().validate(&fenced).is_ok());
    }

    #[test]
    fn accepts_single_line_fenced_reply() {
        let fenced = r#"```{"tipo_embalagem":"vidro","e_lavavel":false,"contem_residuos":true,"orientacao":"Devolva ao posto."}```"#;
        let record = ResponseSchema::default().validate(fenced);
        assert_eq!(record.as_ref().map(|r| r.packaging_type.as_str()), Ok("vidro"));
        assert_eq!(record.map(|r| r.has_hazardous_residue), Ok(true));

        let bare = "```\n```";
        assert_eq!(ResponseSchema::default().validate(bare), Err(GuidanceError::EmptyReply));
    }

    #[test]
    fn coerces_string_booleans() {
        let reply = r#"{"tipo_embalagem":"vidro","e_lavavel":"Sim","contem_residuos":"false","orientacao":"ok"}"#;
        let record = ResponseSchema::default().validate(reply);
        assert_eq!(record.as_ref().map(|r| (r.is_washable, r.has_hazardous_residue)), Ok((true, false)));
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let reply = r#"{"tipo_embalagem":"vidro","e_lavavel":true,"contem_residuos":false}"#;
        let error = ResponseSchema::default().validate(reply).err();
        assert!(matches!(
            error,
            Some(GuidanceError::SchemaViolation { ref field, .. }) if field == GUIDANCE_FIELD
        ));
    }

    #[test]
    fn wrong_type_is_reported_by_name() {
        let reply = r#"{"tipo_embalagem":"vidro","e_lavavel":3,"contem_residuos":false,"orientacao":"x"}"#;
        let error = ResponseSchema::default().validate(reply).err();
        assert!(matches!(
            error,
            Some(GuidanceError::SchemaViolation { ref field, .. }) if field == WASHABLE_FIELD
        ));
    }

    #[test]
    fn non_json_and_non_object_replies_are_malformed() {
        let schema = ResponseSchema::default();
        assert!(matches!(
            schema.validate("Não posso ajudar com isso."),
            Err(GuidanceError::MalformedReply(_))
        ));
        assert!(matches!(schema.validate("[1, 2]"), Err(GuidanceError::MalformedReply(_))));
        assert_eq!(schema.validate("   "), Err(GuidanceError::EmptyReply));
    }

    #[test]
    fn extra_keys_are_ignored_and_empty_guidance_is_allowed() {
        let reply = r#"{"tipo_embalagem":"aluminio","e_lavavel":false,"contem_residuos":false,"orientacao":"","observacao":"tipo não reconhecido"}"#;
        let record = ResponseSchema::default().validate(reply);
        assert_eq!(record.map(|r| r.guidance), Ok(String::new()));
    }
}
