use crate::domain::guidance::{yes_no, GuidanceRequest};
use crate::packaging::PackagingTaxonomy;
use crate::schema::ResponseSchema;

pub const LEGAL_REFERENCE: &str = "Lei nº 14.785, de 27 de dezembro de 2023";

/// Renders the instruction sent to the model for one guidance request.
#[derive(Clone, Debug, Default)]
pub struct GuidanceRequestBuilder {
    taxonomy: PackagingTaxonomy,
    schema: ResponseSchema,
}

impl GuidanceRequestBuilder {
    pub fn new(taxonomy: PackagingTaxonomy, schema: ResponseSchema) -> Self {
        Self { taxonomy, schema }
    }

    pub fn build(&self, request: &GuidanceRequest) -> String {
        let field_names =
            self.schema.fields().iter().map(|field| field.name).collect::<Vec<_>>().join(", ");

        format!(
            "Você é um assistente especializado em destinação de embalagens de defensivos agrícolas, conforme a {LEGAL_REFERENCE}.\n\
             O usuário forneceu os seguintes dados:\n\
             \n\
             Tipo de embalagem: {packaging_type}\n\
             É lavável: {washable}\n\
             Contém resíduos perigosos: {hazard}\n\
             \n\
             Se o tipo de embalagem informado não estiver entre as seguintes opções válidas: {valid_types}, \
             responda que o tipo de embalagem não é reconhecido pela legislação e não forneça uma orientação.\n\
             Caso contrário, forneça uma orientação clara e apropriada para o descarte dessa embalagem. \
             Responda no formato JSON com os campos: {field_names}.\n",
            packaging_type = request.packaging_type.as_str(),
            washable = yes_no(request.is_washable),
            hazard = yes_no(request.has_hazardous_residue),
            valid_types = self.taxonomy.joined(),
        )
    }
}
