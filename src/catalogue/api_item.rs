//! API items parsed from rendered docstrings.
//!
//! Docstrings arrive as flattened text: a signature paragraph, prose, and
//! optional `Fields` / `Hierarchy of X:` blocks separated by blank lines.

use crate::models::DocRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Leading declaration of a type docstring.
static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(abstract type|mutable struct|struct|type)\s+[^\s{(]+")
        .expect("Failed to compile declaration regex")
});

/// Subtype listing header. The generator output also carries the `Hierachy` spelling.
static HIERARCHY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Hierar?chy of (?:the )?([^\s:]+)\s*:$")
        .expect("Failed to compile hierarchy regex")
});

/// Trailing unit annotation, e.g. `[mol m⁻² s⁻¹]`.
static UNIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\[\]]+)\]\s*$").expect("Failed to compile unit regex"));

/// A bare field name on its own line.
static IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}_][\p{L}\p{N}_!]*$").expect("Failed to compile identifier regex")
});

/// Kind of an API item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKind {
    AbstractType,
    Type,
    Struct,
    MutableStruct,
    Function,
}

impl ApiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AbstractType => "abstract_type",
            Self::Type => "type",
            Self::Struct => "struct",
            Self::MutableStruct => "mutable_struct",
            Self::Function => "function",
        }
    }

    /// Abstract types only exist to be subtyped.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::AbstractType | Self::Type)
    }
}

/// A documented field or argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDoc {
    pub name: String,

    /// Description with the unit annotation removed
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl FieldDoc {
    /// Build a field from its name and raw description, splitting off the unit.
    pub fn parse(name: impl Into<String>, raw_description: &str) -> Self {
        let raw = raw_description.split_whitespace().collect::<Vec<_>>().join(" ");
        let (description, unit) = match UNIT_RE.captures(&raw) {
            Some(caps) => {
                let start = caps.get(0).map_or(raw.len(), |m| m.start());
                (
                    raw[..start].trim_end().to_string(),
                    caps.get(1).map(|m| m.as_str().trim().to_string()),
                )
            }
            None => (raw.clone(), None),
        };

        Self {
            name: name.into(),
            description,
            unit,
        }
    }
}

/// A type or function of the documented package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiItem {
    /// Unqualified name (`ESMMedlyn`)
    pub name: String,

    /// Record title (`StomataModels.ESMMedlyn`)
    pub qualified_name: String,

    pub kind: ApiKind,

    /// Declaration or call signatures, one per line
    pub signature: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Struct fields, or documented arguments for functions
    pub fields: Vec<FieldDoc>,

    /// Subtypes listed in the docstring, in listing order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<String>,

    /// Location of the source record
    pub location: String,
}

impl ApiItem {
    /// Parse an API item from a `type` or `function` record.
    ///
    /// Returns `None` for prose records.
    pub fn from_record(record: &DocRecord) -> Option<Self> {
        if !record.is_api_item() {
            return None;
        }

        let blocks = split_blocks(&record.text);
        let signature = blocks.first().map(|b| b.to_string()).unwrap_or_default();
        let kind = detect_kind(record, &signature);

        let mut summary = None;
        let mut fields = Vec::new();
        let mut subtypes = Vec::new();

        let mut i = 1;
        while i < blocks.len() {
            let block = blocks[i];
            let next = blocks.get(i + 1).copied();

            if block.trim() == "Fields" {
                if let Some(next) = next.filter(|n| !is_header(n)) {
                    fields.extend(parse_field_block(next));
                    i += 1;
                }
            } else if HIERARCHY_RE.is_match(block) {
                if let Some(next) = next {
                    subtypes.extend(
                        next.lines()
                            .map(str::trim)
                            .filter(|l| !l.is_empty())
                            .map(String::from),
                    );
                    i += 1;
                }
            } else {
                if summary.is_none() {
                    summary = Some(collapse(block));
                }
                if block.trim_end().ends_with("given") {
                    if let Some(next) = next.filter(|n| !is_header(n)) {
                        fields.extend(parse_argument_block(next));
                        i += 1;
                    }
                }
            }
            i += 1;
        }

        Some(Self {
            name: record.symbol_name().to_string(),
            qualified_name: record.title.clone(),
            kind,
            signature,
            summary,
            fields,
            subtypes,
            location: record.location.clone(),
        })
    }

    /// Look up a documented field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDoc> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn split_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                blocks.push(text[s..end].trim_end());
            }
        } else {
            if start.is_none() {
                start = Some(offset);
            }
            end = offset + line.len();
        }
        offset += line.len();
    }
    if let Some(s) = start {
        blocks.push(text[s..end].trim_end());
    }
    blocks
}

fn is_header(block: &str) -> bool {
    block.trim() == "Fields" || HIERARCHY_RE.is_match(block)
}

fn collapse(block: &str) -> String {
    block.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn detect_kind(record: &DocRecord, signature: &str) -> ApiKind {
    if record.category == crate::domain::Category::Function {
        return ApiKind::Function;
    }
    match DECLARATION_RE
        .captures(signature)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    {
        Some("abstract type") => ApiKind::AbstractType,
        Some("mutable struct") => ApiKind::MutableStruct,
        Some("struct") => ApiKind::Struct,
        _ => ApiKind::Type,
    }
}

/// Name and description lines alternate; a name directly followed by another
/// name has no description.
fn parse_field_block(block: &str) -> Vec<FieldDoc> {
    let mut fields: Vec<FieldDoc> = Vec::new();
    let mut pending: Option<(String, Vec<&str>)> = None;

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if IDENT_RE.is_match(line) {
            if let Some((name, desc)) = pending.take() {
                fields.push(FieldDoc::parse(name, &desc.join(" ")));
            }
            pending = Some((line.to_string(), Vec::new()));
        } else if let Some((_, desc)) = pending.as_mut() {
            desc.push(line);
        }
    }
    if let Some((name, desc)) = pending {
        fields.push(FieldDoc::parse(name, &desc.join(" ")));
    }
    fields
}

/// One argument per line: the name, then its description.
fn parse_argument_block(block: &str) -> Vec<FieldDoc> {
    block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| {
            let split = line
                .find(|c: char| c.is_whitespace() || c == '[')
                .unwrap_or(line.len());
            FieldDoc::parse(&line[..split], &line[split..])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn leuning() -> DocRecord {
        DocRecord::new(
            "API/#StomataModels.ESMLeuning",
            "API",
            "StomataModels.ESMLeuning",
            "struct ESMLeuning{FT}\n\nAn empirical model parameter set type for Leuning type model. The equation used for Leuning type model is\n\ngs = g0 + g1  dfracACs - Γ^*  dfrac11 + dfracVPDd0\n\nFields\n\ng0\nminimal stomatal conductance g0 [mol m⁻² s⁻¹]\ng1\nslope of conductance-photosynthesis correlation [unitless]\nd0\nfitting parameter of d/d0 below the fraction, same unit as vpd [Pa]\n\n\n\n\n\n",
            Category::Type,
        )
    }

    #[test]
    fn test_struct_with_fields() {
        let item = ApiItem::from_record(&leuning()).unwrap();

        assert_eq!(item.name, "ESMLeuning");
        assert_eq!(item.qualified_name, "StomataModels.ESMLeuning");
        assert_eq!(item.kind, ApiKind::Struct);
        assert_eq!(item.signature, "struct ESMLeuning{FT}");
        assert!(item.summary.as_deref().unwrap().starts_with("An empirical model"));

        let names: Vec<&str> = item.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["g0", "g1", "d0"]);
        assert_eq!(item.field("d0").unwrap().unit.as_deref(), Some("Pa"));
        assert_eq!(
            item.field("g0").unwrap().description,
            "minimal stomatal conductance g0"
        );
        assert_eq!(item.field("g0").unwrap().unit.as_deref(), Some("mol m⁻² s⁻¹"));
    }

    #[test]
    fn test_abstract_type_with_misspelled_hierarchy() {
        let record = DocRecord::new(
            "API/#StomataModels.AbstractBetaG",
            "API",
            "StomataModels.AbstractBetaG",
            "abstract type AbstractBetaG{FT}\n\nHierachy of AbstractBetaG:\n\nBetaGLinearPleaf\nBetaGLinearPsoil\nBetaGLinearSWC\n\n\n\n\n\n",
            Category::Type,
        );
        let item = ApiItem::from_record(&record).unwrap();

        assert_eq!(item.kind, ApiKind::AbstractType);
        assert_eq!(item.summary, None);
        assert!(item.fields.is_empty());
        assert_eq!(
            item.subtypes,
            vec!["BetaGLinearPleaf", "BetaGLinearPsoil", "BetaGLinearSWC"]
        );
    }

    #[test]
    fn test_plain_type_kind() {
        let record = DocRecord::new(
            "API/#StomataModels.AbstractStomatalModel",
            "API",
            "StomataModels.AbstractStomatalModel",
            "type AbstractStomatalModel\n\nHierarchy of the AbstractStomatalModel:\n\nEmpiricalStomatalModel\nOptimizationStomatalModel\n\n",
            Category::Type,
        );
        let item = ApiItem::from_record(&record).unwrap();
        assert_eq!(item.kind, ApiKind::Type);
        assert_eq!(item.subtypes.len(), 2);
    }

    #[test]
    fn test_empty_fields_block() {
        let record = DocRecord::new(
            "API/#StomataModels.OSMWang",
            "API",
            "StomataModels.OSMWang",
            "struct OSMWang\n\nAn optimization model parameter set type for Eller type model.\n\ndfracΘE = dfracAE_crit - E\n\nFields\n\n\n\n\n\n",
            Category::Type,
        );
        let item = ApiItem::from_record(&record).unwrap();
        assert!(item.fields.is_empty());
    }

    #[test]
    fn test_field_without_description() {
        let fields = parse_field_block("LAI\nTotal leaf area index\nn_leaf\nH\nSensible Heat Flux [W m⁻²]");
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["LAI", "n_leaf", "H"]);
        assert_eq!(fields[1].description, "");
        assert_eq!(fields[2].unit.as_deref(), Some("W m⁻²"));
    }

    #[test]
    fn test_function_arguments() {
        let record = DocRecord::new(
            "API/#StomataModels.β_factor",
            "API",
            "StomataModels.β_factor",
            "β_factor(bt::AbstractBetaFunction{FT},\n         pl::FT,\n         ps::FT,\n         swc::FT) where {FT<:AbstractFloat}\n\nCalculate the β correction factor, given\n\nbt AbstractBetaFunction type struct\npl Leaf water potential [MPa]\nps Soil water potential [MPa]\nswc Soil water content\n\n\n\n\n\n",
            Category::Function,
        );
        let item = ApiItem::from_record(&record).unwrap();

        assert_eq!(item.kind, ApiKind::Function);
        assert!(item.signature.starts_with("β_factor(bt::AbstractBetaFunction{FT},"));
        assert_eq!(item.summary.as_deref(), Some("Calculate the β correction factor, given"));
        let names: Vec<&str> = item.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["bt", "pl", "ps", "swc"]);
        assert_eq!(item.field("pl").unwrap().unit.as_deref(), Some("MPa"));
        assert_eq!(item.field("swc").unwrap().unit, None);
    }

    #[test]
    fn test_argument_name_glued_to_bracket() {
        let args = parse_argument_block("photo_set[C3ParaSet] or [C4ParaSet] type parameter set");
        assert_eq!(args[0].name, "photo_set");
        assert_eq!(args[0].description, "[C3ParaSet] or [C4ParaSet] type parameter set");
    }

    #[test]
    fn test_prose_record_is_not_an_item() {
        let record = DocRecord::new("API/", "API", "API", "text", Category::Page);
        assert!(ApiItem::from_record(&record).is_none());
    }
}
