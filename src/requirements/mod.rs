//! # Requirement Schema
//!
//! Typed, partially specified constraint objects, one per component category,
//! plus [`PcRequirements`] combining all five.
//!
//! Every field is optional and `None` always means "no preference": an absent
//! `min_cores` is not the same as `min_cores = 0`. Categorical list fields hold
//! canonical identifiers (see [`crate::enumeration`]); they are checked against
//! the startup canonical sets at runtime rather than encoded as Rust enums.
//!
//! ## Example
//!
//! ```
//! use build_advisor::enumeration::Enumerations;
//! use build_advisor::requirements::{parse_requirement, CpuRequirements};
//! use serde_json::json;
//!
//! let enumerations = Enumerations::default();
//! let req: CpuRequirements =
//!     parse_requirement(json!({"min_cores": "6", "max_price": 250}), &enumerations).unwrap();
//! assert_eq!(req.min_cores, Some(6));
//! assert_eq!(req.max_price, Some(250.0));
//! assert!(req.max_tdp_watts.is_none());
//! ```

mod coerce;
pub mod error;
pub mod schema;

pub use error::SchemaViolation;

use crate::catalog::Category;
use crate::enumeration::{normalize, CanonicalSet, Enumerations};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A per-category requirement object.
pub trait Requirement:
    DeserializeOwned + Serialize + Default + Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static
{
    const CATEGORY: Category;

    /// Title used for the schema sent to the model.
    const TITLE: &'static str;

    /// JSON schema with `enum` lists taken from `enumerations`.
    fn schema(enumerations: &Enumerations) -> Value;

    /// Check numeric ranges and canonicalize categorical lists in place.
    fn validate(&mut self, enumerations: &Enumerations) -> Result<(), SchemaViolation>;

    /// True when no field is set.
    fn is_unconstrained(&self) -> bool;
}

/// Deserialize and validate one requirement object.
pub fn parse_requirement<Q: Requirement>(
    value: Value,
    enumerations: &Enumerations,
) -> Result<Q, SchemaViolation> {
    let mut requirement: Q =
        serde_json::from_value(value).map_err(|e| SchemaViolation::shape(Q::TITLE, e))?;
    requirement.validate(enumerations)?;
    Ok(requirement)
}

fn check_non_negative(
    category: Category,
    field: &str,
    value: Option<f64>,
) -> Result<(), SchemaViolation> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(SchemaViolation::OutOfRange {
            field: format!("{}.{}", category, field),
            value: v,
        }),
        _ => Ok(()),
    }
}

/// Normalize each value and require membership in `allowed`.
///
/// Duplicates collapse; an empty list is kept and means "no restriction".
fn canonicalize(
    category: Category,
    field: &str,
    values: &mut Option<Vec<String>>,
    allowed: &CanonicalSet,
) -> Result<(), SchemaViolation> {
    let Some(list) = values.as_mut() else {
        return Ok(());
    };
    let mut canonical: Vec<String> = Vec::with_capacity(list.len());
    for raw in list.iter() {
        let id = normalize(raw);
        if !allowed.contains(&id) {
            return Err(SchemaViolation::UnknownValue {
                field: format!("{}.{}", category, field),
                value: raw.clone(),
            });
        }
        if !canonical.contains(&id) {
            canonical.push(id);
        }
    }
    *list = canonical;
    Ok(())
}

/// CPU constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CpuRequirements {
    #[serde(deserialize_with = "coerce::count")]
    pub min_cores: Option<u32>,
    #[serde(deserialize_with = "coerce::number")]
    pub min_core_clock_ghz: Option<f64>,
    #[serde(deserialize_with = "coerce::number")]
    pub min_boost_clock_ghz: Option<f64>,
    #[serde(deserialize_with = "coerce::list")]
    pub microarchitecture: Option<Vec<String>>,
    #[serde(deserialize_with = "coerce::number")]
    pub max_tdp_watts: Option<f64>,
    #[serde(deserialize_with = "coerce::flag")]
    pub needs_integrated_graphics: Option<bool>,
    #[serde(deserialize_with = "coerce::number")]
    pub min_rating: Option<f64>,
    #[serde(deserialize_with = "coerce::number")]
    pub max_price: Option<f64>,
}

impl Requirement for CpuRequirements {
    const CATEGORY: Category = Category::Cpu;
    const TITLE: &'static str = "CpuRequirements";

    fn schema(enumerations: &Enumerations) -> Value {
        schema::object(
            Self::TITLE,
            "Details of the preferred CPU",
            vec![
                ("min_cores", schema::integer("Minimum number of CPU cores desired")),
                ("min_core_clock_ghz", schema::number("Minimum core clock speed (in GHz)")),
                ("min_boost_clock_ghz", schema::number("Minimum boost clock speed (in GHz)")),
                (
                    "microarchitecture",
                    schema::enum_list(
                        "Preferred CPU microarchitectures, e.g. ['zen_4', 'raptor_lake']",
                        enumerations.get(Category::Cpu, "microarchitecture"),
                    ),
                ),
                ("max_tdp_watts", schema::number("Maximum thermal design power (in watts)")),
                (
                    "needs_integrated_graphics",
                    schema::boolean("Whether integrated graphics are required"),
                ),
                ("min_rating", schema::number("Minimum user rating (out of 5)")),
                ("max_price", schema::number("Maximum budget for the CPU (in USD)")),
            ],
        )
    }

    fn validate(&mut self, enumerations: &Enumerations) -> Result<(), SchemaViolation> {
        let c = Self::CATEGORY;
        check_non_negative(c, "min_core_clock_ghz", self.min_core_clock_ghz)?;
        check_non_negative(c, "min_boost_clock_ghz", self.min_boost_clock_ghz)?;
        check_non_negative(c, "max_tdp_watts", self.max_tdp_watts)?;
        check_non_negative(c, "min_rating", self.min_rating)?;
        check_non_negative(c, "max_price", self.max_price)?;
        canonicalize(
            c,
            "microarchitecture",
            &mut self.microarchitecture,
            enumerations.get(c, "microarchitecture"),
        )
    }

    fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// CPU cooler constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoolerRequirements {
    #[serde(deserialize_with = "coerce::number")]
    pub min_fan_rpm: Option<f64>,
    #[serde(deserialize_with = "coerce::number")]
    pub max_noise_level_db: Option<f64>,
    #[serde(deserialize_with = "coerce::number")]
    pub max_radiator_size_mm: Option<f64>,
    #[serde(deserialize_with = "coerce::list")]
    pub preferred_color: Option<Vec<String>>,
    #[serde(deserialize_with = "coerce::number")]
    pub min_rating: Option<f64>,
    #[serde(deserialize_with = "coerce::number")]
    pub max_price: Option<f64>,
}

impl Requirement for CoolerRequirements {
    const CATEGORY: Category = Category::Cooler;
    const TITLE: &'static str = "CoolerRequirements";

    fn schema(enumerations: &Enumerations) -> Value {
        schema::object(
            Self::TITLE,
            "Details of the preferred CPU cooler",
            vec![
                ("min_fan_rpm", schema::number("Minimum fan RPM for cooling performance")),
                ("max_noise_level_db", schema::number("Maximum noise level in decibels")),
                (
                    "max_radiator_size_mm",
                    schema::number("Maximum radiator size in mm (e.g. 240, 360)"),
                ),
                (
                    "preferred_color",
                    schema::enum_list(
                        "Preferred cooler colors",
                        enumerations.get(Category::Cooler, "color"),
                    ),
                ),
                ("min_rating", schema::number("Minimum user rating (out of 5)")),
                ("max_price", schema::number("Maximum budget for the cooler (in USD)")),
            ],
        )
    }

    fn validate(&mut self, enumerations: &Enumerations) -> Result<(), SchemaViolation> {
        let c = Self::CATEGORY;
        check_non_negative(c, "min_fan_rpm", self.min_fan_rpm)?;
        check_non_negative(c, "max_noise_level_db", self.max_noise_level_db)?;
        check_non_negative(c, "max_radiator_size_mm", self.max_radiator_size_mm)?;
        check_non_negative(c, "min_rating", self.min_rating)?;
        check_non_negative(c, "max_price", self.max_price)?;
        canonicalize(
            c,
            "preferred_color",
            &mut self.preferred_color,
            enumerations.get(c, "color"),
        )
    }

    fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Internal storage constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageRequirements {
    #[serde(deserialize_with = "coerce::number")]
    pub min_capacity_gb: Option<f64>,
    #[serde(deserialize_with = "coerce::list")]
    pub preferred_type: Option<Vec<String>>,
    #[serde(deserialize_with = "coerce::number")]
    pub min_cache_gb: Option<f64>,
    #[serde(deserialize_with = "coerce::list")]
    pub preferred_form_factor: Option<Vec<String>>,
    #[serde(deserialize_with = "coerce::list")]
    pub preferred_interface: Option<Vec<String>>,
    #[serde(deserialize_with = "coerce::number")]
    pub min_rating: Option<f64>,
    #[serde(deserialize_with = "coerce::number")]
    pub max_price_per_gb: Option<f64>,
}

impl Requirement for StorageRequirements {
    const CATEGORY: Category = Category::Storage;
    const TITLE: &'static str = "StorageRequirements";

    fn schema(enumerations: &Enumerations) -> Value {
        let c = Self::CATEGORY;
        schema::object(
            Self::TITLE,
            "Details of the preferred internal drive for storage",
            vec![
                ("min_capacity_gb", schema::number("Minimum storage capacity in GB")),
                (
                    "preferred_type",
                    schema::enum_list("Drive types, e.g. ['ssd']", enumerations.get(c, "type")),
                ),
                (
                    "min_cache_gb",
                    schema::number("Minimum cache size in GB (a small number, e.g. 0.512 or 2.048)"),
                ),
                (
                    "preferred_form_factor",
                    schema::enum_list(
                        "Preferred drive form factors",
                        enumerations.get(c, "form_factor"),
                    ),
                ),
                (
                    "preferred_interface",
                    schema::enum_list("Preferred drive interfaces", enumerations.get(c, "interface")),
                ),
                ("min_rating", schema::number("Minimum user rating (out of 5)")),
                (
                    "max_price_per_gb",
                    schema::number("Maximum budget per gigabyte of storage (in USD)"),
                ),
            ],
        )
    }

    fn validate(&mut self, enumerations: &Enumerations) -> Result<(), SchemaViolation> {
        let c = Self::CATEGORY;
        check_non_negative(c, "min_capacity_gb", self.min_capacity_gb)?;
        check_non_negative(c, "min_cache_gb", self.min_cache_gb)?;
        check_non_negative(c, "min_rating", self.min_rating)?;
        check_non_negative(c, "max_price_per_gb", self.max_price_per_gb)?;
        canonicalize(c, "preferred_type", &mut self.preferred_type, enumerations.get(c, "type"))?;
        canonicalize(
            c,
            "preferred_form_factor",
            &mut self.preferred_form_factor,
            enumerations.get(c, "form_factor"),
        )?;
        canonicalize(
            c,
            "preferred_interface",
            &mut self.preferred_interface,
            enumerations.get(c, "interface"),
        )
    }

    fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Memory kit constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryRequirements {
    #[serde(deserialize_with = "coerce::number")]
    pub min_capacity_gb: Option<f64>,
    #[serde(deserialize_with = "coerce::number")]
    pub min_speed_mhz: Option<f64>,
    #[serde(deserialize_with = "coerce::count")]
    pub max_module_count: Option<u32>,
    #[serde(deserialize_with = "coerce::number")]
    pub max_cas_latency: Option<f64>,
    #[serde(deserialize_with = "coerce::list")]
    pub preferred_color: Option<Vec<String>>,
    #[serde(deserialize_with = "coerce::number")]
    pub min_rating: Option<f64>,
    #[serde(deserialize_with = "coerce::number")]
    pub max_price: Option<f64>,
}

impl Requirement for MemoryRequirements {
    const CATEGORY: Category = Category::Memory;
    const TITLE: &'static str = "MemoryRequirements";

    fn schema(enumerations: &Enumerations) -> Value {
        schema::object(
            Self::TITLE,
            "Details of the preferred memory (RAM) kit",
            vec![
                ("min_capacity_gb", schema::number("Minimum total memory capacity in GB")),
                ("min_speed_mhz", schema::number("Minimum memory speed in MHz")),
                (
                    "max_module_count",
                    schema::integer("Maximum number of modules (e.g. 4 for quad-channel)"),
                ),
                ("max_cas_latency", schema::number("Maximum acceptable CAS latency")),
                (
                    "preferred_color",
                    schema::enum_list(
                        "Preferred memory colors",
                        enumerations.get(Category::Memory, "color"),
                    ),
                ),
                ("min_rating", schema::number("Minimum user rating (out of 5)")),
                ("max_price", schema::number("Maximum budget for memory (in USD)")),
            ],
        )
    }

    fn validate(&mut self, enumerations: &Enumerations) -> Result<(), SchemaViolation> {
        let c = Self::CATEGORY;
        check_non_negative(c, "min_capacity_gb", self.min_capacity_gb)?;
        check_non_negative(c, "min_speed_mhz", self.min_speed_mhz)?;
        check_non_negative(c, "max_cas_latency", self.max_cas_latency)?;
        check_non_negative(c, "min_rating", self.min_rating)?;
        check_non_negative(c, "max_price", self.max_price)?;
        canonicalize(
            c,
            "preferred_color",
            &mut self.preferred_color,
            enumerations.get(c, "color"),
        )
    }

    fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Motherboard constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotherboardRequirements {
    #[serde(deserialize_with = "coerce::list")]
    pub preferred_socket: Option<Vec<String>>,
    #[serde(deserialize_with = "coerce::list")]
    pub preferred_form_factor: Option<Vec<String>>,
    #[serde(deserialize_with = "coerce::number")]
    pub min_max_memory_gb: Option<f64>,
    #[serde(deserialize_with = "coerce::count")]
    pub min_memory_slots: Option<u32>,
    #[serde(deserialize_with = "coerce::list")]
    pub preferred_color: Option<Vec<String>>,
    #[serde(deserialize_with = "coerce::number")]
    pub min_rating: Option<f64>,
    #[serde(deserialize_with = "coerce::number")]
    pub max_price: Option<f64>,
}

impl Requirement for MotherboardRequirements {
    const CATEGORY: Category = Category::Motherboard;
    const TITLE: &'static str = "MotherboardRequirements";

    fn schema(enumerations: &Enumerations) -> Value {
        let c = Self::CATEGORY;
        schema::object(
            Self::TITLE,
            "Details of the preferred motherboard",
            vec![
                (
                    "preferred_socket",
                    schema::enum_list(
                        "CPU socket types, e.g. ['am5', 'lga1700']",
                        enumerations.get(c, "cpu_socket"),
                    ),
                ),
                (
                    "preferred_form_factor",
                    schema::enum_list(
                        "Motherboard form factors, e.g. ['atx', 'micro_atx']",
                        enumerations.get(c, "form_factor"),
                    ),
                ),
                (
                    "min_max_memory_gb",
                    schema::number("Minimum supported maximum memory in GB"),
                ),
                ("min_memory_slots", schema::integer("Minimum number of memory slots")),
                (
                    "preferred_color",
                    schema::enum_list("Preferred motherboard colors", enumerations.get(c, "color")),
                ),
                ("min_rating", schema::number("Minimum user rating (out of 5)")),
                ("max_price", schema::number("Maximum budget for the motherboard (in USD)")),
            ],
        )
    }

    fn validate(&mut self, enumerations: &Enumerations) -> Result<(), SchemaViolation> {
        let c = Self::CATEGORY;
        check_non_negative(c, "min_max_memory_gb", self.min_max_memory_gb)?;
        check_non_negative(c, "min_rating", self.min_rating)?;
        check_non_negative(c, "max_price", self.max_price)?;
        canonicalize(
            c,
            "preferred_socket",
            &mut self.preferred_socket,
            enumerations.get(c, "cpu_socket"),
        )?;
        canonicalize(
            c,
            "preferred_form_factor",
            &mut self.preferred_form_factor,
            enumerations.get(c, "form_factor"),
        )?;
        canonicalize(
            c,
            "preferred_color",
            &mut self.preferred_color,
            enumerations.get(c, "color"),
        )
    }

    fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Requirements for a whole build. Any category may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PcRequirements {
    pub cpu: Option<CpuRequirements>,
    pub cooler: Option<CoolerRequirements>,
    pub storage: Option<StorageRequirements>,
    pub memory: Option<MemoryRequirements>,
    pub motherboard: Option<MotherboardRequirements>,
}

impl PcRequirements {
    pub const TITLE: &'static str = "PcRequirements";

    /// Combined schema nesting the five category schemas.
    pub fn schema(enumerations: &Enumerations) -> Value {
        schema::object(
            Self::TITLE,
            "Preferences for each component of the PC build",
            vec![
                ("cpu", CpuRequirements::schema(enumerations)),
                ("cooler", CoolerRequirements::schema(enumerations)),
                ("storage", StorageRequirements::schema(enumerations)),
                ("memory", MemoryRequirements::schema(enumerations)),
                ("motherboard", MotherboardRequirements::schema(enumerations)),
            ],
        )
    }

    /// Parse and validate a combined object.
    ///
    /// Every category key must be present and nothing else may be; a `null`
    /// category stays `None`.
    pub fn parse(value: Value, enumerations: &Enumerations) -> Result<Self, SchemaViolation> {
        let Value::Object(mut map) = value else {
            return Err(SchemaViolation::shape(Self::TITLE, "expected a JSON object"));
        };

        if let Some(unknown) = map
            .keys()
            .find(|key| Category::ALL.iter().all(|c| c.as_str() != key.as_str()))
        {
            return Err(SchemaViolation::shape(
                Self::TITLE,
                format!("unknown field '{}'", unknown),
            ));
        }
        if let Some(missing) = Category::ALL.iter().find(|c| !map.contains_key(c.as_str())) {
            return Err(SchemaViolation::shape(
                Self::TITLE,
                format!("missing field '{}'", missing),
            ));
        }

        fn take<Q: Requirement>(
            map: &mut serde_json::Map<String, Value>,
            enumerations: &Enumerations,
        ) -> Result<Option<Q>, SchemaViolation> {
            match map.remove(Q::CATEGORY.as_str()) {
                None | Some(Value::Null) => Ok(None),
                Some(value) => parse_requirement(value, enumerations).map(Some),
            }
        }

        Ok(Self {
            cpu: take(&mut map, enumerations)?,
            cooler: take(&mut map, enumerations)?,
            storage: take(&mut map, enumerations)?,
            memory: take(&mut map, enumerations)?,
            motherboard: take(&mut map, enumerations)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::ColumnShape;
    use serde_json::json;

    fn enumerations() -> Enumerations {
        let mut e = Enumerations::default();
        e.insert(
            Category::Cpu,
            "microarchitecture",
            CanonicalSet::from_values([Some("Zen 4"), Some("Raptor Lake")], ColumnShape::Single),
        );
        e.insert(
            Category::Storage,
            "type",
            CanonicalSet::from_values([Some("SSD"), Some("7200 RPM")], ColumnShape::Single),
        );
        e.insert(
            Category::Motherboard,
            "cpu_socket",
            CanonicalSet::from_values([Some("AM5"), Some("LGA1700")], ColumnShape::Single),
        );
        e
    }

    #[test]
    fn test_empty_object_is_unconstrained() {
        let req: CpuRequirements = parse_requirement(json!({}), &enumerations()).unwrap();
        assert!(req.is_unconstrained());
        assert_eq!(req, CpuRequirements::default());
    }

    #[test]
    fn test_absent_is_not_zero() {
        let req: CpuRequirements =
            parse_requirement(json!({"min_cores": 0}), &enumerations()).unwrap();
        assert_eq!(req.min_cores, Some(0));
        assert!(!req.is_unconstrained());
    }

    #[test]
    fn test_quoted_numbers_are_coerced() {
        let req: MemoryRequirements = parse_requirement(
            json!({"min_capacity_gb": "32", "max_module_count": 2.0, "max_price": null}),
            &enumerations(),
        )
        .unwrap();
        assert_eq!(req.min_capacity_gb, Some(32.0));
        assert_eq!(req.max_module_count, Some(2));
        assert_eq!(req.max_price, None);
    }

    #[test]
    fn test_display_spelling_canonicalized() {
        let req: CpuRequirements = parse_requirement(
            json!({"microarchitecture": ["Zen 4", "zen_4", "raptor_lake"]}),
            &enumerations(),
        )
        .unwrap();
        assert_eq!(
            req.microarchitecture,
            Some(vec!["zen_4".to_string(), "raptor_lake".to_string()])
        );
    }

    #[test]
    fn test_single_string_accepted_as_list() {
        let req: StorageRequirements =
            parse_requirement(json!({"preferred_type": "SSD"}), &enumerations()).unwrap();
        assert_eq!(req.preferred_type, Some(vec!["ssd".to_string()]));
    }

    #[test]
    fn test_unknown_categorical_value_names_field() {
        let err = parse_requirement::<MotherboardRequirements>(
            json!({"preferred_socket": ["am4"]}),
            &enumerations(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::UnknownValue {
                field: "motherboard.preferred_socket".to_string(),
                value: "am4".to_string(),
            }
        );
    }

    #[test]
    fn test_negative_number_rejected() {
        let err =
            parse_requirement::<CpuRequirements>(json!({"max_price": -5}), &enumerations())
                .unwrap_err();
        assert_eq!(err.field(), Some("cpu.max_price"));
    }

    #[test]
    fn test_negative_count_is_shape_error() {
        let err = parse_requirement::<CpuRequirements>(json!({"min_cores": -2}), &enumerations())
            .unwrap_err();
        assert!(matches!(err, SchemaViolation::Shape { .. }));
    }

    #[test]
    fn test_wrong_type_is_shape_error() {
        let err = parse_requirement::<CoolerRequirements>(
            json!({"max_noise_level_db": "quiet"}),
            &enumerations(),
        )
        .unwrap_err();
        assert!(matches!(err, SchemaViolation::Shape { ref schema, .. } if schema == "CoolerRequirements"));
    }

    #[test]
    fn test_combined_parse_allows_null_categories() {
        let combined = PcRequirements::parse(
            json!({
                "cpu": {"min_cores": 8},
                "cooler": null,
                "storage": {"min_capacity_gb": 1000},
                "memory": {},
                "motherboard": null,
            }),
            &enumerations(),
        )
        .unwrap();
        assert_eq!(combined.cpu.unwrap().min_cores, Some(8));
        assert!(combined.cooler.is_none());
        assert!(combined.memory.unwrap().is_unconstrained());
        assert!(combined.motherboard.is_none());
    }

    #[test]
    fn test_combined_parse_requires_every_category() {
        let err = PcRequirements::parse(json!({"cpu": {"min_cores": 8}}), &enumerations())
            .unwrap_err();
        match err {
            SchemaViolation::Shape { schema, message } => {
                assert_eq!(schema, "PcRequirements");
                assert!(message.contains("cooler"), "{}", message);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_combined_parse_rejects_wrapped_object() {
        let err = PcRequirements::parse(
            json!({"PcRequirements": {"cpu": {"min_cores": 16}}}),
            &enumerations(),
        )
        .unwrap_err();
        assert!(
            matches!(err, SchemaViolation::Shape { ref message, .. } if message.contains("PcRequirements"))
        );
    }

    #[test]
    fn test_unknown_category_field_is_rejected() {
        let err = parse_requirement::<CpuRequirements>(json!({"cores": 16}), &enumerations())
            .unwrap_err();
        assert!(matches!(err, SchemaViolation::Shape { ref schema, .. } if schema == "CpuRequirements"));
    }

    #[test]
    fn test_combined_parse_rejects_non_object() {
        let err = PcRequirements::parse(json!(["cpu"]), &enumerations()).unwrap_err();
        assert!(matches!(err, SchemaViolation::Shape { .. }));
    }

    #[test]
    fn test_combined_schema_nests_categories() {
        let schema = PcRequirements::schema(&enumerations());
        assert_eq!(
            schema["properties"]["cpu"]["properties"]["microarchitecture"]["items"]["enum"],
            json!(["raptor_lake", "zen_4"])
        );
        assert_eq!(
            schema["required"],
            json!(["cpu", "cooler", "storage", "memory", "motherboard"])
        );
    }
}
