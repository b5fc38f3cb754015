//! Property tests tying enumerations, requirement validation and filtering
//! together on the fixture catalogs.

mod common;

use build_advisor::catalog::{Catalog, CatalogRow, Category};
use build_advisor::enumeration::{
    normalize, split_atoms, ColumnShape, EnumeratedColumn, Enumerations, ENUMERATED_COLUMNS,
};
use build_advisor::filter::{filter, shortlist, RowFilter};
use build_advisor::requirements::{
    parse_requirement, CoolerRequirements, CpuRequirements, MemoryRequirements,
    MotherboardRequirements, StorageRequirements,
};
use common::fixture_context;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn sockets() -> Vec<(String, String)> {
    let context = fixture_context();
    let set = context.enumerations.get(Category::Motherboard, "cpu_socket");
    set.identifiers()
        .map(|id| (id.to_string(), set.display(id).unwrap_or(id).to_string()))
        .collect()
}

proptest! {
    #[test]
    fn any_catalog_spelling_selects_matching_boards(
        (id, display) in proptest::sample::select(sockets()),
        upper in any::<bool>(),
    ) {
        let context = fixture_context();
        let spelling = if upper { display.to_uppercase() } else { display.to_lowercase() };

        let requirement: MotherboardRequirements = parse_requirement(
            json!({"preferred_socket": [spelling]}),
            &context.enumerations,
        )
        .unwrap();
        prop_assert_eq!(requirement.preferred_socket.clone(), Some(vec![id.clone()]));

        let entries = filter(&context.catalogs.motherboard, &requirement);
        prop_assert!(!entries.is_empty());
        for entry in entries {
            let socket = entry.row.cpu_socket.as_deref().unwrap();
            prop_assert_eq!(normalize(socket), id.clone());
        }
    }

    #[test]
    fn tighter_memory_bound_never_adds_rows(low in 0.0f64..128.0, extra in 0.0f64..64.0) {
        let context = fixture_context();
        let loose = MemoryRequirements { min_capacity_gb: Some(low), ..Default::default() };
        let tight = MemoryRequirements { min_capacity_gb: Some(low + extra), ..Default::default() };

        let loose_rows: Vec<usize> =
            filter(&context.catalogs.memory, &loose).iter().map(|e| e.index).collect();
        let tight_rows: Vec<usize> =
            filter(&context.catalogs.memory, &tight).iter().map(|e| e.index).collect();

        prop_assert!(tight_rows.iter().all(|i| loose_rows.contains(i)));
    }

    #[test]
    fn shortlist_is_never_empty_for_nonempty_catalog(min_gb in 0.0f64..1024.0, limit in 1usize..5) {
        let context = fixture_context();
        let requirement = MemoryRequirements { min_capacity_gb: Some(min_gb), ..Default::default() };

        let list = shortlist(&context.catalogs.memory, Some(&requirement), limit);

        prop_assert!(!list.is_empty());
        prop_assert!(list.len() <= limit);
        prop_assert_eq!(list.fallback, filter(&context.catalogs.memory, &requirement).is_empty());
    }
}

/// Requirement field constraining an enumerated column.
fn requirement_field(column: &EnumeratedColumn) -> &'static str {
    match (column.category, column.column) {
        (Category::Cpu, "microarchitecture") => "microarchitecture",
        (Category::Cpu, "integrated_graphics") => "needs_integrated_graphics",
        (Category::Storage, "type") => "preferred_type",
        (Category::Motherboard, "cpu_socket") => "preferred_socket",
        (_, "form_factor") => "preferred_form_factor",
        (_, "interface") => "preferred_interface",
        (_, "color") => "preferred_color",
        (category, column) => panic!("no requirement field for {}.{}", category, column),
    }
}

/// Indices of rows whose cell produced `id`.
fn source_rows<R: CatalogRow>(catalog: &Catalog<R>, column: &EnumeratedColumn, id: &str) -> Vec<usize> {
    catalog
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            row.text(column.column).is_some_and(|cell| match column.shape {
                ColumnShape::Single => normalize(cell.trim()) == id,
                ColumnShape::Delimited => split_atoms(cell).any(|atom| normalize(atom) == id),
            })
        })
        .map(|(index, _)| index)
        .collect()
}

fn surviving<Q: RowFilter>(
    catalog: &Catalog<Q::Row>,
    constraint: Value,
    enumerations: &Enumerations,
) -> Vec<usize> {
    let requirement: Q = parse_requirement(constraint, enumerations).unwrap();
    filter(catalog, &requirement).iter().map(|entry| entry.index).collect()
}

#[test]
fn every_canonical_value_selects_the_rows_it_came_from() {
    let context = fixture_context();
    let catalogs = &context.catalogs;
    let enumerations = Enumerations::build(catalogs);

    for column in ENUMERATED_COLUMNS {
        let set = enumerations.get(column.category, column.column);
        assert!(!set.is_empty(), "{}.{} has no values", column.category, column.column);

        for id in set.identifiers() {
            let field = requirement_field(column);
            let value = if field == "needs_integrated_graphics" {
                json!(true)
            } else {
                json!([set.display(id).unwrap_or(id)])
            };
            let mut constraint = Map::new();
            constraint.insert(field.to_string(), value);
            let constraint = Value::Object(constraint);

            let (sources, survivors) = match column.category {
                Category::Cpu => (
                    source_rows(&catalogs.cpu, column, id),
                    surviving::<CpuRequirements>(&catalogs.cpu, constraint, &enumerations),
                ),
                Category::Cooler => (
                    source_rows(&catalogs.cooler, column, id),
                    surviving::<CoolerRequirements>(&catalogs.cooler, constraint, &enumerations),
                ),
                Category::Storage => (
                    source_rows(&catalogs.storage, column, id),
                    surviving::<StorageRequirements>(&catalogs.storage, constraint, &enumerations),
                ),
                Category::Memory => (
                    source_rows(&catalogs.memory, column, id),
                    surviving::<MemoryRequirements>(&catalogs.memory, constraint, &enumerations),
                ),
                Category::Motherboard => (
                    source_rows(&catalogs.motherboard, column, id),
                    surviving::<MotherboardRequirements>(
                        &catalogs.motherboard,
                        constraint,
                        &enumerations,
                    ),
                ),
            };

            assert!(!sources.is_empty(), "{}.{} = {}", column.category, column.column, id);
            for index in sources {
                assert!(
                    survivors.contains(&index),
                    "{}.{} = {} dropped row {}",
                    column.category,
                    column.column,
                    id,
                    index
                );
            }
        }
    }
}

#[test]
fn cache_bound_is_in_gigabytes() {
    let context = fixture_context();
    let requirement = StorageRequirements {
        min_cache_gb: Some(1.0),
        ..Default::default()
    };

    let names: Vec<&str> = filter(&context.catalogs.storage, &requirement)
        .iter()
        .map(|entry| entry.row.name.as_str())
        .collect();

    assert_eq!(names, vec!["Samsung 990 Pro"]);
}

#[test]
fn unknown_socket_is_rejected_before_filtering() {
    let context = fixture_context();
    let err = parse_requirement::<MotherboardRequirements>(
        json!({"preferred_socket": ["AM9"]}),
        &context.enumerations,
    )
    .unwrap_err();
    assert_eq!(err.field(), Some("motherboard.preferred_socket"));
}
