use std::collections::HashMap;

use pycoll_core::errors::{self, ErrorKind};
use pycoll_core::types::{self, ContainerTypeId};

#[test]
fn error_kind_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, ErrorKind> = HashMap::new();

    for info in errors::ERROR_KINDS {
        assert_eq!(
            errors::from_str(info.canonical),
            Some(info.id),
            "error kind canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            errors::as_str(info.id),
            info.canonical,
            "error kind as_str mismatch for {:?}",
            info.id
        );
        assert!(
            info.canonical.ends_with("Error"),
            "error kind spelling should end with `Error`: {}",
            info.canonical
        );
        assert!(!info.description.is_empty(), "missing description for {:?}", info.id);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate error kind spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn error_kind_codes_unique() {
    let mut codes: HashMap<&'static str, ErrorKind> = HashMap::new();
    for info in errors::ERROR_KINDS {
        if let Some(prev) = codes.insert(info.code, info.id) {
            panic!("duplicate diagnostic code {:?}: {:?} and {:?}", info.code, prev, info.id);
        }
    }
}

#[test]
fn container_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, ContainerTypeId> = HashMap::new();

    for info in types::CONTAINER_TYPES {
        assert_eq!(
            types::from_str(info.canonical),
            Some(info.id),
            "container canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            types::from_str(info.rust_name),
            Some(info.id),
            "container rust name not resolvable: {}",
            info.rust_name
        );
        assert_eq!(types::as_str(info.id), info.canonical);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate container spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn immutable_containers_are_exactly_tuple_frozenset_str_namedtuple() {
    let mut immutable: Vec<&str> = types::CONTAINER_TYPES
        .iter()
        .filter(|t| types::is_immutable(t.id))
        .map(|t| t.canonical)
        .collect();
    immutable.sort_unstable();
    assert_eq!(immutable, vec!["frozenset", "namedtuple", "str", "tuple"]);
}
