//! The Ancestor Closure (§4.E): for every nominal type, computes the
//! transitive `based`/`basedTypes`/`inherits`/`implements` sets and
//! `Class.supertype`, walking the base-name chain post-order.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{Level, debug, span};
use tr_common::Atom;
use tr_model::{AssociatedType, Type, TypeHeader};

/// Per-type closure results, computed into a side table rather than
/// written straight into `type_map` — recursing into a base while
/// holding a mutable borrow of the type being closed over is not
/// expressible in safe Rust, so the recursive walk only ever reads
/// `type_map` and accumulates here; a final pass writes the results
/// back (see `tr-model`'s crate doc for why resolved references are
/// `Atom` keys rather than direct struct references).
#[derive(Debug, Clone, Default)]
struct AncestorSets {
    based: FxHashSet<Atom>,
    based_types: FxHashSet<Atom>,
    inherits: FxHashSet<Atom>,
    implements: FxHashSet<Atom>,
    supertype: Option<Atom>,
    inherited_associated_types: Vec<AssociatedType>,
}

/// Runs the closure over every entry in `type_map` and writes the
/// resulting `based`/`based_types`/`inherits`/`implements`/`supertype`
/// fields (and, for protocols, inherited associated types) back in.
///
/// Run sequentially, after Member Resolution has finished (§4.F step
/// 5): the `processed` memo is shared mutable state across the whole
/// walk, which is not worth parallelizing for work that's linear in
/// the number of inheritance edges.
pub fn compute_ancestor_closure(type_map: &mut FxHashMap<Atom, Type>) {
    let _span = span!(Level::DEBUG, "ancestor_closure", types = type_map.len()).entered();

    let names: Vec<Atom> = type_map.keys().cloned().collect();
    let mut results: FxHashMap<Atom, AncestorSets> = FxHashMap::default();
    let mut processed: FxHashSet<Atom> = FxHashSet::default();

    for name in &names {
        close_one(type_map, name, &mut results, &mut processed);
    }

    for (name, set) in results {
        let Some(ty) = type_map.get_mut(&name) else {
            continue;
        };
        if let Type::Class(class_ty) = ty {
            class_ty.supertype = set.supertype;
        }
        let header = ty.header_mut();
        header.based = set.based;
        header.based_types = set.based_types;
        header.inherits = set.inherits;
        header.implements = set.implements;

        if let Type::Protocol(protocol_ty) = ty {
            for associated_type in set.inherited_associated_types {
                let already_present = protocol_ty
                    .associated_types
                    .iter()
                    .any(|existing| existing.name == associated_type.name);
                if !already_present {
                    protocol_ty.associated_types.push(associated_type);
                }
            }
        }
    }
}

fn close_one(
    type_map: &FxHashMap<Atom, Type>,
    name: &Atom,
    results: &mut FxHashMap<Atom, AncestorSets>,
    processed: &mut FxHashSet<Atom>,
) {
    if !processed.insert(name.clone()) {
        return;
    }

    let Some(ty) = type_map.get(name) else {
        results.insert(name.clone(), AncestorSets::default());
        return;
    };
    let header = ty.header();

    let mut based: FxHashSet<Atom> = header
        .inherited_types
        .iter()
        .map(|raw| Atom::from(raw.as_str()))
        .collect();
    let mut based_types = FxHashSet::default();
    let mut inherits = FxHashSet::default();
    let mut implements = FxHashSet::default();
    let mut inherited_associated_types = Vec::new();

    let mut supertype = None;
    if ty.is_class() {
        if let Some(first) = header.inherited_types.first() {
            if let Some(base_name) = find_base_type(type_map, header, first) {
                if matches!(type_map.get(&base_name), Some(Type::Class(_))) {
                    supertype = Some(base_name);
                }
            }
        }
    }

    let is_protocol = matches!(ty, Type::Protocol(_));
    let raw_keys: Vec<Atom> = based.iter().cloned().collect();

    for key in raw_keys {
        let Some(base_name) = find_base_type(type_map, header, key.as_str()) else {
            continue;
        };
        if base_name == *name {
            continue;
        }

        close_one(type_map, &base_name, results, processed);

        if let Some(base_set) = results.get(&base_name) {
            based.extend(base_set.based.iter().cloned());
            based_types.extend(base_set.based_types.iter().cloned());
            inherits.extend(base_set.inherits.iter().cloned());
            implements.extend(base_set.implements.iter().cloned());
        }

        if let Some(base_ty) = type_map.get(&base_name) {
            match base_ty {
                Type::Class(_) => {
                    inherits.insert(base_name.clone());
                }
                Type::Protocol(protocol_ty) => {
                    implements.insert(base_name.clone());
                    if is_protocol {
                        inherited_associated_types.extend(protocol_ty.associated_types.iter().cloned());
                    }
                }
                Type::ProtocolComposition(_) => {
                    implements.insert(base_name.clone());
                }
                Type::Struct(_) | Type::Enum(_) => {}
            }
        }
        based_types.insert(base_name);
    }

    debug!(r#type = %name, bases = based_types.len(), "closed ancestor set");

    results.insert(
        name.clone(),
        AncestorSets {
            based,
            based_types,
            inherits,
            implements,
            supertype,
            inherited_associated_types,
        },
    );
}

/// `findBaseType` (§4.E step 3): probes the unqualified name, then the
/// owning type's own module, then each of its imports.
fn find_base_type(type_map: &FxHashMap<Atom, Type>, header: &TypeHeader, name: &str) -> Option<Atom> {
    if let Some((key, _)) = type_map.get_key_value(name) {
        return Some(key.clone());
    }
    let qualified = format!("{}.{name}", header.module);
    if let Some((key, _)) = type_map.get_key_value(qualified.as_str()) {
        return Some(key.clone());
    }
    for import in &header.imports {
        let qualified = format!("{import}.{name}");
        if let Some((key, _)) = type_map.get_key_value(qualified.as_str()) {
            return Some(key.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tr_model::{ClassType, ProtocolType, StructType, TypeHeader};

    fn class(name: &str, supertype_name: Option<&str>) -> Type {
        let mut header = TypeHeader::new(Atom::from(name), Atom::from("Main"));
        if let Some(s) = supertype_name {
            header.inherited_types.push(s.to_string());
        }
        Type::Class(ClassType {
            header,
            supertype: None,
        })
    }

    fn protocol(name: &str, bases: &[&str]) -> Type {
        let mut header = TypeHeader::new(Atom::from(name), Atom::from("Main"));
        for b in bases {
            header.inherited_types.push((*b).to_string());
        }
        Type::Protocol(ProtocolType {
            header,
            associated_types: Vec::new(),
            generic_requirements: Vec::new(),
        })
    }

    #[test]
    fn s6_class_supertype_chain() {
        let mut type_map = FxHashMap::default();
        type_map.insert(Atom::from("X"), class("X", None));
        type_map.insert(Atom::from("Y"), class("Y", Some("X")));
        type_map.insert(Atom::from("Z"), class("Z", Some("Y")));

        compute_ancestor_closure(&mut type_map);

        let Type::Class(z) = &type_map[&Atom::from("Z")] else { panic!() };
        assert_eq!(z.supertype.as_ref().unwrap().as_str(), "Y");
        assert!(z.header.inherits.contains(&Atom::from("X")));
        assert!(z.header.inherits.contains(&Atom::from("Y")));

        let Type::Class(y) = &type_map[&Atom::from("Y")] else { panic!() };
        assert_eq!(y.supertype.as_ref().unwrap().as_str(), "X");
    }

    #[test]
    fn s5_protocol_inheritance_closure() {
        let mut type_map = FxHashMap::default();
        type_map.insert(Atom::from("A"), protocol("A", &[]));
        type_map.insert(Atom::from("B"), protocol("B", &["A"]));
        type_map.insert(Atom::from("C"), protocol("C", &["B"]));

        compute_ancestor_closure(&mut type_map);

        let Type::Protocol(c) = &type_map[&Atom::from("C")] else { panic!() };
        assert!(c.header.implements.contains(&Atom::from("A")));
        assert!(c.header.implements.contains(&Atom::from("B")));
        assert!(c.header.based_types.contains(&Atom::from("A")));
        assert!(c.header.based_types.contains(&Atom::from("B")));
    }

    #[test]
    fn cyclic_protocol_inheritance_is_tolerated_not_infinite() {
        let mut type_map = FxHashMap::default();
        type_map.insert(Atom::from("A"), protocol("A", &["B"]));
        type_map.insert(Atom::from("B"), protocol("B", &["A"]));

        compute_ancestor_closure(&mut type_map);

        let Type::Protocol(a) = &type_map[&Atom::from("A")] else { panic!() };
        assert!(a.header.implements.contains(&Atom::from("B")));
    }

    #[test]
    fn unresolvable_base_name_is_left_out_of_based_types() {
        let mut type_map = FxHashMap::default();
        type_map.insert(Atom::from("X"), class("X", Some("GhostBase")));

        compute_ancestor_closure(&mut type_map);

        let Type::Class(x) = &type_map[&Atom::from("X")] else { panic!() };
        assert!(x.supertype.is_none());
        assert!(x.header.based_types.is_empty());
    }

    #[test]
    fn module_qualified_base_name_is_found_via_own_module() {
        let mut type_map = FxHashMap::default();
        type_map.insert(
            Atom::from("Main.Base"),
            Type::Class(ClassType {
                header: TypeHeader::new(Atom::from("Main.Base"), Atom::from("Main")),
                supertype: None,
            }),
        );
        type_map.insert(Atom::from("Main.Derived"), class("Main.Derived", Some("Base")));

        compute_ancestor_closure(&mut type_map);

        let Type::Class(derived) = &type_map[&Atom::from("Main.Derived")] else { panic!() };
        assert_eq!(derived.supertype.as_ref().unwrap().as_str(), "Main.Base");
    }
}
