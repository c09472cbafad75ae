//! End-to-end scenarios run through the public entry point, covering
//! the concrete cases from the testable-properties list.

use tr_common::ResolverOptions;
use tr_core::unique_types_and_functions;
use tr_model::{
    AssociatedValue, DeclKind, EnumCase, Method, MethodParameter, ParserResult, RawTypeDeclaration,
    RawTypealias, ReturnType, Type, TypeName, Variable,
};

fn decl(kind: DeclKind, name: &str) -> RawTypeDeclaration {
    RawTypeDeclaration::new(kind, name, "Main")
}

fn run(result: ParserResult) -> tr_core::Resolved {
    unique_types_and_functions(result, &ResolverOptions::deterministic()).unwrap()
}

fn find<'a>(types: &'a [Type], name: &str) -> &'a Type {
    types
        .iter()
        .find(|t| t.global_name().as_str() == name)
        .unwrap_or_else(|| panic!("{name} missing from resolved output"))
}

#[test]
fn s1_simple_typealias_resolves_variable_to_the_aliased_class() {
    let bar = decl(DeclKind::Class, "Bar");
    let mut holder = decl(DeclKind::Struct, "Holder");
    holder.variables.push(Variable::new("x", TypeName::new("Foo")));

    let result = ParserResult {
        types: vec![bar, holder],
        functions: Vec::new(),
        typealiases: vec![RawTypealias::new("Foo", "Main", TypeName::new("Bar"))],
    };
    let resolved = run(result);

    let holder_ty = find(&resolved.types, "Holder");
    let x = &holder_ty.header().variables[0];
    assert_eq!(x.resolved_type().unwrap().as_str(), "Bar");
    assert_eq!(x.type_name.actual_type_name().unwrap().name, "Bar");
}

#[test]
fn s2_tuple_typealias_parameter_exposes_element_names_but_is_not_nominal() {
    let pair_tuple = TypeName::new("(Int, String)").with_tuple(tr_model::TupleType::new(vec![
        tr_model::TupleElement {
            label: None,
            type_name: TypeName::new("Int"),
        },
        tr_model::TupleElement {
            label: None,
            type_name: TypeName::new("String"),
        },
    ]));

    let mut f = Method::new("f");
    f.parameters.push(MethodParameter::new("p", TypeName::new("Pair")));

    let result = ParserResult {
        types: Vec::new(),
        functions: vec![f],
        typealiases: vec![RawTypealias::new("Pair", "Main", pair_tuple)],
    };
    let resolved = run(result);

    let f = &resolved.functions[0];
    let p = &f.parameters[0];
    assert!(p.resolved_type().is_none());
    let actual = p.type_name.actual_type_name().unwrap();
    let tuple = actual.tuple.as_ref().unwrap();
    assert_eq!(tuple.elements.len(), 2);
    assert_eq!(tuple.elements[0].type_name.name, "Int");
    assert_eq!(tuple.elements[1].type_name.name, "String");
}

#[test]
fn s3_array_typealias_variable_exposes_generic_array_shape() {
    let array_alias =
        TypeName::new("[String]").with_array(tr_model::ArrayType::new(TypeName::new("String")));
    let mut holder = decl(DeclKind::Struct, "Holder");
    holder.variables.push(Variable::new("xs", TypeName::new("Strings")));

    let result = ParserResult {
        types: vec![holder],
        functions: Vec::new(),
        typealiases: vec![RawTypealias::new("Strings", "Main", array_alias)],
    };
    let resolved = run(result);

    let holder_ty = find(&resolved.types, "Holder");
    let xs = &holder_ty.header().variables[0];
    let actual = xs.type_name.actual_type_name().unwrap();
    assert_eq!(actual.name, "[String]");
    assert_eq!(actual.array.as_ref().unwrap().element_type_name.name, "String");
}

#[test]
fn s4_enum_raw_type_resolves_to_the_declared_inherited_type() {
    let int_type = decl(DeclKind::Struct, "Int");
    let mut e = decl(DeclKind::Enum, "E");
    e.inherited_types.push("Int".to_string());
    e.cases.push(EnumCase::new("a"));
    e.cases.push(EnumCase::new("b"));

    let result = ParserResult {
        types: vec![int_type, e],
        functions: Vec::new(),
        typealiases: Vec::new(),
    };
    let resolved = run(result);

    let Type::Enum(enum_ty) = find(&resolved.types, "E") else {
        panic!("E did not resolve to an enum");
    };
    assert_eq!(enum_ty.raw_type_name().unwrap().name, "Int");
    assert_eq!(enum_ty.raw_type().unwrap().as_str(), "Int");
}

#[test]
fn s4_enum_with_associated_values_has_no_raw_type() {
    let mut e = decl(DeclKind::Enum, "E");
    e.inherited_types.push("Int".to_string());
    let mut case_a = EnumCase::new("a");
    case_a.associated_values.push(AssociatedValue::new(TypeName::new("Int")));
    e.cases.push(case_a);

    let result = ParserResult {
        types: vec![e],
        functions: Vec::new(),
        typealiases: Vec::new(),
    };
    let resolved = run(result);

    let Type::Enum(enum_ty) = find(&resolved.types, "E") else {
        panic!("E did not resolve to an enum");
    };
    assert!(enum_ty.raw_type_name().is_none());
    assert!(enum_ty.raw_type().is_none());
}

#[test]
fn s5_protocol_inheritance_closure_spans_the_whole_chain() {
    let a = decl(DeclKind::Protocol, "A");
    let mut b = decl(DeclKind::Protocol, "B");
    b.inherited_types.push("A".to_string());
    let mut c = decl(DeclKind::Protocol, "C");
    c.inherited_types.push("B".to_string());

    let result = ParserResult {
        types: vec![a, b, c],
        functions: Vec::new(),
        typealiases: Vec::new(),
    };
    let resolved = run(result);

    let c_ty = find(&resolved.types, "C");
    let header = c_ty.header();
    assert!(header.implements.contains(&tr_common::Atom::from("A")));
    assert!(header.implements.contains(&tr_common::Atom::from("B")));
    assert!(header.based_types.contains(&tr_common::Atom::from("A")));
    assert!(header.based_types.contains(&tr_common::Atom::from("B")));
}

#[test]
fn s6_class_supertype_chain_tracks_both_supertype_and_inherits() {
    let x = decl(DeclKind::Class, "X");
    let mut y = decl(DeclKind::Class, "Y");
    y.inherited_types.push("X".to_string());
    let mut z = decl(DeclKind::Class, "Z");
    z.inherited_types.push("Y".to_string());

    let result = ParserResult {
        types: vec![x, y, z],
        functions: Vec::new(),
        typealiases: Vec::new(),
    };
    let resolved = run(result);

    let Type::Class(z_ty) = find(&resolved.types, "Z") else {
        panic!("Z did not resolve to a class");
    };
    assert_eq!(z_ty.supertype.as_ref().unwrap().as_str(), "Y");
    let Type::Class(y_ty) = find(&resolved.types, "Y") else {
        panic!("Y did not resolve to a class");
    };
    assert_eq!(y_ty.supertype.as_ref().unwrap().as_str(), "X");
    assert!(z_ty.header.inherits.contains(&tr_common::Atom::from("X")));
    assert!(z_ty.header.inherits.contains(&tr_common::Atom::from("Y")));
}

#[test]
fn s7_nested_type_is_addressable_by_its_dotted_global_name() {
    let mut outer = decl(DeclKind::Class, "Outer");
    outer.containing_type = None;
    let mut inner = decl(DeclKind::Class, "Outer.Inner");
    inner.containing_type = Some("Outer".to_string());

    let result = ParserResult {
        types: vec![outer, inner],
        functions: Vec::new(),
        typealiases: Vec::new(),
    };
    let resolved = run(result);

    let outer_ty = find(&resolved.types, "Outer");
    assert_eq!(outer_ty.header().nested_types, vec![tr_common::Atom::from("Outer.Inner")]);
    let inner_ty = find(&resolved.types, "Outer.Inner");
    assert_eq!(inner_ty.header().containing_type.as_ref().unwrap().as_str(), "Outer");
}

#[test]
fn s8_diamond_conformance_dedupes_the_common_ancestor() {
    let a = decl(DeclKind::Protocol, "A");
    let mut b = decl(DeclKind::Protocol, "B");
    b.inherited_types.push("A".to_string());
    let mut c = decl(DeclKind::Protocol, "C");
    c.inherited_types.push("A".to_string());
    let mut d = decl(DeclKind::Protocol, "D");
    d.inherited_types.push("B".to_string());
    d.inherited_types.push("C".to_string());

    let result = ParserResult {
        types: vec![a, b, c, d],
        functions: Vec::new(),
        typealiases: Vec::new(),
    };
    let resolved = run(result);

    let d_ty = find(&resolved.types, "D");
    let header = d_ty.header();
    let a_count = header.based_types.iter().filter(|n| n.as_str() == "A").count();
    assert_eq!(a_count, 1);
    assert!(header.implements.contains(&tr_common::Atom::from("A")));
    assert!(header.implements.contains(&tr_common::Atom::from("B")));
    assert!(header.implements.contains(&tr_common::Atom::from("C")));
}

#[test]
fn output_is_sorted_by_global_name_regardless_of_input_order() {
    let result = ParserResult {
        types: vec![
            decl(DeclKind::Struct, "Zebra"),
            decl(DeclKind::Struct, "Apple"),
            decl(DeclKind::Struct, "Mango"),
        ],
        functions: vec![
            { let mut m = Method::new("zFunc"); m.return_type = ReturnType::Void; m },
            { let mut m = Method::new("aFunc"); m.return_type = ReturnType::Void; m },
        ],
        typealiases: Vec::new(),
    };
    let resolved = run(result);

    let names: Vec<&str> = resolved.types.iter().map(|t| t.global_name().as_str()).collect();
    assert_eq!(names, vec!["Apple", "Mango", "Zebra"]);
    let fn_names: Vec<&str> = resolved.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fn_names, vec!["aFunc", "zFunc"]);
}

#[test]
fn free_function_resolves_through_its_own_module_and_imports() {
    let helper = decl(DeclKind::Struct, "Helper");
    let mut f = Method::new("make");
    f.module = tr_common::Atom::from("Main");
    f.return_type = ReturnType::Explicit(TypeName::new("Helper"));

    let result = ParserResult {
        types: vec![helper],
        functions: vec![f],
        typealiases: Vec::new(),
    };
    let resolved = run(result);

    let f = &resolved.functions[0];
    assert_eq!(f.resolved_return_type().unwrap().as_str(), "Helper");
}

#[test]
fn unresolvable_name_leaves_the_slot_empty_rather_than_failing_the_run() {
    let mut holder = decl(DeclKind::Struct, "Holder");
    holder.variables.push(Variable::new("ghost", TypeName::new("Nope")));

    let result = ParserResult {
        types: vec![holder],
        functions: Vec::new(),
        typealiases: Vec::new(),
    };
    let resolved = run(result);

    let holder_ty = find(&resolved.types, "Holder");
    assert!(holder_ty.header().variables[0].resolved_type().is_none());
}
