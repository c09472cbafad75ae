//! Data model for the type resolution core.
//!
//! Resolved references (`Class.supertype`, a variable's resolved
//! type, a type's `inherits`/`implements`/`based_types`, ...) are
//! represented uniformly as `Atom` keys into `State::type_map` rather
//! than direct struct references, generalizing the ownership rule
//! spec §3.4 states for parent/base pointers to every resolved slot in
//! the model. See `DESIGN.md` for the rationale: it keeps the Member
//! Resolver's data-parallel phase lock-free (each task only ever
//! writes into the `TypeName`/member slots it owns) and keeps the
//! Ancestor Closure's recursive traversal free of the aliasing
//! conflicts a direct-pointer graph would create in safe Rust.

pub mod slot;
pub mod type_name;
pub use type_name::{
    ArrayType, ClosureParameter, ClosureType, DictionaryType, GenericType, TupleElement,
    TupleType, TypeName,
};

pub mod members;
pub use members::{
    AssociatedType, AssociatedValue, EnumCase, GenericRequirement, Method, MethodParameter,
    ReturnType, Subscript, Variable,
};

pub mod nominal;
pub use nominal::{
    ClassType, EnumType, ProtocolCompositionType, ProtocolType, StructType, Type, TypeHeader,
    Typealias,
};

pub mod parser_result;
pub use parser_result::{DeclKind, ParserResult, RawTypeDeclaration, RawTypealias};

pub mod state;
pub use state::State;
