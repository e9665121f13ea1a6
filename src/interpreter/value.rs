/// The runtime value type.
///
/// Defines `Value`, its payload `Data`, constructors for the constants the
/// root scope is seeded with, truthiness and printing.
pub mod core;

/// The operator contract.
///
/// Arithmetic, comparison and logic between values. Each kind defines the
/// operators that make sense for it; everything else is an error naming the
/// operator and the kind.
pub mod operators;

/// User-defined function values.
pub mod function;
