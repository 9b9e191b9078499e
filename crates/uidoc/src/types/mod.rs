//! Type descriptor synthesis.
//!
//! Two independent sources feed prop type information: runtime validator
//! chains (`prop_types`) and static annotations (`ts`). Both normalize into
//! the descriptor model; neither consults the other.

pub(crate) mod prop_types;
pub(crate) mod ts;
