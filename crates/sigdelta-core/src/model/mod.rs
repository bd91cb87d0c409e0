pub mod delta;
pub mod parameter;
pub mod routine_map;
pub mod signature;
pub mod table;

pub use delta::{ChangeKind, Delta, DeltaStats, RoutineChange};
pub use parameter::{Parameter, ParameterKey, TypeExpr};
pub use routine_map::deserialize_routine_map;
pub use signature::Signature;
pub use table::SignatureTable;
