pub mod base;
pub use base::{DocId, NodeIndex, NodeKey};

pub mod phrase;
pub use phrase::{NodeKind, PhraseKind};

pub mod node_arena;
pub use node_arena::{Node, NodeArena};

pub mod state;
pub use state::{ParseDiagnostic, ParserState};

mod state_expressions;
mod state_statements;
mod state_statements_class_members;
