pub mod automaton;
pub mod determinize;
pub mod hash;
pub mod state_set;
pub mod subset_table;
mod worklist;


pub use automaton::{Automaton, FANode, StateId, SymbolId};
pub use determinize::{determinize, determinize_minimize, StartStateOptions};
pub use state_set::StateSet;
