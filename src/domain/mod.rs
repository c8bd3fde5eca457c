pub mod blacklist;
pub mod convention;
pub mod dependency;
pub mod edge;
pub mod enrichment;
pub mod graph;
pub mod model;
pub mod node;
pub mod ports;
pub mod resolver;
pub mod result;
pub mod scope;
pub mod symbol;
pub mod syntax;
pub mod traverser;
pub mod type_ref;
