//! Dataflow domain: control flow graphs and result tables

pub mod cfg;
pub mod icfg;
pub mod result;

pub use cfg::{Cfg, CfgEdgeKind, CfgNode};
pub use icfg::{Icfg, IcfgEdge, IcfgNode};
pub use result::DataflowResult;
