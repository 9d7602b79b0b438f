mod node;
mod raw_ftree;

pub(crate) use node::Node;
pub(crate) use raw_ftree::RawFTree;
