pub mod grouping;
pub mod reduce;
