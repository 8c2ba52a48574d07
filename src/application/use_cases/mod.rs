mod describe_model;

pub use describe_model::*;
