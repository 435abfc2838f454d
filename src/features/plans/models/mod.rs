mod plan;

pub use plan::Plan;
