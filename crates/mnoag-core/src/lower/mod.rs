pub mod annotations;
pub mod grouping;
pub mod model;
pub mod operation;

pub use grouping::group_operations;
pub use model::ModelLowering;
pub use operation::OperationLowering;
