pub mod basis_function;
pub mod bernstein;
pub mod cox_de_boor;
pub use basis_function::*;
pub use bernstein::*;
pub use cox_de_boor::*;
