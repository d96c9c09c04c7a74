pub mod compare;
pub mod pool;
pub mod report;
pub mod runner;
pub mod testcase;

pub use pool::*;
pub use report::*;
pub use runner::*;
pub use testcase::*;
