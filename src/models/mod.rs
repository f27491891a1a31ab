pub mod assessment;
pub mod enums;
pub mod interaction;
pub mod screening;
pub mod trend;
pub mod vital_sign;

pub use assessment::*;
pub use enums::*;
pub use interaction::*;
pub use screening::*;
pub use trend::*;
pub use vital_sign::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
