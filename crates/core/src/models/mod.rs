pub mod alert;
pub mod analysis;
pub mod budget;
pub mod expense;
pub mod progress;
pub mod report;
pub mod settings;
pub mod statistics;
pub mod wallet_data;

use crate::errors::CoreError;

/// Record-level invariants that serde cannot express.
///
/// Constructors enforce these already; anything read back from a file or an
/// import goes through `validate` before it reaches the wallet.
pub trait Validate {
    fn validate(&self) -> Result<(), CoreError>;
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> Result<(), CoreError> {
        self.iter().try_for_each(Validate::validate)
    }
}
