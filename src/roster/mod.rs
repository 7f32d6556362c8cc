pub mod confirm;
pub mod controller;
pub mod remote;
pub mod store;
pub mod types;

pub use confirm::{AutoConfirm, ConfirmationGate};
pub use controller::{ControllerSnapshot, NameListController};
pub use remote::GraphQlNameStore;
pub use store::{create_name_store, EphemeralNameStore, NameStore};
pub use types::*;
