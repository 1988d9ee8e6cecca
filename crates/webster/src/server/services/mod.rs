pub mod completion;
pub mod ledger;
pub mod store;
