mod account_store;
mod content_gateway;
mod notifier;
mod report_store;
mod strike_ledger;

pub use account_store::IAccountStore;
pub use content_gateway::IContentGateway;
pub use notifier::INotifier;
pub use report_store::IReportStore;
pub use strike_ledger::IStrikeLedger;
