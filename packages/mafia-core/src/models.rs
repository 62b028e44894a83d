pub mod config;
pub mod faction;
pub mod ledger;
pub mod resident;
pub mod rule;
pub mod town;

pub use config::*;
pub use faction::*;
pub use ledger::*;
pub use resident::*;
pub use rule::*;
pub use town::*;
