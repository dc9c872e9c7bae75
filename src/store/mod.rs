//! The orchestration core: observable record state plus the commands that
//! drive it.

mod intent;
mod records_store;
mod reducer;
mod state;

pub use intent::RecordsIntent;
pub use records_store::RecordsStore;
pub use reducer::RecordsReducer;
pub use state::RecordsState;
