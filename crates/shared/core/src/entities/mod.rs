mod balance;
mod fee;
mod order;
mod side;
mod time_in_force;

pub use balance::Balance;
pub use fee::FeeSchedule;
pub use order::{CancelRequest, ClientOrderId, OrderRequest, ReplaceRequest};
pub use side::Side;
pub use time_in_force::TimeInForce;
